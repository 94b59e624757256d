use crate::img::Pixel;

pub const BACKGROUND: Pixel = [0, 0, 0];
pub const PANEL: Pixel = [26, 26, 26];
pub const RED: Pixel = [255, 59, 48];
pub const WHITE: Pixel = [255, 255, 255];

/// Size the artwork was drawn at; every threshold scales from here.
const BASE_SIZE: f64 = 192.0;

/// Rounding centre of one panel corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Corner {
    cx: i64,
    cy: i64,
}

/// Pixel thresholds for one icon size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    pub size: i64,
    pub padding: i64,
    pub corner_radius: i64,
    pub center_y: i64,
    pub s_center_x: i64,
    pub r_center_x: i64,
    pub letter_half: i64,
    pub line_x: i64,
    pub line_top: i64,
    pub line_bottom: i64,
    pub line_width: i64,
    corners: [Corner; 4],
}

impl Geometry {
    pub fn new(size: u32) -> Geometry {
        let scale = size as f64 / BASE_SIZE;
        let scaled = |v: f64| (v * scale) as i64;
        let frac = |f: f64| (size as f64 * f) as i64;

        let size = size as i64;
        let padding = scaled(20.0);
        let corner_radius = scaled(30.0);
        let (left, right, top, bottom) = (padding, size - padding, padding, size - padding);

        Geometry {
            size,
            padding,
            corner_radius,
            center_y: size / 2,
            s_center_x: frac(0.35),
            r_center_x: frac(0.65),
            letter_half: scaled(25.0),
            line_x: size / 2,
            line_top: frac(0.7),
            line_bottom: frac(0.8),
            line_width: scaled(2.0),
            corners: [
                Corner { cx: left + corner_radius, cy: top + corner_radius },
                Corner { cx: right - corner_radius, cy: top + corner_radius },
                Corner { cx: left + corner_radius, cy: bottom - corner_radius },
                Corner { cx: right - corner_radius, cy: bottom - corner_radius },
            ],
        }
    }

    fn in_panel(&self, x: i64, y: i64) -> bool {
        let (inner, outer) = (self.padding, self.size - self.padding);
        inner <= x && x < outer && inner <= y && y < outer
    }

    // Square corner cells, then clipped by distance to *any* corner centre. For
    // non-degenerate sizes this removes the whole corner square.
    fn in_clipped_corner(&self, x: i64, y: i64) -> bool {
        let r = self.corner_radius;
        let (inner, outer) = (self.padding, self.size - self.padding);
        let x_band = x < inner + r || x >= outer - r;
        let y_band = y < inner + r || y >= outer - r;
        if !(x_band && y_band) {
            return false;
        }
        self.corners.iter().any(|c| {
            let (dx, dy) = (x - c.cx, y - c.cy);
            dx * dx + dy * dy > r * r
        })
    }

    fn in_letter(&self, x: i64, y: i64, center_x: i64) -> bool {
        (x - center_x).abs() < self.letter_half && (y - self.center_y).abs() < self.letter_half
    }

    fn in_line(&self, x: i64, y: i64) -> bool {
        (x - self.line_x).abs() <= self.line_width && self.line_top <= y && y <= self.line_bottom
    }

    /// Colour of the pixel at column `x`, row `y`. Later layers win.
    pub fn color_at(&self, x: i64, y: i64) -> Pixel {
        let mut color = BACKGROUND;
        if self.in_panel(x, y) && !self.in_clipped_corner(x, y) {
            color = PANEL;
        }
        if self.in_letter(x, y, self.s_center_x) {
            color = RED;
        }
        if self.in_letter(x, y, self.r_center_x) {
            color = WHITE;
        }
        if self.in_line(x, y) {
            color = RED;
        }
        color
    }
}

/// Render the icon artwork as `size * size` row-major pixels.
pub fn generate(size: u32) -> Vec<Pixel> {
    let geometry = Geometry::new(size);
    let side = size as i64;
    (0..side)
        .flat_map(|y| (0..side).map(move |x| (x, y)))
        .map(|(x, y)| geometry.color_at(x, y))
        .collect()
}
