use crate::error::Error;
use crate::icon;
use crate::png;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Square sizes written on every run.
pub const ICON_SIZES: [u32; 2] = [192, 512];

pub const DEFAULT_OUT_DIR: &str = "icons";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub out_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

pub fn icon_path(out_dir: &Path, size: u32) -> PathBuf {
    out_dir.join(format!("icon-{}.png", size))
}

/// Render, encode and write every icon size into `config.out_dir`.
///
/// Returns the written paths in `ICON_SIZES` order.
pub fn generate_icons(config: &Config) -> Result<Vec<PathBuf>, Error> {
    fs::create_dir_all(&config.out_dir).map_err(|source| Error::CreateDir {
        path: config.out_dir.clone(),
        source,
    })?;

    let mut written = Vec::with_capacity(ICON_SIZES.len());
    for size in ICON_SIZES {
        written.push(write_icon(&config.out_dir, size)?);
    }
    log::info!(
        "Done! {} icons written to {}",
        written.len(),
        config.out_dir.display()
    );
    Ok(written)
}

fn write_icon(out_dir: &Path, size: u32) -> Result<PathBuf, Error> {
    log::info!("Creating {size}x{size} icon...");
    let pixels = icon::generate(size);
    let encoded =
        png::encode_img(size, size, &pixels).map_err(|source| Error::Encode { size, source })?;

    let path = icon_path(out_dir, size);
    write_atomic(&path, &encoded).map_err(|source| Error::StorageWriteFailure {
        size,
        path: path.clone(),
        source,
    })?;
    log::info!("  -> {} ({} bytes)", path.display(), encoded.len());
    Ok(path)
}

/// Write through a sibling temp file so `path` ends up complete or untouched.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("png.tmp");
    let result = fs::File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
