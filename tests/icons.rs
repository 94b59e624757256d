use pwa_icons::commands::{ICON_SIZES, icon_path};
use pwa_icons::png::STANDARD_HEADER;
use pwa_icons::{Config, EncodeError, Error, generate_icons, icon, png as encoder};
use std::fs;
use tempfile::tempdir;

fn decode(bytes: &[u8]) -> (u32, u32, Vec<u8>) {
    let mut reader = png::Decoder::new(bytes).read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    assert_eq!(info.color_type, png::ColorType::Rgb);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);
    buf.truncate(info.buffer_size());
    (info.width, info.height, buf)
}

/// Walk (type, length) pairs after the signature.
fn chunk_layout(bytes: &[u8]) -> Vec<([u8; 4], usize)> {
    let mut layout = Vec::new();
    let mut pos = STANDARD_HEADER.len();
    while pos < bytes.len() {
        let len = u32::from_be_bytes(bytes[pos..pos + 4].try_into().unwrap()) as usize;
        let tag: [u8; 4] = bytes[pos + 4..pos + 8].try_into().unwrap();
        layout.push((tag, len));
        pos += 12 + len;
    }
    assert_eq!(pos, bytes.len());
    layout
}

#[test]
fn base_icon_has_signature_and_three_chunks() {
    let pixels = icon::generate(192);
    let bytes = encoder::encode_img(192, 192, &pixels).unwrap();

    assert_eq!(
        bytes[..8],
        [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
    );
    let layout = chunk_layout(&bytes);
    assert_eq!(layout.len(), 3);
    assert_eq!(&layout[0], &(*b"IHDR", 13));
    assert_eq!(&layout[1].0, b"IDAT");
    assert_eq!(&layout[2], &(*b"IEND", 0));
}

#[test]
fn writes_decodable_icons() {
    let dir = tempdir().unwrap();
    let config = Config {
        out_dir: dir.path().join("nested").join("icons"),
    };

    let written = generate_icons(&config).unwrap();

    assert_eq!(written.len(), ICON_SIZES.len());
    for (path, size) in written.iter().zip(ICON_SIZES) {
        assert_eq!(*path, icon_path(&config.out_dir, size));
        let (w, h, buf) = decode(&fs::read(path).unwrap());
        assert_eq!((w, h), (size, size));
        let expected: Vec<u8> = icon::generate(size).into_iter().flatten().collect();
        assert_eq!(buf, expected);
    }

    let mut names: Vec<String> = fs::read_dir(&config.out_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["icon-192.png", "icon-512.png"]);
}

#[test]
fn rerun_overwrites_with_identical_bytes() {
    let dir = tempdir().unwrap();
    let config = Config {
        out_dir: dir.path().to_path_buf(),
    };
    let target = icon_path(dir.path(), 192);
    fs::write(&target, b"not a png").unwrap();

    generate_icons(&config).unwrap();
    let first = fs::read(&target).unwrap();
    generate_icons(&config).unwrap();
    let second = fs::read(&target).unwrap();

    assert_eq!(first[..8], STANDARD_HEADER);
    assert_eq!(first, second);
}

#[test]
fn reports_unusable_output_directory() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("icons");
    fs::write(&blocker, b"a file, not a directory").unwrap();

    let err = generate_icons(&Config {
        out_dir: blocker.clone(),
    })
    .unwrap_err();

    assert!(matches!(err, Error::CreateDir { ref path, .. } if *path == blocker));
    assert_eq!(fs::read(&blocker).unwrap(), b"a file, not a directory");
}

#[test]
fn mismatched_pixel_count_is_rejected() {
    let pixels = icon::generate(2);
    let err = encoder::encode_img(3, 3, &pixels).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::InvalidPixelCount {
            expected: 9,
            actual: 4
        }
    ));
}

#[test]
fn blocked_icon_reports_which_write_failed() {
    let dir = tempdir().unwrap();
    let target = icon_path(dir.path(), 512);
    fs::create_dir(target.with_extension("png.tmp")).unwrap();

    let err = generate_icons(&Config {
        out_dir: dir.path().to_path_buf(),
    })
    .unwrap_err();

    assert!(matches!(
        err,
        Error::StorageWriteFailure { size: 512, ref path, .. } if *path == target
    ));
    assert!(!target.exists());
    assert!(icon_path(dir.path(), 192).exists());
}
