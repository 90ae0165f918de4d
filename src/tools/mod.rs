//! File helpers shared by the `qrtool` binary and the benches

use crate::error::{QrError, QrResult};
use image::RgbImage;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const FRAME_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// Load an image file as an RGB frame.
pub fn load_rgb<P: AsRef<Path>>(path: P) -> QrResult<RgbImage> {
    let img = image::open(path).map_err(QrError::ImageDecode)?;
    Ok(img.to_rgb8())
}

/// Read a whole file, mapping I/O failures to `InvalidParameter` with the path.
pub fn read_bytes<P: AsRef<Path>>(path: P) -> QrResult<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| QrError::invalid(format!("cannot read {}: {e}", path.display())))
}

/// Write encoded bytes, creating parent directories.
pub fn write_bytes<P: AsRef<Path>>(path: P, bytes: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)
}

/// Image files directly inside `dir`, sorted by name.
pub fn frame_paths<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
    let mut frames: Vec<PathBuf> = fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_frame_file(path))
        .collect();
    frames.sort();
    Ok(frames)
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| FRAME_EXTENSIONS.contains(&ext.as_str()))
}
