use image::{Rgb, RgbImage};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Write a small valid PNG.
pub fn write_png(path: &Path) {
    RgbImage::from_pixel(4, 4, Rgb([200, 30, 30]))
        .save(path)
        .unwrap();
}

/// Write bytes that no decoder accepts, e.g. an HTML error page saved as `.jpg`.
pub fn write_corrupt(path: &Path) {
    fs::write(path, b"<html><body>403 Forbidden</body></html>").unwrap();
}

/// Create `root/<term>` with `good` valid PNGs and `bad` corrupt files.
pub fn populate(root: &Path, term: &str, good: usize, bad: usize) -> PathBuf {
    let dir = root.join(term);
    fs::create_dir_all(&dir).unwrap();
    for i in 0..good {
        write_png(&dir.join(format!("{term}_{i:03}.png")));
    }
    for i in 0..bad {
        write_corrupt(&dir.join(format!("{term}_broken_{i:03}.jpg")));
    }
    dir
}

/// Names of the regular files directly under `dir`.
pub fn file_names(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.is_file())
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}
