#![allow(dead_code)]

use image::{ImageFormat, Rgb, RgbImage};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Create a file with dummy data and an image-looking name
pub fn create_test_image(dir: &Path, name: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();

    let file_path = dir.join(name);
    let mut file = File::create(&file_path).unwrap();
    // Write some dummy data to simulate an image
    file.write_all(b"DUMMY IMAGE DATA").unwrap();
    file_path
}

/// Create a real image of the given size; the format follows the extension
pub fn create_real_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    fs::create_dir_all(dir).unwrap();

    let file_path = dir.join(name);
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    let format = ImageFormat::from_path(&file_path).unwrap_or(ImageFormat::Png);
    img.save_with_format(&file_path, format).unwrap();
    file_path
}

/// Create the layout `a.png`, `b.jpg`, `c.txt`, `sub/d.png`
pub fn create_mixed_folder(base_dir: &Path) -> Vec<PathBuf> {
    let sub_dir = base_dir.join("sub");

    let images = vec![
        create_test_image(base_dir, "a.png"),
        create_test_image(base_dir, "b.jpg"),
        create_test_image(&sub_dir, "d.png"),
    ];
    create_test_image(base_dir, "c.txt");

    images
}

/// Sorted file names in `dir` (not recursive)
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
