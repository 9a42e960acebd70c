#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgb, RgbImage};
use media_transform::processing::codec;
use media_transform::{OptionSet, Raster};

/// Writes a gradient image of the given size, encoded for the path's extension.
pub fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let ext = path.extension().unwrap().to_str().unwrap().to_lowercase();
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, ((x + y) % 256) as u8])
    });
    let bytes = codec::encode(&Raster::from(DynamicImage::ImageRgb8(img)), &ext).unwrap();
    fs::write(&path, bytes).unwrap();
    path
}

pub fn write_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"this is not an image at all").unwrap();
    path
}

/// Decodes the file at `path` and returns its dimensions.
pub fn dimensions(path: &Path) -> (u32, u32) {
    let ext = path.extension().unwrap().to_str().unwrap().to_lowercase();
    codec::decode(&fs::read(path).unwrap(), &ext).unwrap().dimensions()
}

pub fn size(width: u32, height: u32) -> OptionSet {
    OptionSet::new().with("width", width).with("height", height)
}

pub fn dir_entries(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}
