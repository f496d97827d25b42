use std::path::{Path, PathBuf};
use std::fs;
use image::{GrayImage, ImageFormat, RgbImage};

use crate::errors::{PaperMixError, Result};

/// File extensions accepted as load photos
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// A decoded photo with its report label
pub struct InputImage {
    pub image: RgbImage,
    pub path: PathBuf,
    pub filename: String,
}

impl InputImage {
    /// Wrap an already decoded image, e.g. from a camera feed
    pub fn from_rgb(image: RgbImage, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        Self {
            image,
            path: PathBuf::from(&filename),
            filename,
        }
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Get all JPEG/PNG files directly inside a directory, sorted by path
pub fn get_image_files_in_dir<P: AsRef<Path>>(dir_path: P) -> Result<Vec<PathBuf>> {
    let dir_path = dir_path.as_ref();

    if !dir_path.exists() {
        return Err(PaperMixError::InvalidPath(dir_path.to_path_buf()));
    }

    if !dir_path.is_dir() {
        return Err(PaperMixError::Config(format!(
            "{} is not a directory", dir_path.display()
        )));
    }

    let mut image_files = Vec::new();
    for entry in fs::read_dir(dir_path)? {
        let path = entry?.path();
        if path.is_file() && has_image_extension(&path) {
            image_files.push(path);
        }
    }
    image_files.sort();

    Ok(image_files)
}

/// Load a JPEG or PNG photo as RGB; the label is the file name
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<InputImage> {
    let path = path.as_ref();

    let filename = path.file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| PaperMixError::InvalidPath(path.to_path_buf()))?
        .to_string();

    let image = image::open(path)?.to_rgb8();

    Ok(InputImage {
        image,
        path: path.to_path_buf(),
        filename,
    })
}

/// Save a mask as PNG
pub fn save_mask<P: AsRef<Path>>(mask: &GrayImage, path: P) -> Result<()> {
    mask.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save an RGB image as PNG
pub fn save_image<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
