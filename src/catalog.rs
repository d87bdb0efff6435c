use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::error::{CarouselError, Result};
use crate::texture_loader::load_sorted_image_paths;

/// Fixed, ordered list of image locators the carousel pages through.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<PathBuf>,
}

impl Catalog {
    /// Builds `dir/image (k).jpg` for k = 1..=count. Files are not probed;
    /// a missing one only shows up later as a placeholder card.
    pub fn from_convention(dir: &Path, count: usize) -> Result<Self> {
        let entries = (1..=count)
            .map(|k| dir.join(format!("image ({}).jpg", k)))
            .collect();
        Self::from_paths(entries)
    }

    /// Builds the catalog from the image files found in `dir`, sorted by name.
    pub fn scan(dir: &Path) -> Result<Self> {
        Self::from_paths(load_sorted_image_paths(dir)?)
    }

    pub fn from_paths(entries: Vec<PathBuf>) -> Result<Self> {
        if entries.is_empty() {
            return Err(CarouselError::EmptyCatalog);
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.entries.get(index).map(PathBuf::as_path)
    }

    pub fn alt_text(index: usize) -> String {
        format!("Image {}", index + 1)
    }

    /// Indices materialized around `current`, clamped to the catalog bounds.
    pub fn window(&self, current: usize, preload: usize) -> RangeInclusive<usize> {
        let last = self.entries.len() - 1;
        let start = current.saturating_sub(preload);
        let end = current.saturating_add(preload).min(last);
        start..=end
    }
}
