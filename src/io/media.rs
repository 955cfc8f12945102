// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading.
//!
//! This module resolves image references from the project data against the
//! assets directory and decodes them into RGBA pixels suitable for egui
//! textures.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A decoded image ready to upload as a texture.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major
    pub pixels: Vec<u8>,
}

/// Map an image reference such as `/images/VoyageX.png` to a file under
/// `assets_dir`.
pub fn resolve_asset(assets_dir: &Path, image_ref: &str) -> PathBuf {
    assets_dir.join(image_ref.trim_start_matches('/'))
}

/// Decode an image file to RGBA.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to decode image {}", path.display()))?
        .to_rgba8();

    let (width, height) = img.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}
