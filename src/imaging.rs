//! Background removal for logo images.
//!
//! Both classifiers look at one pixel at a time and clear it to transparent
//! white when it matches; nothing is carried between pixels.

use crate::constants::DEFAULT_WHITE_THRESHOLD;
use crate::error::Result;
use crate::metrics::ImportMetrics;
use image::{ImageFormat, Rgba, RgbaImage};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, instrument};

const TRANSPARENT: Rgba<u8> = Rgba([255, 255, 255, 0]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundMode {
    /// Clear pixels whose channels all exceed `threshold`
    White { threshold: u8 },
    /// Clear the white and light-gray squares of a transparency checkerboard
    Checkerboard,
}

impl Default for BackgroundMode {
    fn default() -> Self {
        BackgroundMode::White {
            threshold: DEFAULT_WHITE_THRESHOLD,
        }
    }
}

impl BackgroundMode {
    pub fn is_background(&self, pixel: &Rgba<u8>) -> bool {
        let [r, g, b, _] = pixel.0;
        match *self {
            BackgroundMode::White { threshold } => r > threshold && g > threshold && b > threshold,
            BackgroundMode::Checkerboard => {
                let is_white = r > 240 && g > 240 && b > 240;
                let is_gray = r.abs_diff(g) < 10 && r.abs_diff(b) < 10 && r > 150 && r < 240;
                is_white || is_gray
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    pub width: u32,
    pub height: u32,
    pub cleared: usize,
}

/// Clears background pixels in place and returns how many were cleared.
pub fn remove_background(image: &mut RgbaImage, mode: BackgroundMode) -> usize {
    let mut cleared = 0;
    for pixel in image.pixels_mut() {
        if mode.is_background(pixel) {
            *pixel = TRANSPARENT;
            cleared += 1;
        }
    }
    cleared
}

/// The `n` most frequent colours, most common first.
pub fn dominant_colors(image: &RgbaImage, n: usize) -> Vec<([u8; 4], usize)> {
    let mut counts: HashMap<[u8; 4], usize> = HashMap::new();
    for pixel in image.pixels() {
        *counts.entry(pixel.0).or_insert(0) += 1;
    }
    let mut ranked: Vec<([u8; 4], usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Opens `input`, clears its background and writes the result to `output` as PNG.
#[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn clean_image_file(input: &Path, output: &Path, mode: BackgroundMode) -> Result<CleanupReport> {
    let mut image = image::open(input)?.to_rgba8();

    if mode == BackgroundMode::Checkerboard {
        debug!("Most common colors: {:?}", dominant_colors(&image, 10));
    }

    let cleared = remove_background(&mut image, mode);
    ImportMetrics::record_pixels_cleared(cleared);
    image.save_with_format(output, ImageFormat::Png)?;

    info!("Removed background from {} pixels", cleared);
    Ok(CleanupReport {
        width: image.width(),
        height: image.height(),
        cleared,
    })
}
