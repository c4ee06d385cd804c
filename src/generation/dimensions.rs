use crate::{
    error::{Result, SeedreamError},
    models::SizeClass,
};

pub const MIN_CUSTOM_DIMENSION: u32 = 512;
pub const MAX_CUSTOM_DIMENSION: u32 = 2048;

const SHORT_DIMENSION: f64 = 512.0;
const LONG_DIMENSION: f64 = 2048.0;
const TARGET_PIXELS: f64 = 1_048_576.0;

/// Pixel dimensions derived once from the task, immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Render as the Ark size token, e.g. "1024x1024".
    pub fn size_token(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

fn ratio_for(aspect_ratio: &str) -> Option<(f64, f64)> {
    match aspect_ratio {
        "1:1" => Some((1.0, 1.0)),
        "3:4" => Some((3.0, 4.0)),
        "4:3" => Some((4.0, 3.0)),
        "16:9" => Some((16.0, 9.0)),
        "9:16" => Some((9.0, 16.0)),
        "2:3" => Some((2.0, 3.0)),
        "3:2" => Some((3.0, 2.0)),
        "21:9" => Some((21.0, 9.0)),
        _ => None,
    }
}

/// Resolve pixel dimensions from an aspect ratio, a size preset, and the
/// optional custom pair. Rounded values may land slightly outside the
/// small/big anchors; they are not clamped afterwards.
pub fn resolve_dimensions(
    aspect_ratio: &str,
    size: SizeClass,
    custom_width: Option<u32>,
    custom_height: Option<u32>,
) -> Result<Dimensions> {
    if aspect_ratio == "custom" {
        let (width, height) = match (custom_width, custom_height) {
            (Some(width), Some(height)) => (width, height),
            _ => {
                return Err(SeedreamError::ValidationError(
                    "width and height must be provided when aspect_ratio is 'custom'".to_string(),
                ))
            }
        };
        let in_range = |v: u32| (MIN_CUSTOM_DIMENSION..=MAX_CUSTOM_DIMENSION).contains(&v);
        if !in_range(width) || !in_range(height) {
            return Err(SeedreamError::ValidationError(format!(
                "width and height must be between {} and {} pixels",
                MIN_CUSTOM_DIMENSION, MAX_CUSTOM_DIMENSION
            )));
        }
        return Ok(Dimensions { width, height });
    }

    let (ratio_w, ratio_h) = ratio_for(aspect_ratio).ok_or_else(|| {
        SeedreamError::ValidationError(format!("invalid aspect ratio: {}", aspect_ratio))
    })?;

    let (width, height) = match size {
        SizeClass::Small => {
            if ratio_w < ratio_h {
                (SHORT_DIMENSION, (SHORT_DIMENSION * ratio_h / ratio_w).round())
            } else {
                ((SHORT_DIMENSION * ratio_w / ratio_h).round(), SHORT_DIMENSION)
            }
        }
        SizeClass::Big => {
            if ratio_w > ratio_h {
                (LONG_DIMENSION, (LONG_DIMENSION * ratio_h / ratio_w).round())
            } else {
                ((LONG_DIMENSION * ratio_w / ratio_h).round(), LONG_DIMENSION)
            }
        }
        SizeClass::Regular => {
            let width = (TARGET_PIXELS * ratio_w / ratio_h).sqrt().round();
            let height = (width * ratio_h / ratio_w).round();
            (width, height)
        }
    };

    Ok(Dimensions {
        width: width as u32,
        height: height as u32,
    })
}
