//! QR code rendering.
//!
//! The image is generated from the serialized vCard bytes, never from the
//! record, so the QR code and the `.vcf` file always carry the same text.

use crate::error::{QrvcError, Result};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use qrcode::{EcLevel, QrCode};
use std::fmt;
use std::str::FromStr;

/// Error correction level; higher levels survive more damage but hold less
/// data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecoveryLevel {
    #[default]
    Low,
    Medium,
    Quartile,
    High,
}

impl RecoveryLevel {
    fn ec_level(self) -> EcLevel {
        match self {
            RecoveryLevel::Low => EcLevel::L,
            RecoveryLevel::Medium => EcLevel::M,
            RecoveryLevel::Quartile => EcLevel::Q,
            RecoveryLevel::High => EcLevel::H,
        }
    }
}

impl FromStr for RecoveryLevel {
    type Err = QrvcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "l" => Ok(RecoveryLevel::Low),
            "medium" | "m" => Ok(RecoveryLevel::Medium),
            "quartile" | "q" => Ok(RecoveryLevel::Quartile),
            "high" | "h" => Ok(RecoveryLevel::High),
            other => Err(QrvcError::Config(format!(
                "Unknown recovery level \"{}\", expected low, medium, quartile or high",
                other
            ))),
        }
    }
}

impl fmt::Display for RecoveryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecoveryLevel::Low => "low",
            RecoveryLevel::Medium => "medium",
            RecoveryLevel::Quartile => "quartile",
            RecoveryLevel::High => "high",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSettings {
    /// Edge length of the square image in pixels, > 0.
    pub size: u32,
    /// Adds the standard four-module quiet zone.
    pub border: bool,
    pub foreground: [u8; 4],
    pub background: [u8; 4],
    pub recovery: RecoveryLevel,
}

/// Renders `content` as a `size` × `size` QR code.
pub fn render_qr_code(content: &[u8], settings: &QrSettings) -> Result<RgbaImage> {
    if settings.size == 0 {
        return Err(QrvcError::Render("image size must be positive".to_string()));
    }

    let code = QrCode::with_error_correction_level(content, settings.recovery.ec_level())
        .map_err(|e| QrvcError::Render(e.to_string()))?;

    let image = code
        .render::<Rgba<u8>>()
        .dark_color(Rgba(settings.foreground))
        .light_color(Rgba(settings.background))
        .quiet_zone(settings.border)
        .max_dimensions(settings.size, settings.size)
        .build();

    tracing::debug!(
        modules = code.width(),
        raw_width = image.width(),
        size = settings.size,
        "Rendered QR code"
    );

    if image.dimensions() == (settings.size, settings.size) {
        return Ok(image);
    }
    Ok(imageops::resize(
        &image,
        settings.size,
        settings.size,
        FilterType::Nearest,
    ))
}
