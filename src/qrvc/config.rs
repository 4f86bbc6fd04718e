//! Settings resolution.
//!
//! [`RawSettings`] holds the option values as the user typed them;
//! [`AppSettings::resolve`] validates them into what the pipeline needs.

use crate::error::{QrvcError, Result};
use crate::render::{QrSettings, RecoveryLevel};
use std::path::{Path, PathBuf};

pub const DEFAULT_SIZE: u32 = 400;
pub const DEFAULT_FOREGROUND: &str = "black";
pub const DEFAULT_BACKGROUND: &str = "transparent";
pub const DEFAULT_RECOVERY: &str = "low";
pub const DEFAULT_OUTPUT_STEM: &str = "vcard";
pub use crate::model::DEFAULT_VCARD_VERSION;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSettings {
    pub silent: bool,
    pub input: Option<String>,
    pub output: Option<String>,
    pub vcard_version: String,
    pub foreground: String,
    pub background: String,
    pub border: bool,
    pub size: u32,
    pub recovery: String,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            silent: false,
            input: None,
            output: None,
            vcard_version: DEFAULT_VCARD_VERSION.to_string(),
            foreground: DEFAULT_FOREGROUND.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            border: false,
            size: DEFAULT_SIZE,
            recovery: DEFAULT_RECOVERY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSettings {
    pub input: Option<PathBuf>,
    /// Output path without the `.vcf`/`.png` extensions.
    pub output_stem: PathBuf,
}

impl FileSettings {
    pub fn vcard_path(&self) -> PathBuf {
        with_suffix(&self.output_stem, ".vcf")
    }

    pub fn qr_code_path(&self) -> PathBuf {
        with_suffix(&self.output_stem, ".png")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub silent: bool,
    pub vcard_version: String,
    pub qr: QrSettings,
    pub files: FileSettings,
}

impl AppSettings {
    pub fn resolve(raw: RawSettings) -> Result<Self> {
        let input = raw
            .input
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        if raw.silent && input.is_none() {
            return Err(QrvcError::Config("Missing input file path".to_string()));
        }
        if raw.size == 0 {
            return Err(QrvcError::Config(
                "The size must be a positive number of pixels".to_string(),
            ));
        }

        let vcard_version = raw.vcard_version.trim();
        if vcard_version.is_empty() {
            return Err(QrvcError::Config("The vCard version must not be empty".to_string()));
        }

        let qr = QrSettings {
            size: raw.size,
            border: raw.border,
            foreground: parse_color(&raw.foreground)?,
            background: parse_color(&raw.background)?,
            recovery: raw.recovery.parse::<RecoveryLevel>()?,
        };

        let files = FileSettings {
            output_stem: output_stem(input.as_deref(), raw.output.as_deref()),
            input,
        };

        Ok(Self {
            silent: raw.silent,
            vcard_version: vcard_version.to_string(),
            qr,
            files,
        })
    }
}

/// Output stem: the explicit output, else the input's base name without
/// extension, else `vcard`.
pub fn output_stem(input: Option<&Path>, output: Option<&str>) -> PathBuf {
    if let Some(output) = output.map(str::trim).filter(|s| !s.is_empty()) {
        return PathBuf::from(output);
    }
    input
        .and_then(Path::file_stem)
        .filter(|stem| !stem.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_STEM))
}

/// Parses a CSS colour (`#000`, `black`, `rgb(0 0 0 / 50%)`, `transparent`).
pub fn parse_color(value: &str) -> Result<[u8; 4]> {
    csscolorparser::parse(value.trim())
        .map(|color| color.to_rgba8())
        .map_err(|e| QrvcError::Config(format!("Invalid color \"{}\": {}", value, e)))
}

fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut path = stem.as_os_str().to_owned();
    path.push(suffix);
    PathBuf::from(path)
}
