use super::CardStore;
use crate::config::FileSettings;
use crate::error::{QrvcError, Result};
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

const VCARD_EXTENSION: &str = "vcf";

pub struct FileStore {
    files: FileSettings,
}

impl FileStore {
    pub fn new(files: FileSettings) -> Self {
        Self { files }
    }

    /// The path that will actually be read: the configured input, or the
    /// same path with `.vcf` appended when the input has no extension and
    /// does not exist.
    fn resolve_input(&self) -> Option<PathBuf> {
        let path = self.files.input.as_ref()?;
        if path.exists() || path.extension().is_some() {
            return Some(path.clone());
        }

        let fallback = path.with_extension(VCARD_EXTENSION);
        if fallback.exists() {
            tracing::debug!(path = %fallback.display(), "Using input with .vcf extension");
            Some(fallback)
        } else {
            Some(path.clone())
        }
    }

    fn ensure_parent(&self, path: &std::path::Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
                fs::create_dir_all(parent).map_err(|e| QrvcError::transport(parent, e))
            }
            _ => Ok(()),
        }
    }
}

impl CardStore for FileStore {
    fn read_input(&self) -> Result<Option<Vec<u8>>> {
        let Some(path) = self.resolve_input() else {
            return Ok(None);
        };
        tracing::debug!(path = %path.display(), "Reading input");
        let content = fs::read(&path).map_err(|e| QrvcError::transport(&path, e))?;
        Ok(Some(content))
    }

    fn write_vcard(&mut self, content: &[u8]) -> Result<()> {
        let path = self.files.vcard_path();
        self.ensure_parent(&path)?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "Writing vCard");
        fs::write(&path, content).map_err(|e| QrvcError::transport(&path, e))
    }

    fn write_qr_code(&mut self, image: &RgbaImage) -> Result<()> {
        let path = self.files.qr_code_path();
        self.ensure_parent(&path)?;
        tracing::debug!(path = %path.display(), "Writing QR code");

        let file = fs::File::create(&path).map_err(|e| QrvcError::transport(&path, e))?;
        let mut writer = BufWriter::new(file);
        image
            .write_to(&mut writer, ImageFormat::Png)
            .map_err(|e| match e {
                image::ImageError::IoError(io) => QrvcError::transport(&path, io),
                other => QrvcError::Render(other.to_string()),
            })?;
        writer.flush().map_err(|e| QrvcError::transport(&path, e))
    }

    fn input_location(&self) -> Option<String> {
        self.resolve_input().map(|p| p.display().to_string())
    }

    fn vcard_location(&self) -> String {
        self.files.vcard_path().display().to_string()
    }

    fn qr_code_location(&self) -> String {
        self.files.qr_code_path().display().to_string()
    }
}
