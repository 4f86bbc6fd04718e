//! # Transport Layer
//!
//! The [`CardStore`] trait is where vCard bytes come from and where the two
//! outputs go. The pipeline never touches the file system directly.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: reads the input file, writes `<stem>.vcf` and
//!   `<stem>.png`
//!   - An input path without extension that cannot be found is retried with
//!     `.vcf` appended
//!
//! - [`memory::InMemoryStore`]: keeps everything in memory, for tests
//!
//! Writes are not transactional. When the QR code cannot be written the vCard
//! file written before it stays in place.

use crate::error::Result;
use image::RgbaImage;

pub mod fs;
#[cfg(any(test, feature = "test_utils"))]
pub mod memory;

pub trait CardStore {
    /// The input vCard, or `None` when no input was configured.
    fn read_input(&self) -> Result<Option<Vec<u8>>>;

    fn write_vcard(&mut self, content: &[u8]) -> Result<()>;

    fn write_qr_code(&mut self, image: &RgbaImage) -> Result<()>;

    /// Human readable location of the input, for messages.
    fn input_location(&self) -> Option<String>;

    fn vcard_location(&self) -> String;

    fn qr_code_location(&self) -> String;
}
