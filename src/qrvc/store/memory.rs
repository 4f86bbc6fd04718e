use super::CardStore;
use crate::error::Result;
use image::RgbaImage;

pub const MEMORY_INPUT: &str = "memory:input";
pub const MEMORY_VCARD: &str = "memory:vcard";
pub const MEMORY_QR_CODE: &str = "memory:qrcode";

#[derive(Debug, Default)]
pub struct InMemoryStore {
    input: Option<Vec<u8>>,
    pub vcard: Option<Vec<u8>>,
    pub qr_code: Option<RgbaImage>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: impl Into<Vec<u8>>) -> Self {
        Self {
            input: Some(input.into()),
            ..Self::default()
        }
    }
}

impl CardStore for InMemoryStore {
    fn read_input(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.input.clone())
    }

    fn write_vcard(&mut self, content: &[u8]) -> Result<()> {
        self.vcard = Some(content.to_vec());
        Ok(())
    }

    fn write_qr_code(&mut self, image: &RgbaImage) -> Result<()> {
        self.qr_code = Some(image.clone());
        Ok(())
    }

    fn input_location(&self) -> Option<String> {
        self.input.as_ref().map(|_| MEMORY_INPUT.to_string())
    }

    fn vcard_location(&self) -> String {
        MEMORY_VCARD.to_string()
    }

    fn qr_code_location(&self) -> String {
        MEMORY_QR_CODE.to_string()
    }
}
