use crate::model::Record;

pub mod bom;
pub mod edit;
pub mod load;
pub mod publish;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub record: Option<Record>,
    pub vcard: Option<Vec<u8>>,
    pub bom: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_record(mut self, record: Record) -> Self {
        self.record = Some(record);
        self
    }

    pub fn with_vcard(mut self, vcard: Vec<u8>) -> Self {
        self.vcard = Some(vcard);
        self
    }

    pub fn with_bom(mut self, bom: String) -> Self {
        self.bom = Some(bom);
        self
    }
}
