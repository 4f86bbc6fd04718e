use crate::codec::encode;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Record;
use crate::render::{render_qr_code, QrSettings};
use crate::store::CardStore;

/// Encodes the record, writes the vCard, then renders and writes the QR code
/// from the very same bytes.
pub fn run<S: CardStore>(store: &mut S, record: &Record, qr: &QrSettings) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let vcard = encode(record)?;
    store.write_vcard(&vcard)?;
    result.add_message(CmdMessage::success(format!(
        "The vCard has been written to {}",
        store.vcard_location()
    )));

    let image = render_qr_code(&vcard, qr)?;
    store.write_qr_code(&image)?;
    result.add_message(CmdMessage::success(format!(
        "The QR code has been written to {}",
        store.qr_code_location()
    )));

    Ok(result.with_vcard(vcard))
}
