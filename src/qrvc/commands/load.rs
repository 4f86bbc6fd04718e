use crate::codec::decode;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QrvcError, Result};
use crate::model::Record;
use crate::store::CardStore;

/// Reads and decodes the input, or starts an empty record when there is
/// none. Running silently without input is a configuration error.
pub fn run<S: CardStore>(store: &S, vcard_version: &str, silent: bool) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let Some(bytes) = store.read_input()? else {
        if silent {
            return Err(QrvcError::Config("Missing input file path".to_string()));
        }
        tracing::debug!(version = vcard_version, "No input, starting an empty vCard");
        return Ok(result.with_record(Record::new(vcard_version)));
    };

    let location = store.input_location().unwrap_or_default();
    result.add_message(CmdMessage::info(format!("Reading vCard file {}", location)));

    let record = decode(&bytes).map_err(|source| QrvcError::Decode {
        path: location,
        source,
    })?;
    Ok(result.with_record(record))
}
