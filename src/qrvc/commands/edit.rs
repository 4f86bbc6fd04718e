use crate::commands::CmdResult;
use crate::editor::{self, Prompter};
use crate::error::Result;
use crate::model::Record;

/// Runs an interactive edit session and hands back the confirmed record.
pub fn run(mut record: Record, prompter: &mut dyn Prompter) -> Result<CmdResult> {
    editor::edit(&mut record, prompter)?;
    Ok(CmdResult::default().with_record(record))
}
