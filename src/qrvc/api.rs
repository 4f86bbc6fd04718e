//! # API Facade
//!
//! `QrvcApi` is the single entry point for every qrvc operation, whatever the
//! UI. It dispatches to the command layer and returns structured
//! [`CmdResult`](commands::CmdResult) values; it never prints and never exits.
//!
//! ## Generic Over CardStore
//!
//! - Production: `QrvcApi<FileStore>`
//! - Testing: `QrvcApi<InMemoryStore>`
//!
//! ## Pipeline
//!
//! ```text
//! load_record ──► edit_record (skipped when silent) ──► publish
//! ```
//!
//! [`QrvcApi::run`] chains the steps and hands each step's messages to a
//! progress callback as soon as the step completes, so a client can show
//! "Reading vCard file" before the first question is asked.

use crate::commands;
use crate::config::AppSettings;
use crate::editor::Prompter;
use crate::error::{QrvcError, Result};
use crate::model::Record;
use crate::store::CardStore;

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

pub struct QrvcApi<S: CardStore> {
    store: S,
    settings: AppSettings,
}

impl<S: CardStore> QrvcApi<S> {
    pub fn new(store: S, settings: AppSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_record(&self) -> Result<CmdResult> {
        commands::load::run(
            &self.store,
            &self.settings.vcard_version,
            self.settings.silent,
        )
    }

    pub fn edit_record(&self, record: Record, prompter: &mut dyn Prompter) -> Result<CmdResult> {
        commands::edit::run(record, prompter)
    }

    pub fn publish(&mut self, record: &Record) -> Result<CmdResult> {
        commands::publish::run(&mut self.store, record, &self.settings.qr)
    }

    pub fn bom(&self) -> Result<CmdResult> {
        commands::bom::run()
    }

    /// Runs the whole pipeline. The prompter is only used when not silent.
    ///
    /// `progress` receives the messages of each step in order; the returned
    /// result carries all of them plus the published record.
    pub fn run(
        &mut self,
        prompter: &mut dyn Prompter,
        progress: &mut dyn FnMut(&[CmdMessage]),
    ) -> Result<CmdResult> {
        let mut messages = Vec::new();

        let mut loaded = self.load_record()?;
        progress(&loaded.messages);
        messages.append(&mut loaded.messages);
        let mut record = take_record(&mut loaded)?;

        if !self.settings.silent {
            let mut edited = self.edit_record(record, prompter)?;
            progress(&edited.messages);
            messages.append(&mut edited.messages);
            record = take_record(&mut edited)?;
        }

        let mut published = self.publish(&record)?;
        progress(&published.messages);
        messages.append(&mut published.messages);
        published.messages = messages;
        Ok(published.with_record(record))
    }
}

fn take_record(result: &mut CmdResult) -> Result<Record> {
    result
        .record
        .take()
        .ok_or_else(|| QrvcError::Config("No vCard record available".to_string()))
}
