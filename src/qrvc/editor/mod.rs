//! # Interactive Edit Session
//!
//! Lets the user revise the editable fields of a [`Record`] and writes the
//! revision back only after an explicit confirmation.
//!
//! ```text
//!   Seeded ──► Presenting ──► AwaitingConfirmation ──► Committed
//!     ▲                               │
//!     └────────────── "No" ───────────┘
//!
//!   (interrupt or prompt failure in any state) ──► Cancelled
//! ```
//!
//! The session works on an [`EditBuffer`], a plain value seeded from the
//! record. Each pass presents the groups of [`FieldGroup::all`] in order and
//! produces the next buffer. Saying "No" at the confirmation starts another
//! pass pre-filled with the edits made so far. The record is touched exactly
//! once, by [`EditBuffer::commit`], when the session reaches `Committed`.
//!
//! Questions are asked through the [`Prompter`] trait, so the session knows
//! nothing about terminals.

pub mod prompt;
#[cfg(any(test, feature = "test_utils"))]
pub mod scripted;

use crate::error::{QrvcError, Result};
use crate::model::{
    Address, Gender, Name, Record, FIELD_EMAIL, FIELD_TELEPHONE, FIELD_TITLE, FIELD_URL,
    TYPE_CELL, TYPE_HOME, TYPE_WORK,
};
pub use prompt::{PromptError, Prompter};

pub const LABEL_GIVEN_NAME: &str = "Given (first) name";
pub const LABEL_ADDITIONAL_NAME: &str = "Additional (middle) name";
pub const LABEL_FAMILY_NAME: &str = "Family name";
pub const LABEL_HONORIFIC_PREFIX: &str = "Honorific prefix (e.g. Capt.)";
pub const LABEL_HONORIFIC_SUFFIX: &str = "Honorific suffix (e.g. Sr.)";
pub const LABEL_GENDER: &str = "Gender";
pub const LABEL_TITLE: &str = "Job title";
pub const LABEL_ORGANIZATION: &str = "Organization or company";
pub const LABEL_DEPARTMENT: &str = "Department";
pub const LABEL_EMAIL: &str = "Mail";
pub const LABEL_URL: &str = "Web address";
pub const LABEL_CELL_PHONE: &str = "Cell phone";
pub const LABEL_WORK_PHONE: &str = "Work phone";
pub const LABEL_HOME_PHONE: &str = "Private phone";
pub const LABEL_POST_OFFICE_BOX: &str = "Post office box";
pub const LABEL_STREET_ADDRESS: &str = "Street address";
pub const LABEL_EXTENDED_ADDRESS: &str = "Extended street address (e.g. building, floor)";
pub const LABEL_CITY: &str = "City";
pub const LABEL_POSTAL_CODE: &str = "Postal code";
pub const LABEL_COUNTRY: &str = "Country";
pub const LABEL_READY: &str = "Are you ready?";
pub const LABEL_READY_YES: &str = "Yes, print the result!";
pub const LABEL_READY_NO: &str = "No, I'm not ready.";

/// Groups of questions, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    Name,
    Gender,
    Work,
    Contact,
    Address,
    Confirmation,
}

impl FieldGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            FieldGroup::Name => "Name",
            FieldGroup::Gender => "Gender",
            FieldGroup::Work => "Work",
            FieldGroup::Contact => "Contact",
            FieldGroup::Address => "Address",
            FieldGroup::Confirmation => "Ready",
        }
    }

    /// Returns all groups in display order
    pub fn all() -> &'static [FieldGroup] {
        &[
            FieldGroup::Name,
            FieldGroup::Gender,
            FieldGroup::Work,
            FieldGroup::Contact,
            FieldGroup::Address,
            FieldGroup::Confirmation,
        ]
    }
}

/// The editable fields of a record, as plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub name: Name,
    pub gender: Gender,
    pub title: String,
    pub organization: String,
    pub department: String,
    pub email: String,
    pub url: String,
    pub cell_phone: String,
    pub work_phone: String,
    pub home_phone: String,
    pub address: Address,
}

impl EditBuffer {
    pub fn seed(record: &Record) -> Self {
        let (organization, department) = record.organization();
        Self {
            name: record.name().unwrap_or_default(),
            gender: record.gender(),
            title: record.get_typed(FIELD_TITLE, ""),
            organization,
            department,
            email: record.get_typed(FIELD_EMAIL, ""),
            url: record.get_typed(FIELD_URL, ""),
            cell_phone: record.get_typed(FIELD_TELEPHONE, TYPE_CELL),
            work_phone: record.get_typed(FIELD_TELEPHONE, TYPE_WORK),
            home_phone: record.get_typed(FIELD_TELEPHONE, TYPE_HOME),
            address: record.address().unwrap_or_default(),
        }
    }

    /// Writes every field of the buffer into `record`, empty values included.
    pub fn commit(&self, record: &mut Record) {
        record.set_name(&self.name);
        record.set_gender(self.gender);
        record.set_typed(FIELD_TITLE, "", &self.title);
        record.set_organization(&self.organization, &self.department);
        record.set_typed(FIELD_EMAIL, "", &self.email);
        record.set_typed(FIELD_URL, "", &self.url);
        record.set_typed(FIELD_TELEPHONE, TYPE_CELL, &self.cell_phone);
        record.set_typed(FIELD_TELEPHONE, TYPE_WORK, &self.work_phone);
        record.set_typed(FIELD_TELEPHONE, TYPE_HOME, &self.home_phone);
        record.set_address(&self.address);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Seeded,
    Presenting,
    AwaitingConfirmation,
    Committed,
    Cancelled,
}

#[derive(Debug)]
pub struct EditSession {
    state: SessionState,
    buffer: EditBuffer,
    passes: usize,
}

impl EditSession {
    pub fn new(record: &Record) -> Self {
        Self {
            state: SessionState::Seeded,
            buffer: EditBuffer::seed(record),
            passes: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// Number of completed passes over the field groups.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Performs one transition. Terminal states stay where they are.
    ///
    /// A prompt failure moves the session to `Cancelled` and is returned as
    /// [`QrvcError::Cancelled`] for an interrupt, [`QrvcError::Prompt`]
    /// otherwise.
    pub fn advance(&mut self, prompter: &mut dyn Prompter) -> Result<SessionState> {
        let next = match self.state {
            SessionState::Seeded => Ok(SessionState::Presenting),
            SessionState::Presenting => present(&self.buffer, prompter).map(|buffer| {
                self.buffer = buffer;
                self.passes += 1;
                SessionState::AwaitingConfirmation
            }),
            SessionState::AwaitingConfirmation => ask_ready(prompter).map(|ready| {
                if ready {
                    SessionState::Committed
                } else {
                    SessionState::Seeded
                }
            }),
            SessionState::Committed | SessionState::Cancelled => Ok(self.state),
        };

        match next {
            Ok(state) => {
                tracing::trace!(from = ?self.state, to = ?state, "Edit session transition");
                self.state = state;
                Ok(state)
            }
            Err(err) => {
                tracing::debug!(error = %err, "Edit session aborted");
                self.state = SessionState::Cancelled;
                Err(err.into())
            }
        }
    }

    /// Drives the session to a terminal state and commits on confirmation.
    pub fn run(mut self, record: &mut Record, prompter: &mut dyn Prompter) -> Result<()> {
        loop {
            match self.advance(prompter)? {
                SessionState::Committed => {
                    self.buffer.commit(record);
                    return Ok(());
                }
                SessionState::Cancelled => return Err(QrvcError::Cancelled),
                _ => {}
            }
        }
    }
}

/// Runs an edit session over `record`. On any error the record is left as it
/// was.
pub fn edit(record: &mut Record, prompter: &mut dyn Prompter) -> Result<()> {
    EditSession::new(record).run(record, prompter)
}

/// One pass over the editable groups, returning the revised buffer.
fn present(
    buffer: &EditBuffer,
    prompter: &mut dyn Prompter,
) -> std::result::Result<EditBuffer, PromptError> {
    let mut next = buffer.clone();

    prompter.begin_group(FieldGroup::Name)?;
    let name = &mut next.name;
    name.given_name = prompter.input(LABEL_GIVEN_NAME, &name.given_name)?;
    name.additional_name = prompter.input(LABEL_ADDITIONAL_NAME, &name.additional_name)?;
    name.family_name = prompter.input(LABEL_FAMILY_NAME, &name.family_name)?;
    name.honorific_prefix = prompter.input(LABEL_HONORIFIC_PREFIX, &name.honorific_prefix)?;
    name.honorific_suffix = prompter.input(LABEL_HONORIFIC_SUFFIX, &name.honorific_suffix)?;

    prompter.begin_group(FieldGroup::Gender)?;
    let genders = Gender::all();
    let labels: Vec<&str> = genders.iter().map(Gender::label).collect();
    let current = genders
        .iter()
        .position(|g| *g == next.gender)
        .unwrap_or(genders.len() - 1);
    let chosen = prompter.select(LABEL_GENDER, &labels, current)?;
    next.gender = genders.get(chosen).copied().unwrap_or_default();

    prompter.begin_group(FieldGroup::Work)?;
    next.title = prompter.input(LABEL_TITLE, &next.title)?;
    next.organization = prompter.input(LABEL_ORGANIZATION, &next.organization)?;
    next.department = prompter.input(LABEL_DEPARTMENT, &next.department)?;

    prompter.begin_group(FieldGroup::Contact)?;
    next.email = prompter.input(LABEL_EMAIL, &next.email)?;
    next.url = prompter.input(LABEL_URL, &next.url)?;
    next.cell_phone = prompter.input(LABEL_CELL_PHONE, &next.cell_phone)?;
    next.work_phone = prompter.input(LABEL_WORK_PHONE, &next.work_phone)?;
    next.home_phone = prompter.input(LABEL_HOME_PHONE, &next.home_phone)?;

    prompter.begin_group(FieldGroup::Address)?;
    let address = &mut next.address;
    address.post_office_box = prompter.input(LABEL_POST_OFFICE_BOX, &address.post_office_box)?;
    address.street_address = prompter.input(LABEL_STREET_ADDRESS, &address.street_address)?;
    address.extended_address =
        prompter.input(LABEL_EXTENDED_ADDRESS, &address.extended_address)?;
    address.locality = prompter.input(LABEL_CITY, &address.locality)?;
    address.postal_code = prompter.input(LABEL_POSTAL_CODE, &address.postal_code)?;
    address.country = prompter.input(LABEL_COUNTRY, &address.country)?;

    Ok(next)
}

fn ask_ready(prompter: &mut dyn Prompter) -> std::result::Result<bool, PromptError> {
    prompter.begin_group(FieldGroup::Confirmation)?;
    prompter.confirm(LABEL_READY, LABEL_READY_YES, LABEL_READY_NO)
}

#[cfg(test)]
mod tests {
    use super::scripted::{Answer, ScriptedPrompter};
    use super::*;
    use crate::codec::encode;
    use crate::model::FIELD_ORGANIZATION;

    const QUESTIONS_PER_PASS: usize = 21;

    fn sample_record() -> Record {
        let mut record = Record::new("3.0");
        record.set_name(&Name {
            family_name: "Doe".into(),
            given_name: "Jane".into(),
            ..Name::default()
        });
        record.set_typed(FIELD_EMAIL, "", "jane@example.com");
        record.set_typed(FIELD_TELEPHONE, TYPE_CELL, "555-1111");
        record.set_organization("ACME", "Research");
        record.set_gender(Gender::Female);
        record.push_entry("NOTE", crate::model::FieldEntry::new("untouched"));
        record
    }

    fn keep(n: usize) -> Vec<Answer> {
        vec![Answer::Keep; n]
    }

    #[test]
    fn groups_are_presented_in_order() {
        let mut record = Record::new("3.0");
        let mut prompter = ScriptedPrompter::accepting();
        edit(&mut record, &mut prompter).unwrap();
        assert_eq!(prompter.groups, FieldGroup::all());
    }

    #[test]
    fn questions_follow_group_layout() {
        let mut record = Record::new("3.0");
        let mut prompter = ScriptedPrompter::accepting();
        edit(&mut record, &mut prompter).unwrap();

        assert_eq!(prompter.labels.len(), QUESTIONS_PER_PASS);
        assert_eq!(
            &prompter.labels[..6],
            &[
                LABEL_GIVEN_NAME,
                LABEL_ADDITIONAL_NAME,
                LABEL_FAMILY_NAME,
                LABEL_HONORIFIC_PREFIX,
                LABEL_HONORIFIC_SUFFIX,
                LABEL_GENDER,
            ]
        );
        assert_eq!(prompter.labels[14], LABEL_POST_OFFICE_BOX);
        assert_eq!(prompter.labels[20], LABEL_READY);
    }

    #[test]
    fn seed_reads_editable_fields() {
        let buffer = EditBuffer::seed(&sample_record());
        assert_eq!(buffer.name.given_name, "Jane");
        assert_eq!(buffer.gender, Gender::Female);
        assert_eq!(buffer.organization, "ACME");
        assert_eq!(buffer.department, "Research");
        assert_eq!(buffer.email, "jane@example.com");
        assert_eq!(buffer.cell_phone, "555-1111");
        assert_eq!(buffer.work_phone, "");
    }

    #[test]
    fn seed_then_commit_changes_nothing_on_a_full_record() {
        let mut record = sample_record();
        for (discriminator, value) in [(TYPE_WORK, "2"), (TYPE_HOME, "3")] {
            record.set_typed(FIELD_TELEPHONE, discriminator, value);
        }
        record.set_typed(FIELD_TITLE, "", "Engineer");
        record.set_typed(FIELD_URL, "", "https://example.com");
        let before = record.clone();

        EditBuffer::seed(&record).commit(&mut record);
        assert_eq!(record, before);
    }

    #[test]
    fn commit_writes_buffer_back() {
        let mut record = sample_record();
        let mut buffer = EditBuffer::seed(&record);
        buffer.name.given_name = "given".into();
        buffer.gender = Gender::Unspecified;
        buffer.organization = "organization".into();
        buffer.department = "department".into();
        buffer.home_phone = "home phone number".into();
        buffer.address.locality = "city".into();

        buffer.commit(&mut record);

        assert_eq!(record.name().unwrap().given_name, "given");
        assert_eq!(record.gender(), Gender::Unspecified);
        assert_eq!(
            record.entries(FIELD_ORGANIZATION)[0].value,
            "organization;department"
        );
        assert_eq!(record.get_typed(FIELD_TELEPHONE, TYPE_CELL), "555-1111");
        assert_eq!(
            record.get_typed(FIELD_TELEPHONE, TYPE_HOME),
            "home phone number"
        );
        assert_eq!(record.address().unwrap().locality, "city");
        assert_eq!(record.get_typed("NOTE", ""), "untouched");
    }

    #[test]
    fn commit_keeps_address_region() {
        let mut record = Record::new("3.0");
        record.set_address(&Address {
            region: "IL".into(),
            ..Address::default()
        });
        let mut buffer = EditBuffer::seed(&record);
        buffer.address.locality = "Springfield".into();
        buffer.commit(&mut record);

        let address = record.address().unwrap();
        assert_eq!(address.region, "IL");
        assert_eq!(address.locality, "Springfield");
    }

    #[test]
    fn edits_reach_the_record() {
        let mut record = sample_record();
        let mut answers = vec![Answer::text("Ann")];
        answers.extend(keep(4));
        answers.push(Answer::Choice(0));
        answers.push(Answer::text("CTO"));
        answers.extend(keep(4));
        answers.push(Answer::text("555-9999"));
        let mut prompter = ScriptedPrompter::new(answers);

        edit(&mut record, &mut prompter).unwrap();

        assert_eq!(record.name().unwrap().given_name, "Ann");
        assert_eq!(record.name().unwrap().family_name, "Doe");
        assert_eq!(record.gender(), Gender::Male);
        assert_eq!(record.get_typed(FIELD_TITLE, ""), "CTO");
        assert_eq!(record.get_typed(FIELD_TELEPHONE, TYPE_CELL), "555-9999");
    }

    #[test]
    fn second_pass_starts_from_previous_edits() {
        let mut record = Record::new("3.0");
        let mut answers = vec![Answer::text("Ann")];
        answers.extend(keep(QUESTIONS_PER_PASS - 2));
        answers.push(Answer::Confirm(false));
        answers.extend(keep(2));
        answers.push(Answer::text("Smith"));
        let mut prompter = ScriptedPrompter::new(answers);

        edit(&mut record, &mut prompter).unwrap();

        let name = record.name().unwrap();
        assert_eq!(name.given_name, "Ann");
        assert_eq!(name.family_name, "Smith");
        assert_eq!(prompter.labels.len(), 2 * QUESTIONS_PER_PASS);
        assert_eq!(prompter.groups.len(), 2 * FieldGroup::all().len());
    }

    #[test]
    fn interrupt_leaves_record_unchanged() {
        let mut record = sample_record();
        let before = record.clone();
        let mut prompter =
            ScriptedPrompter::new([Answer::text("Ann"), Answer::text("B"), Answer::Interrupt]);

        let err = edit(&mut record, &mut prompter).unwrap_err();

        assert!(matches!(err, QrvcError::Cancelled));
        assert_eq!(record, before);
    }

    #[test]
    fn interrupt_at_confirmation_after_a_rejected_pass() {
        let mut record = sample_record();
        let before = record.clone();
        let mut answers = vec![Answer::text("Ann")];
        answers.extend(keep(QUESTIONS_PER_PASS - 2));
        answers.push(Answer::Confirm(false));
        answers.extend(keep(QUESTIONS_PER_PASS - 1));
        answers.push(Answer::Interrupt);
        let mut prompter = ScriptedPrompter::new(answers);

        assert!(matches!(
            edit(&mut record, &mut prompter),
            Err(QrvcError::Cancelled)
        ));
        assert_eq!(record, before);
    }

    #[test]
    fn prompt_failure_aborts_without_commit() {
        let mut record = sample_record();
        let before = record.clone();
        let mut prompter = ScriptedPrompter::new([Answer::Fail("not a terminal".into())]);

        let err = edit(&mut record, &mut prompter).unwrap_err();

        match err {
            QrvcError::Prompt(message) => assert_eq!(message, "not a terminal"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(record, before);
    }

    #[test]
    fn session_walks_through_states() {
        let record = Record::new("3.0");
        let mut session = EditSession::new(&record);
        let mut prompter = ScriptedPrompter::accepting();

        assert_eq!(session.state(), SessionState::Seeded);
        assert_eq!(session.advance(&mut prompter).unwrap(), SessionState::Presenting);
        assert!(prompter.labels.is_empty());
        assert_eq!(
            session.advance(&mut prompter).unwrap(),
            SessionState::AwaitingConfirmation
        );
        assert_eq!(session.passes(), 1);
        assert_eq!(session.advance(&mut prompter).unwrap(), SessionState::Committed);
        assert_eq!(session.advance(&mut prompter).unwrap(), SessionState::Committed);
    }

    #[test]
    fn rejection_returns_to_seeded_with_buffer() {
        let record = Record::new("3.0");
        let mut session = EditSession::new(&record);
        let mut answers = vec![Answer::text("Ann")];
        answers.extend(keep(QUESTIONS_PER_PASS - 2));
        answers.push(Answer::Confirm(false));
        let mut prompter = ScriptedPrompter::new(answers);

        session.advance(&mut prompter).unwrap();
        session.advance(&mut prompter).unwrap();
        assert_eq!(session.advance(&mut prompter).unwrap(), SessionState::Seeded);
        assert_eq!(session.buffer().name.given_name, "Ann");
    }

    #[test]
    fn cancelled_session_stays_cancelled() {
        let record = Record::new("3.0");
        let mut session = EditSession::new(&record);
        let mut prompter = ScriptedPrompter::new([Answer::Interrupt]);

        session.advance(&mut prompter).unwrap();
        assert!(session.advance(&mut prompter).is_err());
        assert_eq!(session.state(), SessionState::Cancelled);
        assert_eq!(session.advance(&mut prompter).unwrap(), SessionState::Cancelled);
    }

    #[test]
    fn gender_defaults_to_current_value() {
        let mut record = sample_record();
        let mut prompter = ScriptedPrompter::accepting();
        edit(&mut record, &mut prompter).unwrap();
        assert_eq!(record.gender(), Gender::Female);
    }

    #[test]
    fn accepted_empty_session_fills_edited_fields() {
        let mut record = Record::new("3.0");
        let mut prompter = ScriptedPrompter::accepting();
        edit(&mut record, &mut prompter).unwrap();

        let text = String::from_utf8(encode(&record).unwrap()).unwrap();
        assert_eq!(
            text,
            "BEGIN:VCARD\r\nVERSION:3.0\r\nADR:;;;;;;\r\nEMAIL:\r\nN:;;;;\r\nORG:;\r\n\
             TEL;TYPE=cell:\r\nTEL;TYPE=work:\r\nTEL;TYPE=home:\r\nTITLE:\r\nURL:\r\nEND:VCARD\r\n"
        );
    }
}
