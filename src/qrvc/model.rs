//! # Record Model
//!
//! A [`Record`] is the in-memory form of one vCard: a map from upper-case
//! property name to the [`FieldEntry`] values carrying that name.
//!
//! Values are kept in their escaped wire form so that fields this tool never
//! touches are written back byte-for-byte. The typed accessors on `Record`
//! unescape on the way out and escape on the way in.
//!
//! ## Discriminators
//!
//! Fields such as `TEL` appear several times and are told apart by their
//! `TYPE` tags (`CELL`, `WORK`, `HOME`). Tags are stored upper case and
//! compared case-insensitively. Within one field a tag identifies at most one
//! entry: [`Record::set_typed`] overwrites the first entry listing the tag
//! and only appends when none does.
//!
//! ## Structured fields
//!
//! `N` and `ADR` are treated as singular and are always present after
//! [`Record::ensure_defaults`]. `ORG` holds organization and department
//! joined by exactly one unescaped `;`. `GENDER` holds a one-letter code.

use crate::codec::escape::{
    escape_text, escape_text_keep_separators, split_components, split_first_component,
    unescape_text,
};
use std::collections::BTreeMap;

pub const FIELD_VERSION: &str = "VERSION";
pub const FIELD_NAME: &str = "N";
pub const FIELD_ADDRESS: &str = "ADR";
pub const FIELD_ORGANIZATION: &str = "ORG";
pub const FIELD_TELEPHONE: &str = "TEL";
pub const FIELD_EMAIL: &str = "EMAIL";
pub const FIELD_URL: &str = "URL";
pub const FIELD_TITLE: &str = "TITLE";
pub const FIELD_GENDER: &str = "GENDER";

pub const TYPE_CELL: &str = "CELL";
pub const TYPE_WORK: &str = "WORK";
pub const TYPE_HOME: &str = "HOME";

pub const DEFAULT_VCARD_VERSION: &str = "3.0";

/// One occurrence of a property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldEntry {
    /// Escaped wire value.
    pub value: String,
    /// `TYPE` tags, upper case, in the order they were given.
    pub types: Vec<String>,
    /// All other parameters keyed by upper-case name.
    pub params: BTreeMap<String, Vec<String>>,
    /// Property group, e.g. `item1` in `item1.TEL`.
    pub group: Option<String>,
}

impl FieldEntry {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Adds the tags of `discriminator`, skipping ones already present.
    pub fn with_type(mut self, discriminator: &str) -> Self {
        for tag in type_tags(discriminator) {
            if !self.has_tags(std::slice::from_ref(&tag)) {
                self.types.push(tag);
            }
        }
        self
    }

    /// True when every tag of `discriminator` appears in the tag list.
    pub fn has_type(&self, discriminator: &str) -> bool {
        self.has_tags(&type_tags(discriminator))
    }

    fn has_tags(&self, tags: &[String]) -> bool {
        !tags.is_empty()
            && tags
                .iter()
                .all(|tag| self.types.iter().any(|t| t.eq_ignore_ascii_case(tag)))
    }
}

/// Normalizes a single tag: trimmed, upper case, no control characters.
pub fn normalize_type(tag: &str) -> String {
    tag.trim()
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Splits a discriminator into normalized tags.
///
/// `"work, voice"` yields `WORK` and `VOICE`. Blank pieces are dropped and
/// repeated tags kept once, so a blank discriminator yields no tags.
pub fn type_tags(discriminator: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in discriminator.split(',').map(normalize_type) {
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Name {
    pub family_name: String,
    pub given_name: String,
    pub additional_name: String,
    pub honorific_prefix: String,
    pub honorific_suffix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub post_office_box: String,
    pub extended_address: String,
    pub street_address: String,
    pub locality: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unspecified,
}

impl Gender {
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Gender::Male => Some("M"),
            Gender::Female => Some("F"),
            Gender::Other => Some("O"),
            Gender::Unspecified => None,
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "M" => Gender::Male,
            "F" => Gender::Female,
            "O" => Gender::Other,
            _ => Gender::Unspecified,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::Unspecified => "Unspecified",
        }
    }

    /// All choices in presentation order.
    pub fn all() -> &'static [Gender] {
        &[
            Gender::Male,
            Gender::Female,
            Gender::Other,
            Gender::Unspecified,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, Vec<FieldEntry>>,
}

impl Record {
    /// Creates a record holding only `VERSION` and empty name and address.
    pub fn new(version: &str) -> Self {
        let mut record = Self::default();
        record.set_typed(FIELD_VERSION, "", version);
        record.ensure_defaults();
        record
    }

    pub fn version(&self) -> String {
        self.get_typed(FIELD_VERSION, "")
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[FieldEntry])> {
        self.fields
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    pub fn entries(&self, field: &str) -> &[FieldEntry] {
        self.fields
            .get(&field.to_ascii_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, field: &str) -> bool {
        !self.entries(field).is_empty()
    }

    /// Appends an entry as is. Used by the decoder.
    pub fn push_entry(&mut self, field: &str, entry: FieldEntry) {
        self.fields
            .entry(field.to_ascii_uppercase())
            .or_default()
            .push(entry);
    }

    pub fn remove(&mut self, field: &str) -> Vec<FieldEntry> {
        self.fields
            .remove(&field.to_ascii_uppercase())
            .unwrap_or_default()
    }

    /// Returns the unescaped value of a field.
    ///
    /// With a blank `discriminator` this is the first entry's value,
    /// otherwise the value of the first entry whose tags include all of its
    /// tags (see [`type_tags`]).
    /// Absence yields an empty string.
    pub fn get_typed(&self, field: &str, discriminator: &str) -> String {
        self.raw_typed(field, discriminator)
            .map(unescape_text)
            .unwrap_or_default()
    }

    /// Sets the value of a field.
    ///
    /// With a blank `discriminator` the field is reduced to a single entry
    /// holding `value`. Otherwise the first entry tagged with the
    /// discriminator is overwritten in place, keeping its other tags, or a
    /// new entry carrying just that tag is appended.
    pub fn set_typed(&mut self, field: &str, discriminator: &str, value: &str) {
        self.set_raw_typed(field, discriminator, escape_text(value));
    }

    /// Inserts empty `N` and `ADR` fields when they are missing.
    pub fn ensure_defaults(&mut self) {
        if !self.contains(FIELD_NAME) {
            self.set_name(&Name::default());
        }
        if !self.contains(FIELD_ADDRESS) {
            self.set_address(&Address::default());
        }
    }

    pub fn name(&self) -> Option<Name> {
        let raw = self.raw_typed(FIELD_NAME, "")?;
        let [family_name, given_name, additional_name, honorific_prefix, honorific_suffix] =
            components::<5>(raw);
        Some(Name {
            family_name,
            given_name,
            additional_name,
            honorific_prefix,
            honorific_suffix,
        })
    }

    pub fn set_name(&mut self, name: &Name) {
        let raw = join_components(&[
            &name.family_name,
            &name.given_name,
            &name.additional_name,
            &name.honorific_prefix,
            &name.honorific_suffix,
        ]);
        self.set_raw_typed(FIELD_NAME, "", raw);
    }

    pub fn address(&self) -> Option<Address> {
        let raw = self.raw_typed(FIELD_ADDRESS, "")?;
        let [post_office_box, extended_address, street_address, locality, region, postal_code, country] =
            components::<7>(raw);
        Some(Address {
            post_office_box,
            extended_address,
            street_address,
            locality,
            region,
            postal_code,
            country,
        })
    }

    pub fn set_address(&mut self, address: &Address) {
        let raw = join_components(&[
            &address.post_office_box,
            &address.extended_address,
            &address.street_address,
            &address.locality,
            &address.region,
            &address.postal_code,
            &address.country,
        ]);
        self.set_raw_typed(FIELD_ADDRESS, "", raw);
    }

    /// Returns `(organization, department)`.
    pub fn organization(&self) -> (String, String) {
        let Some(raw) = self.raw_typed(FIELD_ORGANIZATION, "") else {
            return (String::new(), String::new());
        };
        match split_first_component(raw) {
            Some((organization, department)) => {
                (unescape_text(organization), unescape_text(department))
            }
            None => (unescape_text(raw), String::new()),
        }
    }

    pub fn set_organization(&mut self, organization: &str, department: &str) {
        let raw = format!(
            "{};{}",
            escape_text(organization),
            escape_text_keep_separators(department)
        );
        self.set_raw_typed(FIELD_ORGANIZATION, "", raw);
    }

    pub fn gender(&self) -> Gender {
        match self.raw_typed(FIELD_GENDER, "") {
            Some(raw) => {
                let sex = split_first_component(raw).map_or(raw, |(sex, _)| sex);
                Gender::from_code(sex)
            }
            None => Gender::Unspecified,
        }
    }

    /// Writes the gender code. An unchanged gender keeps the existing entry,
    /// identity text included; switching to `Unspecified` removes the field.
    pub fn set_gender(&mut self, gender: Gender) {
        if self.gender() == gender {
            return;
        }
        match gender.code() {
            Some(code) => self.set_raw_typed(FIELD_GENDER, "", code.to_string()),
            None => {
                self.remove(FIELD_GENDER);
            }
        }
    }

    fn raw_typed(&self, field: &str, discriminator: &str) -> Option<&str> {
        let entries = self.entries(field);
        let tags = type_tags(discriminator);
        let entry = if tags.is_empty() {
            entries.first()
        } else {
            entries.iter().find(|e| e.has_tags(&tags))
        };
        entry.map(|e| e.value.as_str())
    }

    fn set_raw_typed(&mut self, field: &str, discriminator: &str, raw: String) {
        let entries = self.fields.entry(field.to_ascii_uppercase()).or_default();
        let tags = type_tags(discriminator);

        if tags.is_empty() {
            entries.truncate(1);
            match entries.first_mut() {
                Some(entry) => entry.value = raw,
                None => entries.push(FieldEntry::new(raw)),
            }
            return;
        }

        match entries.iter_mut().find(|e| e.has_tags(&tags)) {
            Some(entry) => entry.value = raw,
            None => {
                let mut entry = FieldEntry::new(raw);
                entry.types = tags;
                entries.push(entry);
            }
        }
    }
}

/// Splits a raw structured value into exactly `N` unescaped components.
fn components<const N: usize>(raw: &str) -> [String; N] {
    let parts = split_components(raw);
    std::array::from_fn(|i| parts.get(i).map(|p| unescape_text(p)).unwrap_or_default())
}

fn join_components(parts: &[&String]) -> String {
    parts
        .iter()
        .map(|p| escape_text(p))
        .collect::<Vec<_>>()
        .join(";")
}
