//! The PJSekai extended chart interchange format.
//!
//! A chart in this format is a flat list of *entities*. Each entity is an
//! archetype name plus a mapping of named fields, and entities refer to
//! each other by position in the list: a note names its timescale group
//! by index, a slide connector names its head and tail notes by index,
//! and so on. The vocabulary of archetypes is closed; see
//! [`crate::level::note::NoteKind::from_archetype`] and
//! [`crate::level::connector::ConnectorKind::from_slide_archetype`] for
//! the note and slide tables.
//!
//! Deserialization of the on-disk payload is the caller's business. With
//! the `serde` feature the types here derive `Serialize`/`Deserialize`
//! so a JSON payload maps onto them directly, but this crate performs no
//! I/O itself.

use std::collections::HashMap;

pub mod indexed;

/// A field value of a raw entity: a number, or a piece of text.
///
/// The conversion only ever reads numbers; text fields are carried so a
/// chart round-trips, and a text value where a number is required is an
/// integrity error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    /// A numeric field. Beats, lanes and sizes are plain binary64; index
    /// fields hold entity positions as (possibly negative) integers.
    Number(f64),
    /// A textual field.
    Text(String),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl FieldValue {
    /// Returns the numeric value, if this field is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

/// One entity of the flat chart description.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawEntity {
    /// The declared kind of this entity, which determines how its fields
    /// are interpreted.
    pub archetype: String,
    /// The named fields of this entity.
    #[cfg_attr(feature = "serde", serde(rename = "data", default))]
    pub fields: HashMap<String, FieldValue>,
}

impl RawEntity {
    /// Creates an entity of the given archetype with no fields.
    #[must_use]
    pub fn new(archetype: impl Into<String>) -> Self {
        Self {
            archetype: archetype.into(),
            fields: HashMap::new(),
        }
    }

    /// Adds a field, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Looks up a numeric field by name. `None` when the field is absent
    /// or textual.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(FieldValue::as_number)
    }
}

/// A whole chart in the extended interchange format, as handed over by
/// the upstream parser.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtendedLevelData {
    /// Global playback offset of the backing track in seconds. Passed
    /// through to the output unchanged.
    #[cfg_attr(feature = "serde", serde(rename = "bgmOffset", default))]
    pub bgm_offset: f64,
    /// The flat entity list. Cross-references between entities are
    /// positions in this list.
    pub entities: Vec<RawEntity>,
}

impl ExtendedLevelData {
    /// Creates a chart from its parts.
    #[must_use]
    pub fn new(bgm_offset: f64, entities: Vec<RawEntity>) -> Self {
        Self {
            bgm_offset,
            entities,
        }
    }
}
