//! Prelude module for the crate.
//!
//! Re-exports the whole public surface for convenient access. You can
//! use `use sekai_rs::prelude::*;` to import everything at once.

// Conversion entry points and diagnostics
pub use crate::convert::{ConvertError, ConvertOutput, ConvertWarning};

// Input interchange schema
pub use crate::extended::{ExtendedLevelData, FieldValue, RawEntity, indexed::IndexedEntities};

// Output level model
pub use crate::level::{
    BpmChange, Entity, EntityRef, LevelData,
    connector::{Connector, ConnectorKind, SimLine},
    ease::EaseType,
    fin_f64::{FinF64, TryFromFloatError},
    note::{FlickDirection, Note, NoteKind},
    timescale::{TimescaleChange, TimescaleEase, TimescaleGroup},
};
