//! Converter from the PJSekai extended chart format into engine level data.
//!
//! The extended format describes a chart as a flat list of loosely-typed
//! entities: each carries an archetype name and a mapping of named fields,
//! and entities refer to each other by position in that list. This crate
//! turns such a list into a strongly-typed, cross-referenced timeline of
//! gameplay entities that a rendering/simulation engine can consume
//! directly.
//!
//! The conversion runs in one deterministic pass:
//!
//! - `extended` defines the interchange schema and an indexed view over
//!   the raw entity list.
//! - `level` defines the output model: a closed [`level::Entity`]
//!   enumeration stored in one ordered list, with [`level::EntityRef`]
//!   handles linking notes, connectors, sim-lines and timescale chains.
//! - `convert` performs the conversion itself: BPM markers, timescale
//!   chain reconstruction, note and slide-connector assembly, guide
//!   building with control-point anchor deduplication, then a final
//!   beat-ordered placement and slide linking pass.
//!
//! In detail, our policies are:
//!
//! - Assume a well-formed chart from a trusted upstream parser: a broken
//!   cross-reference aborts the whole conversion with a
//!   [`convert::ConvertError`], never a partial output.
//! - Resolve documented field defaults silently; they are not errors.
//! - Do not parse chart files; the interchange schema is (de)serializable
//!   with the `serde` feature, but I/O belongs to the caller.

pub mod convert;
pub mod extended;
pub mod level;
pub mod prelude;
