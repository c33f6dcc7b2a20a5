//! Conversion from [`ExtendedLevelData`] into [`LevelData`].
//!
//! The conversion is a single deterministic pass with a fixed builder
//! order: BPM markers, timescale chains, notes with their slide
//! connectors and sim-lines, then guides. Later builders resolve
//! references against maps filled by earlier ones, so every
//! cross-reference lands on an already-constructed entity. The assembled
//! arena is then placed in beat order (with the initialization entity
//! pinned first), every stored reference is rewritten to the final
//! positions, and a last pass links each connector head note forward to
//! the connector tail.
//!
//! A malformed chart (a dangling index, a missing required field, a
//! code outside one of the fixed tables) aborts the conversion with a
//! [`ConvertError`]; there is no partial output. Conditions worth
//! surfacing that do not change the result are collected as
//! [`ConvertWarning`]s on the [`ConvertOutput`].

use itertools::Itertools;
use thiserror::Error;

use crate::{
    extended::{ExtendedLevelData, FieldValue, RawEntity, indexed::IndexedEntities},
    level::{Entity, EntityRef, LevelData, fin_f64::FinF64},
};

use self::arena::Arena;

mod arena;
mod bpm;
mod guide;
mod note;
mod timescale;

/// An integrity error that aborts the whole conversion.
///
/// The converter assumes a well-formed chart from a trusted upstream
/// parser; none of these are user-recoverable, and a conversion that
/// returns one has produced no output.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// A required field was absent.
    #[error("required field `{field}` is missing on `{archetype}`")]
    MissingField {
        /// Archetype of the offending entity.
        archetype: String,
        /// The missing field name.
        field: &'static str,
    },
    /// A field that must be numeric held text.
    #[error("field `{field}` on `{archetype}` must be numeric")]
    NonNumericField {
        /// Archetype of the offending entity.
        archetype: String,
        /// The offending field name.
        field: &'static str,
    },
    /// A numeric field held NaN or an infinity.
    #[error("field `{field}` on `{archetype}` must be finite, got {value}")]
    NonFiniteField {
        /// Archetype of the offending entity.
        archetype: String,
        /// The offending field name.
        field: &'static str,
        /// The non-finite value.
        value: f64,
    },
    /// A `first`/`next` chain index fell outside the entity list.
    #[error("entity index {0} is out of bounds")]
    EntityIndexOutOfBounds(i64),
    /// An index that must name a note named something else.
    #[error("index {0} does not refer to a note")]
    UnresolvedNote(i64),
    /// An index that must name a slide connector named something else.
    #[error("index {0} does not refer to a slide connector")]
    UnresolvedConnector(i64),
    /// A timescale chain revisited an entity and would never terminate.
    #[error("timescale chain of group at entity {0} does not terminate")]
    TimescaleChainCycle(usize),
    /// A flick direction code outside {-1, 0, 1}.
    #[error("direction code {0} is not one of -1, 0, 1")]
    InvalidDirection(i64),
    /// An ease code outside -2..=2.
    #[error("ease code {0} is not in -2..=2")]
    InvalidEase(i64),
    /// A guide fade code outside {0, 1, 2}.
    #[error("fade code {0} is not one of 0, 1, 2")]
    InvalidFade(i64),
    /// A guide color code outside 0..=7.
    #[error("guide color code {0} is not in 0..=7")]
    InvalidColor(i64),
}

/// A condition worth reporting that did not change the conversion result.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ConvertWarning {
    /// Two guides declared control points at the same position but with
    /// attributes that cannot merge; a separate anchor entity was
    /// created for the later guide.
    #[error("guides disagree at a shared control point on beat {beat}; keeping separate anchors")]
    ConflictingGuideAnchor {
        /// Beat of the contested control point.
        beat: FinF64,
    },
}

pub(crate) type Result<T> = core::result::Result<T, ConvertError>;

/// Output of a successful conversion.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct ConvertOutput {
    /// The converted level.
    pub level_data: LevelData,
    /// Warnings collected along the way.
    pub warnings: Vec<ConvertWarning>,
}

/// Sort position of entities that have no beat of their own.
const UNTIMED_BEAT: FinF64 = FinF64::new_unchecked(-1.0);

impl LevelData {
    /// Converts a chart in the extended interchange format into engine
    /// level data.
    ///
    /// # Example
    ///
    /// ```
    /// use sekai_rs::prelude::*;
    ///
    /// let chart = ExtendedLevelData::new(
    ///     0.0,
    ///     vec![
    ///         RawEntity::new("#BPM_CHANGE")
    ///             .with("#BEAT", 0.0)
    ///             .with("#BPM", 120.0),
    ///     ],
    /// );
    /// let ConvertOutput { level_data, warnings } = LevelData::from_extended(&chart)?;
    /// assert_eq!(level_data.entities.len(), 2);
    /// assert!(warnings.is_empty());
    /// # Ok::<(), ConvertError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`ConvertError`] when the chart violates the interchange
    /// contract; see the error variants for the exact conditions. The
    /// conversion is all-or-nothing.
    pub fn from_extended(data: &ExtendedLevelData) -> core::result::Result<ConvertOutput, ConvertError> {
        let store = IndexedEntities::new(&data.entities);
        let mut arena = Arena::new();
        let mut warnings = Vec::new();

        arena.push(Entity::Initialization);
        bpm::build_bpm_changes(&store, &mut arena)?;
        let groups = timescale::build_timescale_groups(&store, &mut arena)?;
        note::build_notes(&store, &mut arena, &groups)?;
        guide::build_guides(&store, &mut arena, &groups, &mut warnings)?;

        let mut entities = place_by_beat(arena.into_entities());
        link_slide_heads(&mut entities);

        Ok(ConvertOutput {
            level_data: Self {
                bgm_offset: data.bgm_offset,
                entities,
            },
            warnings,
        })
    }
}

impl TryFrom<ExtendedLevelData> for LevelData {
    type Error = ConvertError;

    /// [`LevelData::from_extended`], discarding the warnings.
    fn try_from(value: ExtendedLevelData) -> core::result::Result<Self, Self::Error> {
        Self::from_extended(&value).map(|output| output.level_data)
    }
}

/// Stable-sorts the arena into final order and rewrites every stored
/// reference accordingly. The initialization entity is pinned to
/// position 0 regardless of the beat comparator.
fn place_by_beat(entities: Vec<Entity>) -> Vec<Entity> {
    fn sort_key(entity: &Entity) -> (bool, FinF64) {
        (
            !matches!(entity, Entity::Initialization),
            entity.beat().unwrap_or(UNTIMED_BEAT),
        )
    }

    let order: Vec<usize> = (0..entities.len())
        .sorted_by(|&a, &b| sort_key(&entities[a]).cmp(&sort_key(&entities[b])))
        .collect();
    let mut final_position = vec![0_usize; entities.len()];
    for (position, &arena_index) in order.iter().enumerate() {
        final_position[arena_index] = position;
    }

    let mut slots: Vec<Option<Entity>> = entities.into_iter().map(Some).collect();
    let mut placed = Vec::with_capacity(slots.len());
    for &arena_index in &order {
        let mut entity = slots[arena_index]
            .take()
            .expect("placement order visits each arena slot once");
        entity.for_each_ref_mut(|entity_ref| *entity_ref = EntityRef(final_position[entity_ref.0]));
        placed.push(entity);
    }
    placed
}

/// Points every connector head note at the connector tail. Applies
/// uniformly to slide and guide connectors, overwriting any earlier
/// assignment, so the last connector heading a note wins.
fn link_slide_heads(entities: &mut [Entity]) {
    let links: Vec<(usize, EntityRef)> = entities
        .iter()
        .filter_map(|entity| {
            entity
                .as_connector()
                .map(|connector| (connector.head.index(), connector.tail))
        })
        .collect();
    for (head_index, tail) in links {
        if let Some(Entity::Note(head)) = entities.get_mut(head_index) {
            head.next = Some(tail);
        }
    }
}

/// Reads a required numeric field.
pub(crate) fn require_number(entity: &RawEntity, field: &'static str) -> Result<f64> {
    match entity.field(field) {
        Some(FieldValue::Number(value)) => Ok(*value),
        Some(FieldValue::Text(_)) => Err(ConvertError::NonNumericField {
            archetype: entity.archetype.clone(),
            field,
        }),
        None => Err(ConvertError::MissingField {
            archetype: entity.archetype.clone(),
            field,
        }),
    }
}

/// Reads a required numeric field that must also be finite.
pub(crate) fn require_finite(entity: &RawEntity, field: &'static str) -> Result<FinF64> {
    let value = require_number(entity, field)?;
    FinF64::new(value).ok_or(ConvertError::NonFiniteField {
        archetype: entity.archetype.clone(),
        field,
        value,
    })
}

/// Reads an optional numeric field that must be finite when present.
pub(crate) fn finite_or(entity: &RawEntity, field: &'static str, default: f64) -> Result<FinF64> {
    if entity.field(field).is_none() {
        return Ok(FinF64::new_unchecked(default));
    }
    require_finite(entity, field)
}

/// Reads a required index/code field, truncating toward zero.
pub(crate) fn require_int(entity: &RawEntity, field: &'static str) -> Result<i64> {
    require_number(entity, field).map(|value| value as i64)
}

/// Reads an optional index/code field, truncating toward zero.
pub(crate) fn int_or(entity: &RawEntity, field: &'static str, default: i64) -> Result<i64> {
    if entity.field(field).is_none() {
        return Ok(default);
    }
    require_int(entity, field)
}
