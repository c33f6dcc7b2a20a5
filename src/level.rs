//! The engine-native level model produced by conversion.
//!
//! A level is one ordered entity list. The [`Initialization`] entity is
//! always first; everything else is placed in non-decreasing beat order,
//! with beat-less entities (groups, connectors, sim-lines) treated as
//! beat −1. Entities reference each other through [`EntityRef`] handles
//! that index this final list.
//!
//! [`Initialization`]: Entity::Initialization

use self::{
    connector::{Connector, SimLine},
    fin_f64::FinF64,
    note::Note,
    timescale::{TimescaleChange, TimescaleGroup},
};

pub mod connector;
pub mod ease;
pub mod fin_f64;
pub mod note;
pub mod timescale;

/// A non-owning handle to an entity in a [`LevelData`] list.
///
/// Refs are late-bound: builders hand them out before the final order is
/// known, and the conversion rewrites every stored ref when entities are
/// placed, so a published ref always indexes [`LevelData::entities`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityRef(pub(crate) usize);

impl EntityRef {
    /// Position of the referenced entity in the owning list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A tempo change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BpmChange {
    /// Beat the tempo changes at.
    pub beat: FinF64,
    /// The tempo from this beat on, in beats per minute.
    pub bpm: FinF64,
}

/// One entity of the output timeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Entity {
    /// The engine bootstrap marker, always first in the list.
    Initialization,
    /// A tempo change.
    BpmChange(BpmChange),
    /// A timescale group header.
    TimescaleGroup(TimescaleGroup),
    /// One element of a timescale chain.
    TimescaleChange(TimescaleChange),
    /// A note, including guide anchors.
    Note(Note),
    /// A slide body or a guide.
    Connector(Connector),
    /// A simultaneity line.
    SimLine(SimLine),
}

impl Entity {
    /// Beat position of this entity, when it has one. Groups, connectors
    /// and sim-lines are placed by their references, not by a beat.
    #[must_use]
    pub const fn beat(&self) -> Option<FinF64> {
        match self {
            Self::BpmChange(bpm_change) => Some(bpm_change.beat),
            Self::TimescaleChange(change) => Some(change.beat),
            Self::Note(note) => Some(note.beat),
            Self::Initialization
            | Self::TimescaleGroup(_)
            | Self::Connector(_)
            | Self::SimLine(_) => None,
        }
    }

    /// This entity as a note, if it is one.
    #[must_use]
    pub const fn as_note(&self) -> Option<&Note> {
        match self {
            Self::Note(note) => Some(note),
            _ => None,
        }
    }

    /// This entity as a connector, if it is one.
    #[must_use]
    pub const fn as_connector(&self) -> Option<&Connector> {
        match self {
            Self::Connector(connector) => Some(connector),
            _ => None,
        }
    }

    /// Applies `rewrite` to every [`EntityRef`] stored in this entity.
    pub(crate) fn for_each_ref_mut<F: FnMut(&mut EntityRef)>(&mut self, mut rewrite: F) {
        match self {
            Self::Initialization | Self::BpmChange(_) => {}
            Self::TimescaleGroup(group) => {
                if let Some(first) = group.first.as_mut() {
                    rewrite(first);
                }
            }
            Self::TimescaleChange(change) => {
                rewrite(&mut change.group);
                if let Some(next) = change.next.as_mut() {
                    rewrite(next);
                }
            }
            Self::Note(note) => {
                for slot in [
                    &mut note.timescale_group,
                    &mut note.attach_head,
                    &mut note.attach_tail,
                    &mut note.active_head,
                    &mut note.next,
                ] {
                    if let Some(entity_ref) = slot.as_mut() {
                        rewrite(entity_ref);
                    }
                }
            }
            Self::Connector(connector) => {
                rewrite(&mut connector.head);
                rewrite(&mut connector.tail);
                rewrite(&mut connector.segment_head);
                rewrite(&mut connector.segment_tail);
                for slot in [&mut connector.active_head, &mut connector.active_tail] {
                    if let Some(entity_ref) = slot.as_mut() {
                        rewrite(entity_ref);
                    }
                }
            }
            Self::SimLine(sim_line) => {
                rewrite(&mut sim_line.left);
                rewrite(&mut sim_line.right);
            }
        }
    }
}

/// A converted level: the pass-through playback offset plus the ordered,
/// cross-referenced entity list, handed to the consuming engine as one
/// immutable snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelData {
    /// Global playback offset of the backing track in seconds, identical
    /// to the input value.
    pub bgm_offset: f64,
    /// The ordered entity list.
    pub entities: Vec<Entity>,
}

impl LevelData {
    /// Resolves a reference against this list.
    #[must_use]
    pub fn get(&self, entity_ref: EntityRef) -> Option<&Entity> {
        self.entities.get(entity_ref.index())
    }

    /// Resolves a reference expected to point at a note.
    #[must_use]
    pub fn note(&self, entity_ref: EntityRef) -> Option<&Note> {
        self.get(entity_ref).and_then(Entity::as_note)
    }
}
