//! The build arena entities are assembled into before final placement.

use crate::level::{
    Entity, EntityRef,
    note::Note,
    timescale::{TimescaleChange, TimescaleGroup},
};

/// Append-only entity storage. Refs handed out by [`Arena::push`] stay
/// valid for the whole build; the orchestrator rewrites them when it
/// computes the final order.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    entities: Vec<Entity>,
}

impl Arena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends an entity and returns its handle.
    pub(crate) fn push(&mut self, entity: Entity) -> EntityRef {
        let entity_ref = EntityRef(self.entities.len());
        self.entities.push(entity);
        entity_ref
    }

    /// Mutable access to a note pushed earlier. The ref must have been
    /// handed out for a note entity.
    pub(crate) fn note_mut(&mut self, entity_ref: EntityRef) -> &mut Note {
        match self.entities.get_mut(entity_ref.0) {
            Some(Entity::Note(note)) => note,
            _ => unreachable!("arena ref of a note points at a note"),
        }
    }

    /// Mutable access to a timescale group pushed earlier.
    pub(crate) fn timescale_group_mut(&mut self, entity_ref: EntityRef) -> &mut TimescaleGroup {
        match self.entities.get_mut(entity_ref.0) {
            Some(Entity::TimescaleGroup(group)) => group,
            _ => unreachable!("arena ref of a timescale group points at a timescale group"),
        }
    }

    /// Mutable access to a timescale change pushed earlier.
    pub(crate) fn timescale_change_mut(&mut self, entity_ref: EntityRef) -> &mut TimescaleChange {
        match self.entities.get_mut(entity_ref.0) {
            Some(Entity::TimescaleChange(change)) => change,
            _ => unreachable!("arena ref of a timescale change points at a timescale change"),
        }
    }

    /// Hands the assembled entities to the orchestrator.
    pub(crate) fn into_entities(self) -> Vec<Entity> {
        self.entities
    }
}
