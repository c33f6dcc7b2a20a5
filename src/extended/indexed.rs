//! Indexed views over a flat entity list.

use std::collections::HashMap;

use crate::level::{connector::ConnectorKind, note::NoteKind};

use super::RawEntity;

/// An index over a raw entity list, built in one pass.
///
/// Keeps the original positions of all entities (cross-references in the
/// chart are positions in the raw list), groups them by archetype name,
/// and precomputes the two views the conversion iterates most: entities
/// whose archetype is a note role, and entities whose archetype is an
/// active (slide) connector. Guides are passive connectors and are not
/// part of the latter.
#[derive(Debug, Clone)]
pub struct IndexedEntities<'a> {
    all: &'a [RawEntity],
    by_archetype: HashMap<&'a str, Vec<usize>>,
    notes: Vec<(usize, NoteKind)>,
    active_connectors: Vec<(usize, ConnectorKind)>,
}

impl<'a> IndexedEntities<'a> {
    /// Builds the index. An archetype that never occurs simply yields
    /// empty views; this cannot fail.
    #[must_use]
    pub fn new(entities: &'a [RawEntity]) -> Self {
        let mut by_archetype: HashMap<&'a str, Vec<usize>> = HashMap::new();
        let mut notes = Vec::new();
        let mut active_connectors = Vec::new();
        for (index, entity) in entities.iter().enumerate() {
            by_archetype
                .entry(entity.archetype.as_str())
                .or_default()
                .push(index);
            if let Some(kind) = NoteKind::from_archetype(&entity.archetype) {
                notes.push((index, kind));
            }
            if let Some(kind) = ConnectorKind::from_slide_archetype(&entity.archetype) {
                active_connectors.push((index, kind));
            }
        }
        Self {
            all: entities,
            by_archetype,
            notes,
            active_connectors,
        }
    }

    /// Number of entities in the underlying list.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.all.len()
    }

    /// Whether the underlying list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// The entity at the given original position, if in bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a RawEntity> {
        self.all.get(index)
    }

    /// The whole underlying list, in input order.
    #[must_use]
    pub const fn all(&self) -> &'a [RawEntity] {
        self.all
    }

    /// All entities of the given archetype, in input order.
    pub fn by_archetype(&self, archetype: &str) -> impl Iterator<Item = &'a RawEntity> + '_ {
        self.enumerate_by_archetype(archetype).map(|(_, entity)| entity)
    }

    /// All entities of the given archetype with their original positions,
    /// in input order.
    pub fn enumerate_by_archetype(
        &self,
        archetype: &str,
    ) -> impl Iterator<Item = (usize, &'a RawEntity)> + '_ {
        let all = self.all;
        self.by_archetype
            .get(archetype)
            .map_or(&[][..], Vec::as_slice)
            .iter()
            .map(move |&index| (index, &all[index]))
    }

    /// All note-role entities with their original positions and resolved
    /// [`NoteKind`], in input order.
    pub fn notes(&self) -> impl Iterator<Item = (usize, NoteKind, &'a RawEntity)> + '_ {
        let all = self.all;
        self.notes
            .iter()
            .map(move |&(index, kind)| (index, kind, &all[index]))
    }

    /// All active-connector entities with their original positions and
    /// resolved [`ConnectorKind`], in input order.
    pub fn active_connectors(
        &self,
    ) -> impl Iterator<Item = (usize, ConnectorKind, &'a RawEntity)> + '_ {
        let all = self.all;
        self.active_connectors
            .iter()
            .map(move |&(index, kind)| (index, kind, &all[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_preserve_original_positions() {
        let entities = vec![
            RawEntity::new("#BPM_CHANGE"),
            RawEntity::new("NormalTapNote"),
            RawEntity::new("Guide"),
            RawEntity::new("NormalSlideConnector"),
            RawEntity::new("CriticalTapNote"),
        ];
        let indexed = IndexedEntities::new(&entities);

        let notes: Vec<_> = indexed.notes().map(|(i, kind, _)| (i, kind)).collect();
        assert_eq!(
            notes,
            vec![(1, NoteKind::NormalTap), (4, NoteKind::CriticalTap)]
        );

        let connectors: Vec<_> = indexed
            .active_connectors()
            .map(|(i, kind, _)| (i, kind))
            .collect();
        assert_eq!(connectors, vec![(3, ConnectorKind::ActiveNormal)]);

        // Guides are passive and must not show up in the active view.
        assert!(indexed.by_archetype("Guide").count() == 1);
        assert_eq!(indexed.by_archetype("SimLine").count(), 0);
    }
}
