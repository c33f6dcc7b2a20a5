//! BPM marker conversion: a 1:1 mapping, no cross-references.

use crate::{
    extended::indexed::IndexedEntities,
    level::{BpmChange, Entity},
};

use super::{Arena, Result, require_finite};

pub(crate) fn build_bpm_changes(store: &IndexedEntities<'_>, arena: &mut Arena) -> Result<()> {
    for entity in store.by_archetype("#BPM_CHANGE") {
        let bpm_change = BpmChange {
            beat: require_finite(entity, "#BEAT")?,
            bpm: require_finite(entity, "#BPM")?,
        };
        arena.push(Entity::BpmChange(bpm_change));
    }
    Ok(())
}
