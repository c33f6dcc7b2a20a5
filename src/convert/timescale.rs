//! Timescale chain reconstruction.
//!
//! A group entity names the first of its change records through the
//! `first` field; each record names its successor through `next`, and a
//! non-positive or absent `next` ends the chain. The raw records are
//! scattered across the entity list, so the walk follows original
//! indices and emits one owned change entity per record, linked to its
//! predecessor.

use std::collections::HashMap;

use crate::{
    extended::indexed::IndexedEntities,
    level::{
        Entity, EntityRef,
        fin_f64::FinF64,
        timescale::{TimescaleChange, TimescaleEase, TimescaleGroup},
    },
};

use super::{Arena, ConvertError, Result, int_or, require_finite, require_int};

/// Builds every timescale group with its chain. Returns the map from a
/// group's original entity index to its group entity, which later
/// builders use to resolve group references.
pub(crate) fn build_timescale_groups(
    store: &IndexedEntities<'_>,
    arena: &mut Arena,
) -> Result<HashMap<usize, EntityRef>> {
    let mut groups = HashMap::new();
    for (group_index, entity) in store.enumerate_by_archetype("TimeScaleGroup") {
        let group_ref = arena.push(Entity::TimescaleGroup(TimescaleGroup { first: None }));

        let mut current = require_int(entity, "first")?;
        let mut previous: Option<EntityRef> = None;
        let mut visited = 0_usize;
        loop {
            let raw_change = usize::try_from(current)
                .ok()
                .and_then(|index| store.get(index))
                .ok_or(ConvertError::EntityIndexOutOfBounds(current))?;
            visited += 1;
            if visited > store.len() {
                return Err(ConvertError::TimescaleChainCycle(group_index));
            }

            let change = TimescaleChange {
                beat: require_finite(raw_change, "#BEAT")?,
                timescale: require_finite(raw_change, "timeScale")?,
                timescale_skip: FinF64::default(),
                group: group_ref,
                ease: TimescaleEase::None,
                next: None,
            };
            let change_ref = arena.push(Entity::TimescaleChange(change));
            match previous {
                None => arena.timescale_group_mut(group_ref).first = Some(change_ref),
                Some(previous_ref) => {
                    arena.timescale_change_mut(previous_ref).next = Some(change_ref);
                }
            }
            previous = Some(change_ref);

            let next = int_or(raw_change, "next", 0)?;
            if next <= 0 {
                break;
            }
            current = next;
        }

        groups.insert(group_index, group_ref);
    }
    Ok(groups)
}
