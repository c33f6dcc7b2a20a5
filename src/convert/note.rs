//! Note, slide-connector and sim-line assembly.
//!
//! Three passes, in a fixed order so every reference resolves against an
//! already-built entity: all notes first, then the slide connectors
//! between them (stamping the slide kind and ease onto the notes they
//! touch), then per-note reference resolution (timescale group,
//! attachment, slide fusion), and finally the sim-lines.

use std::collections::HashMap;

use crate::{
    extended::indexed::IndexedEntities,
    level::{
        Entity, EntityRef,
        connector::{Connector, ConnectorKind, SimLine},
        ease::EaseType,
        fin_f64::FinF64,
        note::{FlickDirection, Note},
    },
};

use super::{Arena, ConvertError, Result, finite_or, int_or, require_finite, require_int};

/// The note endpoints of a slide connector, kept for attachment and
/// fusion resolution.
struct SlideRefs {
    head: EntityRef,
    tail: EntityRef,
}

pub(crate) fn build_notes(
    store: &IndexedEntities<'_>,
    arena: &mut Arena,
    groups: &HashMap<usize, EntityRef>,
) -> Result<()> {
    // Pass 1: construct every note-role entity.
    let mut notes_by_index: HashMap<usize, EntityRef> = HashMap::new();
    for (index, kind, entity) in store.notes() {
        let direction_code = int_or(entity, "direction", 0)?;
        let note = Note {
            kind,
            beat: require_finite(entity, "#BEAT")?,
            lane: finite_or(entity, "lane", 0.0)?,
            size: finite_or(entity, "size", 0.0)?,
            direction: FlickDirection::try_from(direction_code)
                .map_err(ConvertError::InvalidDirection)?,
            segment_kind: ConnectorKind::ActiveNormal,
            segment_alpha: FinF64::new_unchecked(1.0),
            connector_ease: EaseType::Linear,
            timescale_group: None,
            attach_head: None,
            attach_tail: None,
            is_attached: false,
            active_head: None,
            next: None,
        };
        notes_by_index.insert(index, arena.push(Entity::Note(note)));
    }

    // Pass 2: slide connectors between the constructed notes.
    let mut slides_by_index: HashMap<usize, SlideRefs> = HashMap::new();
    for (index, kind, entity) in store.active_connectors() {
        let head = resolve_note(&notes_by_index, require_int(entity, "head")?)?;
        let tail = resolve_note(&notes_by_index, require_int(entity, "tail")?)?;
        let start = resolve_note(&notes_by_index, require_int(entity, "start")?)?;
        let end = resolve_note(&notes_by_index, require_int(entity, "end")?)?;
        let ease =
            EaseType::try_from(require_int(entity, "ease")?).map_err(ConvertError::InvalidEase)?;

        arena.push(Entity::Connector(Connector {
            head,
            tail,
            segment_head: start,
            segment_tail: end,
            active_head: Some(start),
            active_tail: Some(end),
        }));

        let head_note = arena.note_mut(head);
        head_note.connector_ease = ease;
        head_note.segment_kind = kind;
        arena.note_mut(tail).segment_kind = kind;
        arena.note_mut(start).segment_kind = kind;

        slides_by_index.insert(index, SlideRefs { head, tail });
    }

    // Pass 3: per-note reference resolution.
    for (index, _, entity) in store.notes() {
        let Some(&note_ref) = notes_by_index.get(&index) else {
            continue;
        };

        let group_index = int_or(entity, "timeScaleGroup", -1)?;
        // A note naming a non-group index is silently left groupless.
        if let Some(&group_ref) = usize::try_from(group_index)
            .ok()
            .and_then(|index| groups.get(&index))
        {
            arena.note_mut(note_ref).timescale_group = Some(group_ref);
        }

        let attach_index = int_or(entity, "attach", -1)?;
        if attach_index > 0 {
            let slide = resolve_slide(&slides_by_index, attach_index)?;
            let (head, tail) = (slide.head, slide.tail);
            let note = arena.note_mut(note_ref);
            note.attach_head = Some(head);
            note.attach_tail = Some(tail);
            note.is_attached = true;
        }

        let slide_index = int_or(entity, "slide", -1)?;
        if slide_index > 0 {
            let head = resolve_slide(&slides_by_index, slide_index)?.head;
            arena.note_mut(note_ref).active_head = Some(head);
        }
    }

    // Sim-lines between simultaneous notes, endpoint order as declared.
    for entity in store.by_archetype("SimLine") {
        let left = resolve_note(&notes_by_index, require_int(entity, "a")?)?;
        let right = resolve_note(&notes_by_index, require_int(entity, "b")?)?;
        arena.push(Entity::SimLine(SimLine { left, right }));
    }

    Ok(())
}

fn resolve_note(notes_by_index: &HashMap<usize, EntityRef>, index: i64) -> Result<EntityRef> {
    usize::try_from(index)
        .ok()
        .and_then(|index| notes_by_index.get(&index).copied())
        .ok_or(ConvertError::UnresolvedNote(index))
}

fn resolve_slide(slides_by_index: &HashMap<usize, SlideRefs>, index: i64) -> Result<&SlideRefs> {
    usize::try_from(index)
        .ok()
        .and_then(|index| slides_by_index.get(&index))
        .ok_or(ConvertError::UnresolvedConnector(index))
}
