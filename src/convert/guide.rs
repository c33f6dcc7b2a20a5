//! Guide assembly with control-point anchor deduplication.
//!
//! A guide declares four inline control points (start, head, tail, end).
//! Control points of independent guides often coincide geometrically, and
//! each point contributes only a subset of the anchor attributes: start
//! carries the segment kind and the start alpha, end the end alpha, head
//! the ease, tail nothing. Coinciding points are folded into one anchor
//! entity when every attribute a point would set is still unset on the
//! anchor or already equal; a disagreement keeps the anchors separate.
//! Attributes still unset once all guides are processed fall back to
//! their defaults.

use std::collections::HashMap;

use crate::{
    extended::{RawEntity, indexed::IndexedEntities},
    level::{
        Entity, EntityRef,
        connector::{Connector, ConnectorKind},
        ease::EaseType,
        fin_f64::FinF64,
        note::{FlickDirection, Note, NoteKind},
    },
};

use super::{
    Arena, ConvertError, ConvertWarning, Result, int_or, require_finite, require_int,
};

/// Field names of one guide control point.
struct PointFields {
    beat: &'static str,
    lane: &'static str,
    size: &'static str,
    group: &'static str,
}

const START: PointFields = PointFields {
    beat: "startBeat",
    lane: "startLane",
    size: "startSize",
    group: "startTimeScaleGroup",
};
const HEAD: PointFields = PointFields {
    beat: "headBeat",
    lane: "headLane",
    size: "headSize",
    group: "headTimeScaleGroup",
};
const TAIL: PointFields = PointFields {
    beat: "tailBeat",
    lane: "tailLane",
    size: "tailSize",
    group: "tailTimeScaleGroup",
};
const END: PointFields = PointFields {
    beat: "endBeat",
    lane: "endLane",
    size: "endSize",
    group: "endTimeScaleGroup",
};

/// A resolved control point: the anchor deduplication key.
#[derive(Clone, Copy, PartialEq)]
struct ControlPoint {
    beat: FinF64,
    lane: FinF64,
    size: FinF64,
    group: Option<EntityRef>,
}

/// The attribute subset one control point contributes to its anchor.
#[derive(Clone, Copy, Default)]
struct Contribution {
    kind: Option<ConnectorKind>,
    alpha: Option<FinF64>,
    ease: Option<EaseType>,
}

/// An anchor created so far: its entity plus the merge state of its
/// attributes. The entity's attribute fields are only written once all
/// guides are processed.
struct AnchorSlot {
    entity: EntityRef,
    point: ControlPoint,
    kind: Option<ConnectorKind>,
    alpha: Option<FinF64>,
    ease: Option<EaseType>,
}

/// All anchors created so far, indexed by beat so a lookup scans only
/// the anchors sharing the control point's beat.
#[derive(Default)]
struct AnchorIndex {
    slots: Vec<AnchorSlot>,
    by_beat: HashMap<FinF64, Vec<usize>>,
}

impl AnchorIndex {
    /// Returns the anchor for a control point, merging into a compatible
    /// existing anchor when one exists and creating a new entity
    /// otherwise.
    fn resolve(
        &mut self,
        arena: &mut Arena,
        point: ControlPoint,
        contribution: Contribution,
        warnings: &mut Vec<ConvertWarning>,
    ) -> EntityRef {
        let mut key_matched = false;
        if let Some(slot_ids) = self.by_beat.get(&point.beat) {
            for &slot_id in slot_ids {
                let slot = &mut self.slots[slot_id];
                if slot.point != point {
                    continue;
                }
                key_matched = true;
                if compatible(slot.kind, contribution.kind)
                    && compatible(slot.alpha, contribution.alpha)
                    && compatible(slot.ease, contribution.ease)
                {
                    // First writer wins; unset attributes are filled in.
                    slot.kind = slot.kind.or(contribution.kind);
                    slot.alpha = slot.alpha.or(contribution.alpha);
                    slot.ease = slot.ease.or(contribution.ease);
                    return slot.entity;
                }
            }
        }
        if key_matched {
            warnings.push(ConvertWarning::ConflictingGuideAnchor { beat: point.beat });
        }

        let entity = arena.push(Entity::Note(Note {
            kind: NoteKind::Anchor,
            beat: point.beat,
            lane: point.lane,
            size: point.size,
            direction: FlickDirection::UpOmni,
            segment_kind: ConnectorKind::GuideNeutral,
            segment_alpha: FinF64::new_unchecked(1.0),
            connector_ease: EaseType::Linear,
            timescale_group: point.group,
            attach_head: None,
            attach_tail: None,
            is_attached: false,
            active_head: None,
            next: None,
        }));
        let slot_id = self.slots.len();
        self.slots.push(AnchorSlot {
            entity,
            point,
            kind: contribution.kind,
            alpha: contribution.alpha,
            ease: contribution.ease,
        });
        self.by_beat.entry(point.beat).or_default().push(slot_id);
        entity
    }

    /// Writes the merged attributes into the anchor entities, defaulting
    /// whatever no guide ever set.
    fn finalize(self, arena: &mut Arena) {
        for slot in self.slots {
            let note = arena.note_mut(slot.entity);
            note.segment_kind = slot.kind.unwrap_or(ConnectorKind::GuideNeutral);
            note.segment_alpha = slot.alpha.unwrap_or(FinF64::new_unchecked(1.0));
            note.connector_ease = slot.ease.unwrap_or(EaseType::Linear);
        }
    }
}

/// Unset-or-equal: a contribution may land on an anchor whose attribute
/// is still unset or already holds the same value.
fn compatible<T: PartialEq + Copy>(current: Option<T>, incoming: Option<T>) -> bool {
    match (current, incoming) {
        (_, None) | (None, _) => true,
        (Some(current), Some(incoming)) => current == incoming,
    }
}

pub(crate) fn build_guides(
    store: &IndexedEntities<'_>,
    arena: &mut Arena,
    groups: &HashMap<usize, EntityRef>,
    warnings: &mut Vec<ConvertWarning>,
) -> Result<()> {
    let mut anchors = AnchorIndex::default();
    for entity in store.by_archetype("Guide") {
        let start = control_point(entity, &START, groups)?;
        let head = control_point(entity, &HEAD, groups)?;
        let tail = control_point(entity, &TAIL, groups)?;
        let end = control_point(entity, &END, groups)?;
        let ease =
            EaseType::try_from(int_or(entity, "ease", 0)?).map_err(ConvertError::InvalidEase)?;
        let (start_alpha, end_alpha) = fade_alphas(int_or(entity, "fade", 1)?)?;
        let kind = {
            let code = int_or(entity, "color", 0)?;
            ConnectorKind::from_guide_color(code).ok_or(ConvertError::InvalidColor(code))?
        };

        let start_ref = anchors.resolve(
            arena,
            start,
            Contribution {
                kind: Some(kind),
                alpha: Some(start_alpha),
                ease: None,
            },
            warnings,
        );
        let end_ref = anchors.resolve(
            arena,
            end,
            Contribution {
                alpha: Some(end_alpha),
                ..Contribution::default()
            },
            warnings,
        );
        let head_ref = anchors.resolve(
            arena,
            head,
            Contribution {
                ease: Some(ease),
                ..Contribution::default()
            },
            warnings,
        );
        let tail_ref = anchors.resolve(arena, tail, Contribution::default(), warnings);

        arena.push(Entity::Connector(Connector {
            head: head_ref,
            tail: tail_ref,
            segment_head: start_ref,
            segment_tail: end_ref,
            active_head: None,
            active_tail: None,
        }));
    }
    anchors.finalize(arena);
    Ok(())
}

fn control_point(
    entity: &RawEntity,
    fields: &PointFields,
    groups: &HashMap<usize, EntityRef>,
) -> Result<ControlPoint> {
    // A point naming a non-group index (-1 by convention) has no group,
    // same as the note-side resolution.
    let group_index = require_int(entity, fields.group)?;
    let group = usize::try_from(group_index)
        .ok()
        .and_then(|index| groups.get(&index).copied());
    Ok(ControlPoint {
        beat: require_finite(entity, fields.beat)?,
        lane: require_finite(entity, fields.lane)?,
        size: require_finite(entity, fields.size)?,
        group,
    })
}

/// The fade-mode table: start and end opacity of the guide's ramp.
fn fade_alphas(code: i64) -> Result<(FinF64, FinF64)> {
    const OPAQUE: FinF64 = FinF64::new_unchecked(1.0);
    const CLEAR: FinF64 = FinF64::new_unchecked(0.0);
    match code {
        0 => Ok((OPAQUE, CLEAR)),
        1 => Ok((OPAQUE, OPAQUE)),
        2 => Ok((CLEAR, OPAQUE)),
        other => Err(ConvertError::InvalidFade(other)),
    }
}
