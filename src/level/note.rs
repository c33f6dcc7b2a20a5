//! Note entities and the archetype vocabulary that produces them.

use super::{EntityRef, connector::ConnectorKind, ease::EaseType, fin_f64::FinF64};

/// The role a note entity plays in the timeline.
///
/// This is a closed vocabulary: the interchange archetype names map onto
/// these roles through [`NoteKind::from_archetype`], and several archetypes
/// collapse onto one role (both hidden archetypes become [`Anchor`],
/// attached ticks share the plain tick roles, and the non-directional
/// trace flick is a normal trace flick).
///
/// [`Anchor`]: NoteKind::Anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoteKind {
    /// A plain tap.
    NormalTap,
    /// A critical tap.
    CriticalTap,
    /// A directional flick.
    NormalFlick,
    /// A critical directional flick.
    CriticalFlick,
    /// A tap that starts a slide.
    NormalHeadTap,
    /// A critical tap that starts a slide.
    CriticalHeadTap,
    /// A release that ends a slide.
    NormalTailRelease,
    /// A critical release that ends a slide.
    CriticalTailRelease,
    /// A flick that ends a slide.
    NormalTailFlick,
    /// A critical flick that ends a slide.
    CriticalTailFlick,
    /// A judged tick along a slide body.
    NormalTick,
    /// A critical judged tick along a slide body.
    CriticalTick,
    /// A tick that is judged but never drawn.
    TransientHiddenTick,
    /// A trace note.
    NormalTrace,
    /// A critical trace note.
    CriticalTrace,
    /// A trace note carrying a flick.
    NormalTraceFlick,
    /// A critical trace note carrying a flick.
    CriticalTraceFlick,
    /// A trace that starts a slide.
    NormalHeadTrace,
    /// A critical trace that starts a slide.
    CriticalHeadTrace,
    /// A trace that ends a slide.
    NormalTailTrace,
    /// A critical trace that ends a slide.
    CriticalTailTrace,
    /// A note that damages the player when hit.
    Damage,
    /// A judgment-free control point shaping a connector.
    Anchor,
}

impl NoteKind {
    /// Maps an interchange archetype name onto its note role. Returns
    /// `None` for any name outside the note vocabulary, including the
    /// connector, guide and marker archetypes.
    #[must_use]
    pub fn from_archetype(archetype: &str) -> Option<Self> {
        Some(match archetype {
            "NormalTapNote" => Self::NormalTap,
            "CriticalTapNote" => Self::CriticalTap,
            "NormalFlickNote" => Self::NormalFlick,
            "CriticalFlickNote" => Self::CriticalFlick,
            "NormalSlideStartNote" => Self::NormalHeadTap,
            "CriticalSlideStartNote" => Self::CriticalHeadTap,
            "NormalSlideEndNote" => Self::NormalTailRelease,
            "CriticalSlideEndNote" => Self::CriticalTailRelease,
            "NormalSlideEndFlickNote" => Self::NormalTailFlick,
            "CriticalSlideEndFlickNote" => Self::CriticalTailFlick,
            "IgnoredSlideTickNote" => Self::TransientHiddenTick,
            "NormalSlideTickNote" => Self::NormalTick,
            "CriticalSlideTickNote" => Self::CriticalTick,
            "HiddenSlideTickNote" => Self::Anchor,
            "NormalAttachedSlideTickNote" => Self::NormalTick,
            "CriticalAttachedSlideTickNote" => Self::CriticalTick,
            "NormalTraceNote" => Self::NormalTrace,
            "CriticalTraceNote" => Self::CriticalTrace,
            "DamageNote" => Self::Damage,
            "NormalTraceFlickNote" => Self::NormalTraceFlick,
            "CriticalTraceFlickNote" => Self::CriticalTraceFlick,
            "NonDirectionalTraceFlickNote" => Self::NormalTraceFlick,
            "HiddenSlideStartNote" => Self::Anchor,
            "NormalTraceSlideStartNote" => Self::NormalHeadTrace,
            "CriticalTraceSlideStartNote" => Self::CriticalHeadTrace,
            "NormalTraceSlideEndNote" => Self::NormalTailTrace,
            "CriticalTraceSlideEndNote" => Self::CriticalTailTrace,
            _ => return None,
        })
    }
}

/// The direction of a flick gesture.
///
/// Encoded in the interchange format as `-1`, `0` or `1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlickDirection {
    /// Flick up and to the left, code `-1`.
    UpLeft,
    /// Flick straight up, code `0`.
    #[default]
    UpOmni,
    /// Flick up and to the right, code `1`.
    UpRight,
}

impl TryFrom<i64> for FlickDirection {
    type Error = i64;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Ok(match value {
            -1 => Self::UpLeft,
            0 => Self::UpOmni,
            1 => Self::UpRight,
            _ => return Err(value),
        })
    }
}

/// A note entity on the timeline.
///
/// Every note role shares this shape; anchors simply never carry judgment
/// and receive their segment attributes from the guides passing through
/// them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// The role of this note.
    pub kind: NoteKind,
    /// Beat position.
    pub beat: FinF64,
    /// Horizontal lane position.
    pub lane: FinF64,
    /// Width of the note.
    pub size: FinF64,
    /// Flick direction, meaningful for flick roles.
    pub direction: FlickDirection,
    /// The visual/judgment category of the connector segment headed by
    /// this note.
    pub segment_kind: ConnectorKind,
    /// Opacity of the connector segment headed by this note.
    pub segment_alpha: FinF64,
    /// Easing of the connector segment headed by this note.
    pub connector_ease: EaseType,
    /// The timescale group this note follows, if any.
    pub timescale_group: Option<EntityRef>,
    /// Head of the connector this note is attached to, if attached.
    pub attach_head: Option<EntityRef>,
    /// Tail of the connector this note is attached to, if attached.
    pub attach_tail: Option<EntityRef>,
    /// Whether this note was attached onto a connector.
    pub is_attached: bool,
    /// Head of the slide this note is fused into, when overridden.
    pub active_head: Option<EntityRef>,
    /// The note that follows this one along its slide. Assigned by the
    /// final linking pass.
    pub next: Option<EntityRef>,
}
