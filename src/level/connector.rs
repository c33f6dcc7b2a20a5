//! Connector and sim-line entities.

use super::EntityRef;

/// The visual/judgment category of a connector segment.
///
/// Active kinds belong to slide bodies and take part in judgment; guide
/// kinds are purely visual and come in eight colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectorKind {
    /// A normal slide body.
    ActiveNormal,
    /// A critical slide body.
    ActiveCritical,
    /// A guide in the neutral color, code `0`.
    GuideNeutral,
    /// A red guide, code `1`.
    GuideRed,
    /// A green guide, code `2`.
    GuideGreen,
    /// A blue guide, code `3`.
    GuideBlue,
    /// A yellow guide, code `4`.
    GuideYellow,
    /// A purple guide, code `5`.
    GuidePurple,
    /// A cyan guide, code `6`.
    GuideCyan,
    /// A black guide, code `7`.
    GuideBlack,
}

impl ConnectorKind {
    /// Maps a slide-connector archetype name onto its active kind.
    /// Returns `None` for everything else, guides included.
    #[must_use]
    pub fn from_slide_archetype(archetype: &str) -> Option<Self> {
        match archetype {
            "NormalSlideConnector" => Some(Self::ActiveNormal),
            "CriticalSlideConnector" => Some(Self::ActiveCritical),
            _ => None,
        }
    }

    /// Maps a guide color code (`0..=7`) onto its guide kind.
    #[must_use]
    pub const fn from_guide_color(code: i64) -> Option<Self> {
        Some(match code {
            0 => Self::GuideNeutral,
            1 => Self::GuideRed,
            2 => Self::GuideGreen,
            3 => Self::GuideBlue,
            4 => Self::GuideYellow,
            5 => Self::GuidePurple,
            6 => Self::GuideCyan,
            7 => Self::GuideBlack,
            _ => return None,
        })
    }
}

/// A connector entity: the body of a slide, or a guide.
///
/// `head`/`tail` bound the currently rendered stretch and `segment_head`/
/// `segment_tail` bound the whole visual segment. Slides also carry the
/// active pair used for judgment; guides never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connector {
    /// The note heading this connector.
    pub head: EntityRef,
    /// The note ending this connector.
    pub tail: EntityRef,
    /// First note of the whole segment.
    pub segment_head: EntityRef,
    /// Last note of the whole segment.
    pub segment_tail: EntityRef,
    /// First note of the active stretch, present on slides only.
    pub active_head: Option<EntityRef>,
    /// Last note of the active stretch, present on slides only.
    pub active_tail: Option<EntityRef>,
}

/// A simultaneity line drawn between two notes on the same beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimLine {
    /// The left note, as declared by the chart.
    pub left: EntityRef,
    /// The right note, as declared by the chart.
    pub right: EntityRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_archetype_table_is_exact() {
        assert_eq!(
            ConnectorKind::from_slide_archetype("NormalSlideConnector"),
            Some(ConnectorKind::ActiveNormal)
        );
        assert_eq!(
            ConnectorKind::from_slide_archetype("CriticalSlideConnector"),
            Some(ConnectorKind::ActiveCritical)
        );
        assert_eq!(ConnectorKind::from_slide_archetype("Guide"), None);
        assert_eq!(ConnectorKind::from_slide_archetype("NormalTapNote"), None);
    }

    #[test]
    fn guide_color_table_is_exact() {
        let expected = [
            ConnectorKind::GuideNeutral,
            ConnectorKind::GuideRed,
            ConnectorKind::GuideGreen,
            ConnectorKind::GuideBlue,
            ConnectorKind::GuideYellow,
            ConnectorKind::GuidePurple,
            ConnectorKind::GuideCyan,
            ConnectorKind::GuideBlack,
        ];
        for (code, kind) in (0..8).zip(expected) {
            assert_eq!(ConnectorKind::from_guide_color(code), Some(kind));
        }
        assert_eq!(ConnectorKind::from_guide_color(8), None);
        assert_eq!(ConnectorKind::from_guide_color(-1), None);
    }
}
