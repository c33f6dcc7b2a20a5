//! Easing curves for connector segments.

/// The easing applied between a connector head and its tail.
///
/// The interchange format encodes these as the codes `-2..=2`; the code
/// table is fixed, so any other value is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EaseType {
    /// Ease out then in, code `-2`.
    OutInQuad,
    /// Ease out, code `-1`.
    OutQuad,
    /// No easing, code `0`.
    #[default]
    Linear,
    /// Ease in, code `1`.
    InQuad,
    /// Ease in then out, code `2`.
    InOutQuad,
}

impl TryFrom<i64> for EaseType {
    type Error = i64;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Ok(match value {
            -2 => Self::OutInQuad,
            -1 => Self::OutQuad,
            0 => Self::Linear,
            1 => Self::InQuad,
            2 => Self::InOutQuad,
            _ => return Err(value),
        })
    }
}
