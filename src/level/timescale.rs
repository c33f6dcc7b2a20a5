//! Timescale groups and their change chains.

use super::{EntityRef, fin_f64::FinF64};

/// Easing between consecutive timescale changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimescaleEase {
    /// Step to the new timescale at the change beat.
    #[default]
    None,
    /// Interpolate linearly toward the next change.
    Linear,
}

/// A named chain of time-warp changes. Notes and connectors assigned to
/// the group scroll according to its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimescaleGroup {
    /// The first change of the chain; absent for an empty group.
    pub first: Option<EntityRef>,
}

/// One element of a timescale chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimescaleChange {
    /// Beat the change takes effect at.
    pub beat: FinF64,
    /// The scroll-speed factor from this beat on.
    pub timescale: FinF64,
    /// Skipped scroll distance applied at this beat.
    pub timescale_skip: FinF64,
    /// The group this change belongs to.
    pub group: EntityRef,
    /// Easing toward the next change.
    pub ease: TimescaleEase,
    /// The next change of the chain, absent on the last element.
    pub next: Option<EntityRef>,
}
