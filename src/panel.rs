//! Host-facing panel lifecycle

use embedded_hal::delay::DelayNs;

use crate::error::AllocationError;
use crate::mode::ModeSink;

/// Lifecycle state derived from the `prepared`/`enabled` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Off,
    PreparedDisabled,
    PreparedEnabled,
    /// Backlight on without a prepared panel. Only reached when the host
    /// enables before preparing, or unprepares without disabling first.
    BacklightOnly,
}

impl PanelState {
    pub fn from_flags(prepared: bool, enabled: bool) -> Self {
        match (prepared, enabled) {
            (false, false) => PanelState::Off,
            (true, false) => PanelState::PreparedDisabled,
            (true, true) => PanelState::PreparedEnabled,
            (false, true) => PanelState::BacklightOnly,
        }
    }

    pub fn is_prepared(self) -> bool {
        matches!(self, PanelState::PreparedDisabled | PanelState::PreparedEnabled)
    }

    pub fn is_enabled(self) -> bool {
        matches!(self, PanelState::PreparedEnabled | PanelState::BacklightOnly)
    }
}

/// Lifecycle callbacks a display stack invokes on a panel
///
/// The stack calls `prepare` then `enable` on the way up and `disable` then
/// `unprepare` on the way down. Every call is idempotent.
pub trait Panel {
    type Error;

    /// Power the panel up and program it.
    fn prepare<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Put the panel to sleep and cut its power.
    fn unprepare<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Turn the backlight on.
    fn enable(&mut self);

    /// Turn the backlight off.
    fn disable(&mut self);

    /// Publish the supported modes, returning how many were added.
    fn get_modes(&self, sink: &mut impl ModeSink) -> Result<usize, AllocationError>;

    fn state(&self) -> PanelState;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_flags() {
        assert_eq!(PanelState::from_flags(false, false), PanelState::Off);
        assert_eq!(PanelState::from_flags(true, false), PanelState::PreparedDisabled);
        assert_eq!(PanelState::from_flags(true, true), PanelState::PreparedEnabled);
        assert_eq!(PanelState::from_flags(false, true), PanelState::BacklightOnly);
    }

    #[test]
    fn test_state_flags_round_trip() {
        for prepared in [false, true] {
            for enabled in [false, true] {
                let state = PanelState::from_flags(prepared, enabled);
                assert_eq!(state.is_prepared(), prepared);
                assert_eq!(state.is_enabled(), enabled);
            }
        }
    }
}
