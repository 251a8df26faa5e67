//! Panel sequencing configuration
//!
//! Defaults are the panel's datasheet timings. Shorter values are clamped back
//! up to those minimums by [`PanelConfig::clamped`].

/// What `unprepare` does when a DCS command fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnpreparePolicy {
    /// Skip the remaining commands, still disable the supply, report the error.
    #[default]
    ForcePowerOff,
    /// Return the error immediately, leaving the supply on and the panel prepared.
    PropagateEarly,
}

/// Minimum reset settle time
pub const MIN_RESET_SETTLE_MS: u32 = 20;
/// Panel power-on time
pub const MIN_POWER_ON_MS: u32 = 120;
/// Minimum wait after display on
pub const MIN_DISPLAY_ON_MS: u32 = 50;
/// Minimum wait after display off / sleep in
pub const MIN_SLEEP_SETTLE_MS: u32 = 10;

/// Sequencer timings and policies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    /// Wait after each reset line change during prepare
    pub reset_settle_ms: u32,
    /// Wait for the rail to stabilize after enabling the supply
    pub power_on_ms: u32,
    /// Wait after the display-on command
    pub display_on_ms: u32,
    /// Wait after display off and after sleep in
    pub sleep_settle_ms: u32,
    /// Reset pulse width of the attach-time handshake
    pub probe_reset_us: u32,
    /// Reset hold time before the supply is cut at release
    pub release_reset_ms: u32,
    pub unprepare_policy: UnpreparePolicy,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            reset_settle_ms: MIN_RESET_SETTLE_MS,
            power_on_ms: MIN_POWER_ON_MS,
            display_on_ms: MIN_DISPLAY_ON_MS,
            sleep_settle_ms: MIN_SLEEP_SETTLE_MS,
            probe_reset_us: 1_000,
            release_reset_ms: 20,
            unprepare_policy: UnpreparePolicy::ForcePowerOff,
        }
    }
}

impl PanelConfig {
    pub fn with_unprepare_policy(mut self, policy: UnpreparePolicy) -> Self {
        self.unprepare_policy = policy;
        self
    }

    pub fn with_power_on_ms(mut self, ms: u32) -> Self {
        self.power_on_ms = ms;
        self
    }

    pub fn with_reset_settle_ms(mut self, ms: u32) -> Self {
        self.reset_settle_ms = ms;
        self
    }

    pub fn with_display_on_ms(mut self, ms: u32) -> Self {
        self.display_on_ms = ms;
        self
    }

    pub fn with_sleep_settle_ms(mut self, ms: u32) -> Self {
        self.sleep_settle_ms = ms;
        self
    }

    /// Raise every lifecycle delay to at least the panel minimum.
    pub fn clamped(self) -> Self {
        Self {
            reset_settle_ms: self.reset_settle_ms.max(MIN_RESET_SETTLE_MS),
            power_on_ms: self.power_on_ms.max(MIN_POWER_ON_MS),
            display_on_ms: self.display_on_ms.max(MIN_DISPLAY_ON_MS),
            sleep_settle_ms: self.sleep_settle_ms.max(MIN_SLEEP_SETTLE_MS),
            ..self
        }
    }
}
