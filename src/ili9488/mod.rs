//! Driver for the Ilitek ILI9488 320x480 MIPI-DSI panel.
//!
//! Sequences reset, power rail, sleep exit and the vendor register
//! programming on `prepare`, and the reverse on `unprepare`. `enable` and
//! `disable` only switch the backlight.

mod command;
mod link;

pub use command::{Command, INIT_SEQUENCE};
pub use link::{DsiConfig, DsiModeFlags, PixelFormat};

use embedded_hal::delay::DelayNs;
use log::{debug, error, info, warn};

use crate::config::{PanelConfig, UnpreparePolicy};
use crate::error::{AllocationError, Error, PowerError};
use crate::hal::{Backlight, DcsBus, PowerSupply, ResetLine};
use crate::mode::{self, DEFAULT_MODE, ModeSink, TimingMode};
use crate::panel::{Panel, PanelState};

/// Placeholder reset line for boards that do not wire the reset pin
pub struct NoReset;

impl ResetLine for NoReset {
    fn set_asserted(&mut self, _asserted: bool) {}
}

/// Collaborators handed back by [`Ili9488::release`]
pub struct Parts<BUS, PWR, RST, BL> {
    pub bus: BUS,
    pub supply: PWR,
    pub reset: Option<RST>,
    pub backlight: BL,
}

/// ILI9488 panel controller
///
/// Holds no lock: calls on one instance must be serialized by the host, as a
/// display stack does for its per-device panel callbacks. Wrap it in a
/// [`SharedPanel`](crate::SharedPanel) otherwise.
pub struct Ili9488<BUS, PWR, RST, BL> {
    bus: BUS,
    supply: PWR,
    reset: Option<RST>,
    backlight: BL,
    config: PanelConfig,
    prepared: bool,
    enabled: bool,
}

impl<BUS, PWR, RST, BL> Ili9488<BUS, PWR, RST, BL>
where
    BUS: DcsBus,
    PWR: PowerSupply,
    RST: ResetLine,
    BL: Backlight,
{
    /// Link settings the DSI host must apply before attaching
    pub const DSI_CONFIG: DsiConfig = DsiConfig {
        lanes: 1,
        format: PixelFormat::Rgb888,
        mode_flags: DsiModeFlags::VIDEO
            .union(DsiModeFlags::VIDEO_BURST)
            .union(DsiModeFlags::LPM)
            .union(DsiModeFlags::EOT_PACKET),
    };

    /// Attach to a panel.
    ///
    /// The reset line is shared with the touchscreen on most boards, so it is
    /// pulsed once here and left deasserted.
    pub fn new<DELAY: DelayNs>(
        bus: BUS,
        supply: PWR,
        reset: Option<RST>,
        backlight: BL,
        config: PanelConfig,
        delay: &mut DELAY,
    ) -> Self {
        let config = config.clamped();
        let mut panel = Self {
            bus,
            supply,
            reset,
            backlight,
            config,
            prepared: false,
            enabled: false,
        };

        if let Some(reset) = panel.reset.as_mut() {
            reset.set_asserted(true);
            delay.delay_us(config.probe_reset_us);
            reset.set_asserted(false);
        }

        panel
    }

    /// Detach from the panel: backlight off, reset held, supply cut.
    pub fn release<DELAY: DelayNs>(mut self, delay: &mut DELAY) -> Parts<BUS, PWR, RST, BL> {
        if self.enabled {
            self.backlight.set_on(false);
        }

        if let Some(reset) = self.reset.as_mut() {
            reset.set_asserted(true);
            delay.delay_ms(self.config.release_reset_ms);
        }

        self.supply.disable();

        Parts {
            bus: self.bus,
            supply: self.supply,
            reset: self.reset,
            backlight: self.backlight,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The panel's only timing mode
    pub fn get_supported_mode(&self) -> TimingMode {
        DEFAULT_MODE
    }

    /// Send a command without parameters
    fn send_command(&mut self, command: Command) -> Result<(), Error<BUS::Error>> {
        self.cmd_with_data(command, &[])
    }

    /// Send command followed by data
    fn cmd_with_data(&mut self, command: Command, data: &[u8]) -> Result<(), Error<BUS::Error>> {
        self.bus
            .write(command.addr(), data)
            .map_err(|cause| Error::Transport { command, cause })
    }

    /// Vendor register programming
    fn init_sequence(&mut self) -> Result<(), Error<BUS::Error>> {
        for (command, data) in INIT_SEQUENCE {
            self.cmd_with_data(*command, data)?;
        }

        if let Err(e) = self.send_command(Command::EnterInvertMode) {
            warn!("enter invert mode failed: {}", e);
        }

        info!("panel init sequence done");
        Ok(())
    }

    /// Power up, program and switch on the panel.
    ///
    /// Stops at the first failing step without undoing earlier ones; the
    /// panel stays unprepared and `prepare` can simply be called again.
    pub fn prepare<DELAY: DelayNs>(&mut self, delay: &mut DELAY) -> Result<(), Error<BUS::Error>> {
        if self.prepared {
            return Ok(());
        }

        if let Some(reset) = self.reset.as_mut() {
            reset.set_asserted(false);
            reset.set_asserted(true);
        }

        delay.delay_ms(self.config.reset_settle_ms);

        if let Err(e) = self.supply.enable() {
            match e {
                PowerError::Deferred => debug!("supply not ready, deferring prepare"),
                _ => error!("failed to enable supply: {}", e),
            }
            return Err(e.into());
        }

        delay.delay_ms(self.config.power_on_ms);

        if let Some(reset) = self.reset.as_mut() {
            reset.set_asserted(false);
            delay.delay_ms(self.config.reset_settle_ms);
        }

        self.send_command(Command::ExitSleepMode)
            .inspect_err(|e| error!("failed to exit sleep mode: {}", e))?;

        self.init_sequence()
            .inspect_err(|e| error!("panel init sequence failed: {}", e))?;

        self.send_command(Command::SetDisplayOn)
            .inspect_err(|e| error!("failed to set display on: {}", e))?;

        delay.delay_ms(self.config.display_on_ms);

        self.prepared = true;
        Ok(())
    }

    /// Display off and sleep in, with their settle delays
    fn power_down_commands<DELAY: DelayNs>(
        &mut self,
        delay: &mut DELAY,
    ) -> Result<(), Error<BUS::Error>> {
        self.send_command(Command::SetDisplayOff)?;
        delay.delay_ms(self.config.sleep_settle_ms);

        self.send_command(Command::EnterSleepMode)?;
        delay.delay_ms(self.config.sleep_settle_ms);

        Ok(())
    }

    /// Switch the panel off and cut its supply.
    ///
    /// A failing command is handled per [`UnpreparePolicy`].
    pub fn unprepare<DELAY: DelayNs>(
        &mut self,
        delay: &mut DELAY,
    ) -> Result<(), Error<BUS::Error>> {
        if !self.prepared {
            return Ok(());
        }

        let result = self.power_down_commands(delay);

        if let Err(e) = &result {
            error!("panel power down failed: {}", e);
            if self.config.unprepare_policy == UnpreparePolicy::PropagateEarly {
                return result;
            }
        }

        self.supply.disable();
        self.prepared = false;

        result
    }

    /// Turn the backlight on.
    pub fn enable(&mut self) {
        if self.enabled {
            return;
        }

        self.backlight.set_on(true);
        self.enabled = true;
    }

    /// Turn the backlight off.
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }

        self.backlight.set_on(false);
        self.enabled = false;
    }
}

impl<BUS, PWR, RST, BL> Panel for Ili9488<BUS, PWR, RST, BL>
where
    BUS: DcsBus,
    PWR: PowerSupply,
    RST: ResetLine,
    BL: Backlight,
{
    type Error = Error<BUS::Error>;

    fn prepare<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        Ili9488::prepare(self, delay)
    }

    fn unprepare<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        Ili9488::unprepare(self, delay)
    }

    fn enable(&mut self) {
        Ili9488::enable(self)
    }

    fn disable(&mut self) {
        Ili9488::disable(self)
    }

    fn get_modes(&self, sink: &mut impl ModeSink) -> Result<usize, AllocationError> {
        mode::publish(&self.get_supported_mode(), sink)
    }

    fn state(&self) -> PanelState {
        PanelState::from_flags(self.prepared, self.enabled)
    }
}
