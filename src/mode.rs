//! Display timing published to the display stack

use core::fmt::Write as FmtWrite;

use heapless::String;
use log::error;

use crate::error::AllocationError;

/// Maximum length of a mode name ("320x480")
pub const MODE_NAME_LEN: usize = 16;

/// Fixed display timing descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingMode {
    /// Pixel clock in kHz
    pub clock_khz: u32,
    pub hdisplay: u16,
    pub hsync_start: u16,
    pub hsync_end: u16,
    pub htotal: u16,
    pub vdisplay: u16,
    pub vsync_start: u16,
    pub vsync_end: u16,
    pub vtotal: u16,
    /// Refresh rate in Hz
    pub vrefresh: u32,
    /// Physical size in millimeters
    pub width_mm: u16,
    pub height_mm: u16,
}

/// The only mode the ILI9488 panel supports
pub const DEFAULT_MODE: TimingMode = TimingMode {
    clock_khz: 17_000,
    hdisplay: 320,
    hsync_start: 320 + 130,
    hsync_end: 320 + 130 + 4,
    htotal: 320 + 130 + 4 + 130,
    vdisplay: 480,
    vsync_start: 480 + 2,
    vsync_end: 480 + 2 + 1,
    vtotal: 480 + 2 + 1 + 2,
    vrefresh: 60,
    width_mm: 42,
    height_mm: 82,
};

impl TimingMode {
    /// "WIDTHxHEIGHT", as the display stack names modes
    pub fn name(&self) -> String<MODE_NAME_LEN> {
        let mut name: String<MODE_NAME_LEN> = String::new();
        let _ = write!(name, "{}x{}", self.hdisplay, self.vdisplay);
        name
    }

    pub fn h_front_porch(&self) -> u16 {
        self.hsync_start - self.hdisplay
    }

    pub fn h_sync_len(&self) -> u16 {
        self.hsync_end - self.hsync_start
    }

    pub fn h_back_porch(&self) -> u16 {
        self.htotal - self.hsync_end
    }

    pub fn v_front_porch(&self) -> u16 {
        self.vsync_start - self.vdisplay
    }

    pub fn v_sync_len(&self) -> u16 {
        self.vsync_end - self.vsync_start
    }

    pub fn v_back_porch(&self) -> u16 {
        self.vtotal - self.vsync_end
    }
}

bitflags::bitflags! {
    /// How a published mode was obtained
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ModeType: u8 {
        /// Supplied by the panel driver
        const DRIVER = 0x1;
        /// The mode the display stack should pick first
        const PREFERRED = 0x2;
    }
}

/// A mode as handed to the display stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMode {
    pub timing: TimingMode,
    pub name: String<MODE_NAME_LEN>,
    pub kind: ModeType,
}

impl DisplayMode {
    pub fn from_timing(timing: TimingMode, kind: ModeType) -> Self {
        Self {
            timing,
            name: timing.name(),
            kind,
        }
    }
}

/// Receives the modes a panel publishes
pub trait ModeSink {
    fn add_mode(&mut self, mode: DisplayMode) -> Result<(), AllocationError>;

    /// Physical size of the connected panel
    fn set_physical_size(&mut self, _width_mm: u16, _height_mm: u16) {}
}

impl<const N: usize> ModeSink for heapless::Vec<DisplayMode, N> {
    fn add_mode(&mut self, mode: DisplayMode) -> Result<(), AllocationError> {
        self.push(mode).map_err(|_| AllocationError)
    }
}

/// Publish the panel's fixed mode into `sink`
///
/// Returns the number of modes added.
pub fn publish(timing: &TimingMode, sink: &mut impl ModeSink) -> Result<usize, AllocationError> {
    let mode = DisplayMode::from_timing(*timing, ModeType::DRIVER | ModeType::PREFERRED);
    if let Err(e) = sink.add_mode(mode) {
        error!(
            "failed to add mode {}x{}@{}",
            timing.hdisplay, timing.vdisplay, timing.vrefresh
        );
        return Err(e);
    }

    sink.set_physical_size(timing.width_mm, timing.height_mm);

    Ok(1)
}
