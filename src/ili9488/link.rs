//! DSI link requirements of the panel

bitflags::bitflags! {
    /// DSI host operating mode flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DsiModeFlags: u16 {
        /// Video mode (as opposed to command mode)
        const VIDEO = 0x1;
        /// Burst video transfers
        const VIDEO_BURST = 0x2;
        /// Send commands in low power mode
        const LPM = 0x4;
        /// Send an EoT packet after each transmission
        const EOT_PACKET = 0x8;
    }
}

/// Pixel format on the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb888,
    Rgb666,
    Rgb666Packed,
    Rgb565,
}

impl PixelFormat {
    pub fn bits_per_pixel(self) -> u8 {
        match self {
            PixelFormat::Rgb888 | PixelFormat::Rgb666 => 24,
            PixelFormat::Rgb666Packed => 18,
            PixelFormat::Rgb565 => 16,
        }
    }
}

/// What the DSI host must configure before attaching the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DsiConfig {
    /// Number of data lanes
    pub lanes: u8,
    pub format: PixelFormat,
    pub mode_flags: DsiModeFlags,
}
