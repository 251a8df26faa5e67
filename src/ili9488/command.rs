//! Command definitions for the ILI9488 controller
//!
//! MIPI DCS standard commands plus the ILI9488 manufacturer command set.

/// Panel commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Enter Sleep Mode (DCS)
    EnterSleepMode = 0x10,
    /// Exit Sleep Mode (DCS)
    ExitSleepMode = 0x11,
    /// Enter Invert Mode (DCS)
    EnterInvertMode = 0x21,
    /// Set Display Off (DCS)
    SetDisplayOff = 0x28,
    /// Set Display On (DCS)
    SetDisplayOn = 0x29,
    /// Set Address Mode (DCS)
    SetAddressMode = 0x36,
    /// Set Pixel Format (DCS)
    SetPixelFormat = 0x3A,
    /// Interface Mode Control
    InterfaceModeCtrl = 0xB0,
    /// Frame Rate Control (normal mode)
    FrameRateCtrl = 0xB1,
    /// Display Inversion Control
    DisplayInversionCtrl = 0xB4,
    /// Display Function Control
    DisplayFunctionCtrl = 0xB6,
    /// Power Control 1
    PowerControl1 = 0xC0,
    /// Power Control 2
    PowerControl2 = 0xC1,
    /// VCOM Control
    VcomControl = 0xC5,
    /// Positive Gamma Control
    PositiveGamma = 0xE0,
    /// Negative Gamma Control
    NegativeGamma = 0xE1,
    /// Set Image Function
    SetImageFunction = 0xE9,
    /// Adjust Control 3
    AdjustControl3 = 0xF7,
}

impl Command {
    /// Get the command address byte
    #[inline]
    pub fn addr(self) -> u8 {
        self as u8
    }
}

/// Vendor register programming, written in order after sleep exit.
///
/// `EnterInvertMode` follows this table but is not part of it: its result is
/// not checked.
pub static INIT_SEQUENCE: &[(Command, &[u8])] = &[
    (
        Command::PositiveGamma,
        &[
            0x00, 0x13, 0x18, 0x04, 0x0F, 0x06, 0x3A, 0x56, 0x4D, 0x03, 0x0A, 0x06, 0x30, 0x3E,
            0x0F,
        ],
    ),
    (
        Command::NegativeGamma,
        &[
            0x00, 0x13, 0x18, 0x01, 0x11, 0x06, 0x38, 0x34, 0x4D, 0x06, 0x0D, 0x0B, 0x31, 0x37,
            0x0F,
        ],
    ),
    (Command::PowerControl1, &[0x18, 0x17]),
    (Command::PowerControl2, &[0x41]),
    (Command::VcomControl, &[0x00, 0x1A, 0x80]),
    // MY | BGR
    (Command::SetAddressMode, &[0x48]),
    // 16bpp
    (Command::SetPixelFormat, &[0x55]),
    (Command::InterfaceModeCtrl, &[0x00]),
    (Command::FrameRateCtrl, &[0xA0]),
    // 2-dot inversion
    (Command::DisplayInversionCtrl, &[0x02]),
    (Command::DisplayFunctionCtrl, &[0x20, 0x02]),
    (Command::SetImageFunction, &[0x00]),
    (Command::AdjustControl3, &[0xA9, 0x51, 0x2C, 0x82]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_sequence_payload_lengths() {
        let lengths: Vec<(u8, usize)> = INIT_SEQUENCE
            .iter()
            .map(|(cmd, data)| (cmd.addr(), data.len()))
            .collect();
        assert_eq!(
            lengths,
            vec![
                (0xE0, 15),
                (0xE1, 15),
                (0xC0, 2),
                (0xC1, 1),
                (0xC5, 3),
                (0x36, 1),
                (0x3A, 1),
                (0xB0, 1),
                (0xB1, 1),
                (0xB4, 1),
                (0xB6, 2),
                (0xE9, 1),
                (0xF7, 4),
            ]
        );
    }

    #[test]
    fn test_invert_mode_is_not_in_table() {
        assert!(
            INIT_SEQUENCE
                .iter()
                .all(|(cmd, _)| *cmd != Command::EnterInvertMode)
        );
    }
}
