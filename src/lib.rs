//! ILI9488 MIPI-DSI panel sequencer
//!
//! Drives the panel through its power-up/power-down life cycle and publishes
//! its single 320x480 timing mode to the display stack.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod hal;
pub mod ili9488;
pub mod mode;
pub mod panel;
pub mod shared;

pub use config::{PanelConfig, UnpreparePolicy};
pub use error::{AllocationError, Error, PowerError};
pub use ili9488::Ili9488;
pub use mode::{DisplayMode, ModeSink, ModeType, TimingMode};
pub use panel::{Panel, PanelState};
pub use shared::SharedPanel;
