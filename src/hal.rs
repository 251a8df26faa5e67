//! Collaborator capabilities the sequencer drives
//!
//! The controller only sees these traits. The adapters here cover the usual
//! board wiring: GPIO reset, backlight and load-switch pins, and the
//! ILI9488 SPI interface mode as a DCS transport.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::error::PowerError;

/// Sends one DCS command with an optional payload
pub trait DcsBus {
    type Error: core::fmt::Debug;

    fn write(&mut self, command: u8, payload: &[u8]) -> Result<(), Self::Error>;
}

/// Panel power rail
pub trait PowerSupply {
    fn enable(&mut self) -> Result<(), PowerError>;

    /// Fire-and-forget.
    fn disable(&mut self);
}

/// Logical reset signal, independent of pin polarity
pub trait ResetLine {
    fn set_asserted(&mut self, asserted: bool);
}

/// Display illumination switch
pub trait Backlight {
    fn set_on(&mut self, on: bool);
}

impl<T: DcsBus + ?Sized> DcsBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, command: u8, payload: &[u8]) -> Result<(), Self::Error> {
        (**self).write(command, payload)
    }
}

/// Reset line on a GPIO
pub struct ResetPin<P> {
    pin: P,
    active_low: bool,
}

impl<P: OutputPin> ResetPin<P> {
    /// Active-low reset, the usual wiring for this panel.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
        }
    }

    pub fn active_high(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
        }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> ResetLine for ResetPin<P> {
    fn set_asserted(&mut self, asserted: bool) {
        let _ = if asserted != self.active_low {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }
}

/// Power rail behind a load switch enable pin (active high)
pub struct GpioSupply<P> {
    pin: P,
}

impl<P: OutputPin> GpioSupply<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> PowerSupply for GpioSupply<P> {
    fn enable(&mut self) -> Result<(), PowerError> {
        self.pin.set_high().map_err(|_| PowerError::Unavailable)
    }

    fn disable(&mut self) {
        let _ = self.pin.set_low();
    }
}

/// Backlight behind an enable pin (active high)
pub struct GpioBacklight<P> {
    pin: P,
}

impl<P: OutputPin> GpioBacklight<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Backlight for GpioBacklight<P> {
    fn set_on(&mut self, on: bool) {
        let _ = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }
}

/// DCS transport over the 4-wire SPI interface (D/CX pin)
pub struct SpiDcs<SPI, DC> {
    spi: SPI,
    dc: DC,
}

impl<SPI, DC> SpiDcs<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }

    /// Send a command byte
    fn send_command(&mut self, command: u8) -> Result<(), SPI::Error> {
        let _ = self.dc.set_low();
        self.spi.write(&[command])
    }

    /// Send parameter data
    fn send_data(&mut self, data: &[u8]) -> Result<(), SPI::Error> {
        let _ = self.dc.set_high();
        self.spi.write(data)
    }
}

impl<SPI, DC> DcsBus for SpiDcs<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    type Error = SPI::Error;

    fn write(&mut self, command: u8, payload: &[u8]) -> Result<(), Self::Error> {
        self.send_command(command)?;
        if !payload.is_empty() {
            self.send_data(payload)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    #[test]
    fn test_reset_pin_active_low() {
        let expectations = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let mut reset = ResetPin::new(PinMock::new(&expectations));
        reset.set_asserted(true);
        reset.set_asserted(false);
        reset.release().done();
    }

    #[test]
    fn test_reset_pin_active_high() {
        let expectations = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ];
        let mut reset = ResetPin::active_high(PinMock::new(&expectations));
        reset.set_asserted(true);
        reset.set_asserted(false);
        reset.release().done();
    }

    #[test]
    fn test_gpio_backlight_and_supply() {
        let expectations = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ];
        let mut backlight = GpioBacklight::new(PinMock::new(&expectations));
        backlight.set_on(true);
        backlight.set_on(false);
        backlight.release().done();

        let mut supply = GpioSupply::new(PinMock::new(&expectations));
        assert_eq!(supply.enable(), Ok(()));
        supply.disable();
        supply.release().done();
    }

    struct BrokenPin;

    #[derive(Debug)]
    struct BrokenPinError;

    impl embedded_hal::digital::Error for BrokenPinError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for BrokenPin {
        type Error = BrokenPinError;
    }

    impl OutputPin for BrokenPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(BrokenPinError)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(BrokenPinError)
        }
    }

    #[test]
    fn test_gpio_supply_pin_failure_is_unavailable() {
        let mut supply = GpioSupply::new(BrokenPin);
        assert_eq!(supply.enable(), Err(PowerError::Unavailable));
    }

    #[test]
    fn test_spi_dcs_frames_command_then_data() {
        let spi_expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0xC0]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x18, 0x17]),
            SpiTransaction::transaction_end(),
        ];
        let dc_expectations = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let mut dcs = SpiDcs::new(
            SpiMock::new(&spi_expectations),
            PinMock::new(&dc_expectations),
        );

        dcs.write(0xC0, &[0x18, 0x17]).unwrap();

        let (mut spi, mut dc) = dcs.release();
        spi.done();
        dc.done();
    }

    #[test]
    fn test_spi_dcs_command_without_payload() {
        let spi_expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x11]),
            SpiTransaction::transaction_end(),
        ];
        let dc_expectations = [PinTransaction::set(PinState::Low)];
        let mut dcs = SpiDcs::new(
            SpiMock::new(&spi_expectations),
            PinMock::new(&dc_expectations),
        );

        dcs.write(0x11, &[]).unwrap();

        let (mut spi, mut dc) = dcs.release();
        spi.done();
        dc.done();
    }

    struct NullBus;

    impl DcsBus for NullBus {
        type Error = Infallible;

        fn write(&mut self, _command: u8, _payload: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn display_on<B: DcsBus>(mut bus: B) -> Result<(), B::Error> {
        bus.write(0x29, &[])
    }

    #[test]
    fn test_bus_by_mut_ref() {
        let mut bus = NullBus;
        assert!(display_on(&mut bus).is_ok());
        assert!(display_on(bus).is_ok());
    }
}
