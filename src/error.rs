//! Error types for the panel sequencer

use thiserror::Error;

use crate::ili9488::Command;

/// Power rail enable failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerError {
    /// The regulator is not ready yet; the caller should retry later.
    #[error("power supply not ready, retry later")]
    Deferred,

    #[error("power supply busy")]
    Busy,

    #[error("power supply unavailable")]
    Unavailable,
}

/// The mode sink could not take another mode
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no room for display mode")]
pub struct AllocationError;

/// Lifecycle errors, generic over the DCS bus error
#[derive(Error, Debug)]
pub enum Error<B> {
    #[error("DCS write {command:?} failed: {cause:?}")]
    Transport { command: Command, cause: B },

    #[error("power supply enable failed: {0}")]
    Power(#[from] PowerError),
}

impl<B> Error<B> {
    /// True for a deferred power error, which is not a hard failure.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Error::Power(PowerError::Deferred))
    }

    /// The command whose write failed, if this is a transport error.
    pub fn command(&self) -> Option<Command> {
        match self {
            Error::Transport { command, .. } => Some(*command),
            Error::Power(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deferred_is_distinguished() {
        let deferred: Error<()> = PowerError::Deferred.into();
        let busy: Error<()> = PowerError::Busy.into();
        assert!(deferred.is_deferred());
        assert!(!busy.is_deferred());
        assert_eq!(deferred.command(), None);
    }

    #[test]
    fn test_transport_reports_command() {
        let err: Error<&str> = Error::Transport {
            command: Command::SetDisplayOn,
            cause: "nak",
        };
        assert_eq!(err.command(), Some(Command::SetDisplayOn));
        assert_eq!(err.to_string(), "DCS write SetDisplayOn failed: \"nak\"");
    }
}
