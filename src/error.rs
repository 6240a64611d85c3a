use std::fmt;

use thiserror::Error;

use crate::driver::Status;

/// A native operation that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Operation {
    CreateDevice,
    QueryCapabilities,
    CreateEffect,
    SetParameters,
    Start,
    Stop,
    Unload,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreateDevice => "FFCreateDevice",
            Self::QueryCapabilities => "FFDeviceGetForceFeedbackCapabilities",
            Self::CreateEffect => "FFDeviceCreateEffect",
            Self::SetParameters => "FFEffectSetParameters",
            Self::Start => "FFEffectStart",
            Self::Stop => "FFEffectStop",
            Self::Unload => "FFEffectUnload",
        })
    }
}

/// Errors returned by this library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A call into the ForceFeedback framework failed.
    #[error("{op} failed: {status}")]
    Native { op: Operation, status: Status },

    /// An IOKit call returned a `kern_return_t` other than `KERN_SUCCESS`.
    #[error("{call} failed with kern_return_t {code:#x}")]
    Kern { call: &'static str, code: i32 },

    /// [`Device::create_effect`] was called with a name that is already in use.
    ///
    /// [`Device::create_effect`]: crate::Device::create_effect
    #[error("an effect named '{0}' already exists on this device")]
    DuplicateEffect(String),

    /// A by-name operation referred to an effect that doesn't exist.
    #[error("no effect named '{0}' exists on this device")]
    NoSuchEffect(String),

    /// The effect has already been released with [`Effect::release`].
    ///
    /// [`Effect::release`]: crate::Effect::release
    #[error("effect '{0}' has been unloaded")]
    Unloaded(String),
}

impl Error {
    #[inline]
    pub(crate) fn native(op: Operation) -> impl FnOnce(Status) -> Self {
        move |status| Self::Native { op, status }
    }

    /// Returns the native status code, if this error was caused by a failed framework call.
    pub fn status(&self) -> Option<Status> {
        match self {
            Self::Native { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = Error::native(Operation::Start)(Status::FFERR_UNPLUGGED);
        assert_eq!(
            err.to_string(),
            "FFEffectStart failed: FFERR_UNPLUGGED (0x80040209)"
        );
        assert_eq!(err.status(), Some(Status::FFERR_UNPLUGGED));

        let err = Error::DuplicateEffect("vibrate".into());
        assert_eq!(
            err.to_string(),
            "an effect named 'vibrate' already exists on this device"
        );
        assert_eq!(err.status(), None);
    }
}
