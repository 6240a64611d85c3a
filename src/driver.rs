//! The interface to the native force-feedback subsystem.
//!
//! [`Device`] and [`Effect`] never talk to the ForceFeedback framework directly. They go through
//! the [`FfDevice`] and [`FfEffect`] traits instead, which are implemented by the macOS backend
//! for real hardware. Other implementations can be plugged in with [`Device::with_driver`].
//!
//! [`Device`]: crate::Device
//! [`Effect`]: crate::Effect
//! [`Device::with_driver`]: crate::Device::with_driver

use std::fmt;

use crate::{
    description::EffectType,
    native::{NativeEffect, ParamFlags, StartFlags},
    raw::ff::*,
};

ffi_enum! {
    /// A native status code (`HRESULT`) returned by the ForceFeedback framework.
    pub enum Status: i32 {
        FF_OK = FF_OK,
        FF_FALSE = FF_FALSE,
        FF_DOWNLOADSKIPPED = FF_DOWNLOADSKIPPED,
        FF_EFFECTRESTARTED = FF_EFFECTRESTARTED,
        FF_TRUNCATED = FF_TRUNCATED,
        FF_TRUNCATEDANDRESTARTED = FF_TRUNCATEDANDRESTARTED,
        FFERR_DEVICENOTREG = FFERR_DEVICENOTREG,
        FFERR_DEVICEFULL = FFERR_DEVICEFULL,
        FFERR_MOREDATA = FFERR_MOREDATA,
        FFERR_NOTDOWNLOADED = FFERR_NOTDOWNLOADED,
        FFERR_HASEFFECTS = FFERR_HASEFFECTS,
        FFERR_INCOMPLETEEFFECT = FFERR_INCOMPLETEEFFECT,
        FFERR_EFFECTPLAYING = FFERR_EFFECTPLAYING,
        FFERR_UNPLUGGED = FFERR_UNPLUGGED,
        FFERR_INVALIDDOWNLOADID = FFERR_INVALIDDOWNLOADID,
        FFERR_DEVICEPAUSED = FFERR_DEVICEPAUSED,
        FFERR_INTERNAL = FFERR_INTERNAL,
        FFERR_EFFECTTYPEMISMATCH = FFERR_EFFECTTYPEMISMATCH,
        FFERR_UNSUPPORTEDAXIS = FFERR_UNSUPPORTEDAXIS,
        FFERR_NOTINITIALIZED = FFERR_NOTINITIALIZED,
        FFERR_EFFECTTYPENOTSUPPORTED = FFERR_EFFECTTYPENOTSUPPORTED,
        FFERR_DEVICERELEASED = FFERR_DEVICERELEASED,
        FFERR_UNSUPPORTED = FFERR_UNSUPPORTED,
        FFERR_NOINTERFACE = FFERR_NOINTERFACE,
        FFERR_GENERIC = FFERR_GENERIC,
        FFERR_OUTOFMEMORY = FFERR_OUTOFMEMORY,
        FFERR_INVALIDPARAM = FFERR_INVALIDPARAM,
    }
}

impl Status {
    /// Returns whether this status indicates success (`SUCCEEDED(hr)`).
    ///
    /// Besides [`Status::FF_OK`], this includes informational codes like
    /// [`Status::FF_EFFECTRESTARTED`].
    #[inline]
    pub fn is_success(self) -> bool {
        self.0 >= 0
    }

    /// Converts this status into a [`Result`].
    #[inline]
    pub fn check(self) -> Result<(), Status> {
        if self.is_success() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Status({:#010x})", self.0 as u32),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?} ({:#010x})", self.0 as u32)
    }
}

/// A native force-feedback device that effects can be created on.
pub trait FfDevice: fmt::Debug + Send {
    /// Registers a new effect of type `ty` with the native subsystem.
    fn create_effect(
        &mut self,
        ty: EffectType,
        effect: &NativeEffect,
    ) -> Result<Box<dyn FfEffect>, Status>;
}

/// A live native effect.
///
/// Dropping the handle must release any native resources still held, but does not have to unload
/// the effect; [`FfEffect::unload`] is always called first by [`Effect`].
///
/// An [`Effect`] can outlive the [`Device`] it was created on, so the handle has to keep whatever
/// native device state it needs alive on its own.
///
/// [`Effect`]: crate::Effect
/// [`Device`]: crate::Device
pub trait FfEffect: fmt::Debug + Send {
    /// Pushes the parameters selected by `flags` from `effect` to the native effect.
    fn set_parameters(&mut self, effect: &NativeEffect, flags: ParamFlags) -> Result<(), Status>;

    /// Starts playback, repeating the effect `iterations` times.
    fn start(&mut self, iterations: u32, flags: StartFlags) -> Result<(), Status>;

    /// Stops playback.
    fn stop(&mut self) -> Result<(), Status>;

    /// Unloads the effect from the device.
    fn unload(&mut self) -> Result<(), Status>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status() {
        assert!(Status::FF_OK.is_success());
        assert!(Status::FF_EFFECTRESTARTED.is_success());
        assert!(!Status::FFERR_DEVICEFULL.is_success());
        assert_eq!(Status::FFERR_UNPLUGGED.check(), Err(Status::FFERR_UNPLUGGED));
        assert_eq!(Status::FF_OK.check(), Ok(()));

        assert_eq!(format!("{:?}", Status::FFERR_DEVICEFULL), "FFERR_DEVICEFULL");
        assert_eq!(format!("{:?}", Status::from_raw(-1)), "Status(0xffffffff)");
        assert_eq!(
            Status::FFERR_GENERIC.to_string(),
            "FFERR_GENERIC (0x80004005)"
        );
    }
}
