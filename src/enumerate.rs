//! Device enumeration.
//!
//! [`enumerate`] walks the IOKit registry for HID devices that support force feedback, and opens
//! each of them as a [`Device`].
//!
//! Enumeration is blocking. On platforms without the ForceFeedback framework, no devices are
//! found.

#[cfg(target_os = "macos")]
use crate::macos::Services as Impl;

mod fallback;
#[cfg(not(target_os = "macos"))]
use fallback::Impl;

use std::fmt;

use crate::{Device, error::Error};

pub(crate) trait EnumerateImpl: Sized {
    fn open() -> Result<Self, Error>;
    fn next_device(&mut self) -> Option<Result<Device, Error>>;
}

/// Enumerates all currently plugged-in force-feedback [`Device`]s.
///
/// Devices that match but fail to open are yielded as errors, so that one misbehaving device
/// doesn't hide the others.
///
/// # Examples
///
/// ```
/// for res in viblib::enumerate()? {
///     let device = res?;
///     println!("{} ({:?})", device.name(), device.capabilities());
/// }
/// # Ok::<_, viblib::Error>(())
/// ```
pub fn enumerate() -> Result<Enumerate, Error> {
    Ok(Enumerate { imp: Impl::open()? })
}

/// Iterator over force-feedback devices.
///
/// Returned by [`enumerate`].
pub struct Enumerate {
    imp: Impl,
}

impl fmt::Debug for Enumerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enumerate").finish_non_exhaustive()
    }
}

impl Iterator for Enumerate {
    type Item = Result<Device, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.imp.next_device()
    }
}
