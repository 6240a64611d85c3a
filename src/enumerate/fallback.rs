use crate::{Device, error::Error};

use super::EnumerateImpl;

#[allow(dead_code)]
pub struct Impl {
    _p: (),
}

impl EnumerateImpl for Impl {
    fn open() -> Result<Self, Error> {
        log::warn!("force feedback is not supported on this platform; no devices will be found");
        Ok(Self { _p: () })
    }

    fn next_device(&mut self) -> Option<Result<Device, Error>> {
        None
    }
}
