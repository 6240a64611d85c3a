#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod macros;

#[cfg(test)]
mod test;

mod description;
mod device;
pub mod driver;
mod effect;
pub mod enumerate;
mod error;
#[cfg(target_os = "macos")]
mod macos;
pub mod native;
mod raw;

pub use description::{
    Constant, Coordinates, EffectDescription, EffectParams, EffectType, Envelope, MAX_AXES,
    Periodic,
};
pub use device::{Capabilities, Device, DeviceId, Usage};
pub use effect::Effect;
#[doc(inline)]
pub use enumerate::enumerate;
pub use error::{Error, Operation};
pub use native::{StartFlags, cconvert, convert};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send() {
        fn assert<T: Send>() {}

        assert::<Device>();
        assert::<Effect>();
        assert::<Error>();
        assert::<enumerate::Enumerate>();
    }

    /// Creates, updates, starts and deletes an effect through the public API only.
    #[test]
    fn session() -> Result<(), Error> {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut device = Device::with_driver(
            "Mock Pad",
            Usage::new(0x01, 0x05),
            Capabilities::new(4, 2, &[0x30]),
            test::MockDevice::new(),
        );

        let desc = EffectDescription::periodic(EffectType::Sine, 10000, 1000)
            .with_duration(2000)
            .with_envelope(Envelope {
                attack_time: 500,
                attack_level: 0,
                fade_time: 1500,
                fade_level: 0,
            });
        device.create_effect("vibrate", desc)?.start()?;

        let effect = device.effect_mut("vibrate").expect("effect was just created");
        let mut desc = *effect.description();
        desc.periodic.magnitude = 20000;
        effect.update(desc)?;
        effect.start()?;

        assert!(device.delete_effect("vibrate")?);
        assert!(device.effect("vibrate").is_none());
        assert_eq!(device.effect_count(), 0);
        Ok(())
    }
}
