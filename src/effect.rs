use std::fmt;

use crate::{
    device::{Capabilities, DeviceId},
    description::{EffectDescription, EffectType},
    driver::{FfDevice, FfEffect},
    error::{Error, Operation},
    native::{NativeEffect, ParamFlags, StartFlags},
};

/// A force-feedback effect registered with a [`Device`].
///
/// Effects are created with [`Device::create_effect`] and live in the device's effect map,
/// where they can be looked up by name. Dropping an [`Effect`] (or deleting it via
/// [`Device::delete_effect`]) unloads it from the device.
///
/// [`Device`]: crate::Device
/// [`Device::create_effect`]: crate::Device::create_effect
/// [`Device::delete_effect`]: crate::Device::delete_effect
pub struct Effect {
    name: String,
    device: DeviceId,
    capabilities: Capabilities,
    /// The effect type the native effect was created with. Native effects can't change type.
    native_type: EffectType,
    description: EffectDescription,
    native: NativeEffect,
    handle: Option<Box<dyn FfEffect>>,
}

impl Effect {
    /// Derives the native effect for `description` and registers it with `driver`.
    pub(crate) fn create(
        device: DeviceId,
        capabilities: Capabilities,
        driver: &mut dyn FfDevice,
        name: String,
        description: EffectDescription,
    ) -> Result<Self, Error> {
        let native = NativeEffect::derive(&description, capabilities.axes());
        log::trace!("creating effect '{name}': {native:?}");

        let handle = driver
            .create_effect(description.effect_type, &native)
            .map_err(Error::native(Operation::CreateEffect))?;
        log::debug!(
            "created {:?} effect '{name}' on {device:?}",
            description.effect_type
        );

        Ok(Self {
            name,
            device,
            capabilities,
            native_type: description.effect_type,
            description,
            native,
            handle: Some(handle),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ID of the [`Device`] this effect was created on.
    ///
    /// [`Device`]: crate::Device
    #[inline]
    pub fn device(&self) -> DeviceId {
        self.device
    }

    /// Returns the description most recently applied to this effect.
    #[inline]
    pub fn description(&self) -> &EffectDescription {
        &self.description
    }

    /// Returns the native structure derived from [`Effect::description`].
    #[inline]
    pub fn native(&self) -> &NativeEffect {
        &self.native
    }

    /// Returns the effect type the native effect was created with.
    ///
    /// This can differ from the type in [`Effect::description`] if [`Effect::update`] was called
    /// with a different type.
    #[inline]
    pub fn native_type(&self) -> EffectType {
        self.native_type
    }

    /// Returns whether the effect is still loaded on the device.
    ///
    /// This is `false` after [`Effect::release`] has been called.
    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    fn handle(&mut self) -> Result<&mut dyn FfEffect, Error> {
        match &mut self.handle {
            Some(handle) => Ok(&mut **handle),
            None => Err(Error::Unloaded(self.name.clone())),
        }
    }

    /// Plays the effect once.
    pub fn start(&mut self) -> Result<(), Error> {
        self.start_with(1, StartFlags::empty())
    }

    /// Plays the effect `iterations` times.
    ///
    /// Pass [`u32::MAX`] (`FF_INFINITE`) to repeat the effect until it is stopped.
    pub fn start_with(&mut self, iterations: u32, flags: StartFlags) -> Result<(), Error> {
        log::debug!("starting effect '{}' ({iterations}x, {flags:?})", self.name);
        self.handle()?
            .start(iterations, flags)
            .map_err(Error::native(Operation::Start))
    }

    pub fn stop(&mut self) -> Result<(), Error> {
        log::debug!("stopping effect '{}'", self.name);
        self.handle()?
            .stop()
            .map_err(Error::native(Operation::Stop))
    }

    /// Replaces the effect's description and pushes the new parameters to the device.
    ///
    /// Only direction, duration, envelope, start delay and the type-specific parameters are
    /// updated. Gain and sample period keep the values the effect was created with.
    ///
    /// If the device rejects the new parameters, the effect keeps its previous description.
    ///
    /// The native effect type is fixed at creation time. Use [`Device::update_effect`] to change
    /// the type of an effect, which recreates it if necessary.
    ///
    /// [`Device::update_effect`]: crate::Device::update_effect
    pub fn update(&mut self, description: EffectDescription) -> Result<(), Error> {
        if description.effect_type != self.native_type {
            log::warn!(
                "effect '{}' was created as {:?}, updating it as {:?} may be rejected",
                self.name,
                self.native_type,
                description.effect_type,
            );
        }

        // Fail before touching any state if the effect is gone.
        self.handle()?;

        let previous = (self.description, self.native.clone());
        self.description = description;
        self.native.update(&self.description, self.capabilities.axes());
        log::trace!("updating effect '{}': {:?}", self.name, self.native);

        let res = match &mut self.handle {
            Some(handle) => handle.set_parameters(&self.native, ParamFlags::UPDATE),
            None => Ok(()),
        };
        if let Err(status) = res {
            (self.description, self.native) = previous;
            return Err(Error::native(Operation::SetParameters)(status));
        }
        Ok(())
    }

    /// Unloads the effect from the device and drops its native buffers.
    ///
    /// This is idempotent: once the effect has been released, further calls do nothing and
    /// return `Ok(())`. The native handle is released even if unloading fails.
    pub fn release(&mut self) -> Result<(), Error> {
        self.native.clear_buffers();

        let Some(mut handle) = self.handle.take() else {
            return Ok(());
        };
        log::debug!("unloading effect '{}'", self.name);
        handle.unload().map_err(Error::native(Operation::Unload))
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::warn!("failed to release effect '{}': {e}", self.name);
        }
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect")
            .field("name", &self.name)
            .field("device", &self.device)
            .field("native_type", &self.native_type)
            .field("loaded", &self.is_loaded())
            .field("description", &self.description)
            .field("native", &self.native)
            .finish()
    }
}
