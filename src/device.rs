use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{
    description::{EffectDescription, EffectType, MAX_AXES},
    driver::FfDevice,
    effect::Effect,
    error::Error,
    raw::ff::{
        FFCAP_ET_CONSTANTFORCE, FFCAP_ET_SAWTOOTHDOWN, FFCAP_ET_SAWTOOTHUP, FFCAP_ET_SINE,
        FFCAP_ET_SQUARE, FFCAP_ET_TRIANGLE,
    },
};

/// Identifies a [`Device`] for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId(pub(crate) u64);

impl DeviceId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// HID usage of a device (eg. usage page `0x01` "Generic Desktop", usage `0x05` "Game Pad").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Usage {
    pub page: u32,
    pub usage: u32,
}

impl Usage {
    #[inline]
    pub const fn new(page: u32, usage: u32) -> Self {
        Self { page, usage }
    }
}

/// Force-feedback capabilities of a [`Device`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    storage_capacity: u32,
    playback_capacity: u32,
    axis_count: u32,
    axes: [u8; MAX_AXES],
    supported_effects: u32,
}

impl Capabilities {
    /// Creates a capability set for a device with the given force-feedback axes.
    ///
    /// Only the first [`MAX_AXES`] axis identifiers are retained, but [`Capabilities::axis_count`]
    /// reports the full count.
    pub fn new(storage_capacity: u32, playback_capacity: u32, axes: &[u8]) -> Self {
        let mut ids = [0; MAX_AXES];
        let n = axes.len().min(MAX_AXES);
        ids[..n].copy_from_slice(&axes[..n]);
        Self {
            storage_capacity,
            playback_capacity,
            axis_count: axes.len() as u32,
            axes: ids,
            supported_effects: 0,
        }
    }

    /// Sets the `FFCAP_ET_*` mask of supported effect types.
    #[inline]
    pub fn with_supported_effects(mut self, mask: u32) -> Self {
        self.supported_effects = mask;
        self
    }

    /// Number of effects that can be stored on the device at once.
    #[inline]
    pub fn storage_capacity(&self) -> u32 {
        self.storage_capacity
    }

    /// Number of effects that can play at the same time.
    #[inline]
    pub fn playback_capacity(&self) -> u32 {
        self.playback_capacity
    }

    /// Number of force-feedback axes reported by the device.
    #[inline]
    pub fn axis_count(&self) -> u32 {
        self.axis_count
    }

    /// The device's force-feedback axis identifiers, at most [`MAX_AXES`] of them.
    #[inline]
    pub fn axes(&self) -> &[u8] {
        &self.axes[..(self.axis_count as usize).min(MAX_AXES)]
    }

    /// The raw `FFCAP_ET_*` mask of supported effect types.
    #[inline]
    pub fn supported_effects(&self) -> u32 {
        self.supported_effects
    }

    /// Returns whether the device advertises support for `ty`.
    pub fn supports(&self, ty: EffectType) -> bool {
        let bit = match ty {
            EffectType::Sine => FFCAP_ET_SINE,
            EffectType::Square => FFCAP_ET_SQUARE,
            EffectType::Triangle => FFCAP_ET_TRIANGLE,
            EffectType::SawtoothUp => FFCAP_ET_SAWTOOTHUP,
            EffectType::SawtoothDown => FFCAP_ET_SAWTOOTHDOWN,
            EffectType::Constant => FFCAP_ET_CONSTANTFORCE,
        };
        self.supported_effects & bit != 0
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("storage_capacity", &self.storage_capacity)
            .field("playback_capacity", &self.playback_capacity)
            .field("axis_count", &self.axis_count)
            .field("axes", &self.axes())
            .field("supported_effects", &format_args!("{:#x}", self.supported_effects))
            .finish()
    }
}

/// A force-feedback capable device.
///
/// Devices are usually obtained via [`enumerate`]. Each device owns a set of named [`Effect`]s.
/// Effect names are unique per device.
///
/// Dropping the device unloads all of its effects. The native device is released once the device
/// and every [`Effect`] taken out of it are gone.
///
/// All operations take `&mut self`. To share a device between threads, wrap it in a
/// [`Mutex`][std::sync::Mutex].
///
/// [`enumerate`]: crate::enumerate()
pub struct Device {
    effects: HashMap<String, Effect>,
    id: DeviceId,
    name: String,
    usage: Usage,
    capabilities: Capabilities,
    driver: Box<dyn FfDevice>,
}

impl Device {
    /// Creates a [`Device`] backed by a custom native driver.
    pub fn with_driver(
        name: impl Into<String>,
        usage: Usage,
        capabilities: Capabilities,
        driver: impl FfDevice + 'static,
    ) -> Self {
        let this = Self {
            effects: HashMap::new(),
            id: DeviceId::next(),
            name: name.into(),
            usage,
            capabilities,
            driver: Box::new(driver),
        };
        log::debug!(
            "new device {:?} '{}': {:?}, {:?}",
            this.id,
            this.name,
            this.usage,
            this.capabilities
        );
        this
    }

    #[inline]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Returns the product name of the device.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn usage(&self) -> Usage {
        self.usage
    }

    #[inline]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Returns whether the device advertises support for effects of type `ty`.
    #[inline]
    pub fn supports(&self, ty: EffectType) -> bool {
        self.capabilities.supports(ty)
    }

    /// Creates a new effect called `name` and uploads it to the device.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DuplicateEffect`] if an effect with the same name already exists (the
    /// existing effect is left untouched), and with [`Error::Native`] if the device rejects the
    /// effect.
    pub fn create_effect(
        &mut self,
        name: impl Into<String>,
        description: EffectDescription,
    ) -> Result<&mut Effect, Error> {
        match self.effects.entry(name.into()) {
            Entry::Occupied(entry) => Err(Error::DuplicateEffect(entry.key().clone())),
            Entry::Vacant(entry) => {
                let effect = Effect::create(
                    self.id,
                    self.capabilities,
                    &mut *self.driver,
                    entry.key().clone(),
                    description,
                )?;
                Ok(entry.insert(effect))
            }
        }
    }

    /// Looks up an effect by name.
    #[inline]
    pub fn effect(&self, name: &str) -> Option<&Effect> {
        self.effects.get(name)
    }

    /// Looks up an effect by name, for starting or updating it.
    #[inline]
    pub fn effect_mut(&mut self, name: &str) -> Option<&mut Effect> {
        self.effects.get_mut(name)
    }

    fn require(&mut self, name: &str) -> Result<&mut Effect, Error> {
        self.effects
            .get_mut(name)
            .ok_or_else(|| Error::NoSuchEffect(name.to_owned()))
    }

    /// Removes an effect from the device's effect map without unloading it.
    ///
    /// The returned [`Effect`] stays loaded until it is dropped or passed to
    /// [`Device::remove_effect`], and may outlive the [`Device`].
    pub fn take_effect(&mut self, name: &str) -> Option<Effect> {
        self.effects.remove(name)
    }

    /// Unloads the effect called `name` and removes it from the device.
    ///
    /// Returns `Ok(false)` if no such effect exists.
    /// The effect is removed even if unloading it fails.
    pub fn delete_effect(&mut self, name: &str) -> Result<bool, Error> {
        match self.effects.remove(name) {
            Some(effect) => {
                self.remove_effect(effect)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Unloads an effect previously taken out of this device with [`Device::take_effect`].
    pub fn remove_effect(&mut self, mut effect: Effect) -> Result<(), Error> {
        if effect.device() != self.id {
            log::warn!(
                "effect '{}' belongs to {:?}, not {:?}",
                effect.name(),
                effect.device(),
                self.id
            );
        }
        log::debug!("deleting effect '{}' from '{}'", effect.name(), self.name);
        effect.release()
    }

    /// Applies a new description to the effect called `name`.
    ///
    /// If `description` has a different [`EffectType`] than the native effect, the effect is
    /// unloaded and created again under the same name, since native effects can't change their
    /// type. If that fails, the effect is gone.
    pub fn update_effect(
        &mut self,
        name: &str,
        description: EffectDescription,
    ) -> Result<(), Error> {
        let effect = self.require(name)?;
        if effect.native_type() == description.effect_type {
            return effect.update(description);
        }

        log::debug!(
            "recreating effect '{name}' as {:?} (was {:?})",
            description.effect_type,
            effect.native_type()
        );
        if let Some(mut old) = self.effects.remove(name) {
            old.release()?;
        }
        let effect = Effect::create(
            self.id,
            self.capabilities,
            &mut *self.driver,
            name.to_owned(),
            description,
        )?;
        self.effects.insert(name.to_owned(), effect);
        Ok(())
    }

    /// Plays the effect called `name` once.
    pub fn start_effect(&mut self, name: &str) -> Result<(), Error> {
        self.require(name)?.start()
    }

    /// Stops the effect called `name`.
    pub fn stop_effect(&mut self, name: &str) -> Result<(), Error> {
        self.require(name)?.stop()
    }

    /// Returns an iterator over the names of all effects on this device, in no particular order.
    pub fn effect_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.effects.keys().map(String::as_str)
    }

    pub fn effects(&self) -> impl Iterator<Item = &Effect> + '_ {
        self.effects.values()
    }

    #[inline]
    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        // Unload effects while the device is still open.
        for (name, mut effect) in self.effects.drain() {
            if let Err(e) = effect.release() {
                log::warn!("failed to release effect '{name}' of '{}': {e}", self.name);
            }
        }
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("capabilities", &self.capabilities)
            .field("effects", &self.effects.keys().collect::<Vec<_>>())
            .field("driver", &self.driver)
            .finish()
    }
}
