//! Descriptive effect model.
//!
//! An [`EffectDescription`] is a plain value describing *what* an effect should feel like. It is
//! translated into the native ForceFeedback representation by the [`native`] module whenever an
//! effect is created or updated.
//!
//! Magnitudes, offsets and envelope levels use an abstract `0..=32767` scale (the same scale as
//! the `evdev` and SDL haptic APIs), which is converted to the framework's `0..=10000` scale.
//! Durations, delays and periods are given in milliseconds.
//!
//! [`native`]: crate::native

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::raw::ff::{FFEFF_CARTESIAN, FFEFF_POLAR, FFEFF_SPHERICAL};

/// The maximum number of direction axes an effect can describe.
pub const MAX_AXES: usize = 3;

/// The kind of waveform or force an effect produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EffectType {
    #[default]
    Sine,
    Square,
    Triangle,
    SawtoothUp,
    SawtoothDown,
    Constant,
}

impl EffectType {
    /// Returns whether this effect type is parameterized by a [`Periodic`] block.
    #[inline]
    pub fn is_periodic(self) -> bool {
        matches!(
            self,
            Self::Sine | Self::Square | Self::Triangle | Self::SawtoothUp | Self::SawtoothDown
        )
    }
}

ffi_enum! {
    /// Coordinate system used to interpret the direction axes of an effect.
    ///
    /// The values are the native `FFEFF_*` flags. Any other value is accepted, but results in a
    /// zeroed direction vector.
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub enum Coordinates: u32 {
        CARTESIAN = FFEFF_CARTESIAN,
        /// Only the first axis is used, and holds an angle in hundredths of a degree.
        POLAR     = FFEFF_POLAR,
        SPHERICAL = FFEFF_SPHERICAL,
    }
}

impl Default for Coordinates {
    #[inline]
    fn default() -> Self {
        Self::CARTESIAN
    }
}

impl fmt::Debug for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant_name() {
            Some(name) => write!(f, "FFEFF_{name}"),
            None => write!(f, "Coordinates({:#x})", self.0),
        }
    }
}

/// Parameters of a periodic waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Periodic {
    /// Waveform amplitude, `0..=32767`.
    pub magnitude: u32,
    /// Vertical offset of the waveform, `-32767..=32767`.
    pub offset: i32,
    /// Phase at which playback starts, in hundredths of a degree.
    pub phase: u32,
    /// Waveform period in milliseconds.
    pub period: u32,
}

/// Parameters of a constant force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Constant {
    /// Signed magnitude on the abstract `-32767..=32767` scale.
    pub magnitude: i32,
}

/// Generic effect parameters shared by all effect types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EffectParams {
    /// Effect duration in milliseconds.
    pub duration: u32,
    /// Delay before playback starts, in milliseconds.
    pub delay: u32,
    /// Sample period in microseconds; 0 selects the device default.
    pub sample_period: u32,
    /// Effect gain, `0..=10000`.
    pub gain: u32,
    pub coordinates: Coordinates,
    /// Direction values, interpreted according to [`EffectParams::coordinates`].
    pub axes: [i32; MAX_AXES],
    /// Number of valid entries in [`EffectParams::axes`].
    ///
    /// 0 means the effect has no direction.
    pub axis_count: u32,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            duration: 0,
            delay: 0,
            sample_period: 0,
            gain: 10000,
            coordinates: Coordinates::default(),
            axes: [0; MAX_AXES],
            axis_count: 0,
        }
    }
}

/// An effect envelope.
///
/// Levels are relative to the effect's magnitude, on the `0..=32767` scale. Times are in
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Envelope {
    pub attack_time: u32,
    pub attack_level: u32,
    pub fade_time: u32,
    pub fade_level: u32,
}

impl Envelope {
    /// Returns whether this envelope leaves the effect unshaped.
    #[inline]
    pub fn is_flat(&self) -> bool {
        *self == Self::default()
    }
}

/// A complete description of a force-feedback effect.
///
/// # Examples
///
/// ```
/// use viblib::{EffectDescription, EffectType, Envelope};
///
/// let desc = EffectDescription::periodic(EffectType::Sine, 10000, 1000)
///     .with_duration(2000)
///     .with_envelope(Envelope {
///         attack_time: 500,
///         fade_time: 1500,
///         ..Envelope::default()
///     });
/// assert!(desc.effect_type.is_periodic());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EffectDescription {
    pub effect_type: EffectType,
    pub periodic: Periodic,
    pub constant: Constant,
    pub params: EffectParams,
    pub envelope: Envelope,
}

impl EffectDescription {
    /// Creates a periodic effect with the given waveform, magnitude and period (in ms).
    pub fn periodic(effect_type: EffectType, magnitude: u32, period: u32) -> Self {
        Self {
            effect_type,
            periodic: Periodic {
                magnitude,
                period,
                ..Periodic::default()
            },
            ..Self::default()
        }
    }

    /// Creates a constant force effect.
    pub fn constant(magnitude: i32) -> Self {
        Self {
            effect_type: EffectType::Constant,
            constant: Constant { magnitude },
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_type(mut self, effect_type: EffectType) -> Self {
        self.effect_type = effect_type;
        self
    }

    /// Effect will play for `ms` milliseconds.
    #[inline]
    pub fn with_duration(mut self, ms: u32) -> Self {
        self.params.duration = ms;
        self
    }

    /// Effect playback will start `ms` milliseconds after it is started.
    #[inline]
    pub fn with_delay(mut self, ms: u32) -> Self {
        self.params.delay = ms;
        self
    }

    #[inline]
    pub fn with_gain(mut self, gain: u32) -> Self {
        self.params.gain = gain;
        self
    }

    #[inline]
    pub fn with_sample_period(mut self, us: u32) -> Self {
        self.params.sample_period = us;
        self
    }

    #[inline]
    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }

    /// Sets the effect direction.
    ///
    /// At most [`MAX_AXES`] values are used; any further values are ignored.
    pub fn with_direction(mut self, coordinates: Coordinates, axes: &[i32]) -> Self {
        let n = axes.len().min(MAX_AXES);
        self.params.coordinates = coordinates;
        self.params.axes = [0; MAX_AXES];
        self.params.axes[..n].copy_from_slice(&axes[..n]);
        self.params.axis_count = n as u32;
        self
    }
}
