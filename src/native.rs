//! The native effect representation and its derivation from an [`EffectDescription`].
//!
//! [`NativeEffect`] is an owned, safe mirror of the ForceFeedback framework's `FFEFFECT`
//! structure. It is re-derived from the current [`EffectDescription`] whenever an effect is
//! created or updated, and lowered to the raw C structure only for the duration of a native call.

use std::{ffi::c_void, fmt, ptr};

use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    description::{Coordinates, EffectDescription, EffectParams, MAX_AXES},
    raw::ff::{
        FFEFF_CARTESIAN, FFEFF_OBJECTIDS, FFEFF_OBJECTOFFSETS, FFEFF_POLAR, FFEFF_SPHERICAL,
        FFCONSTANTFORCE, FFEFFECT, FFENVELOPE, FFEP_ALLPARAMS, FFEP_AXES, FFEP_DIRECTION, FFEP_DURATION,
        FFEP_ENVELOPE, FFEP_GAIN, FFEP_NODOWNLOAD, FFEP_NORESTART, FFEP_SAMPLEPERIOD,
        FFEP_START, FFEP_STARTDELAY, FFEP_TRIGGERBUTTON, FFEP_TRIGGERREPEATINTERVAL,
        FFEP_TYPESPECIFICPARAMS, FFES_NODOWNLOAD, FFES_SOLO, FFPERIODIC,
    },
};

/// Largest value of the abstract magnitude scale.
pub const ABSTRACT_MAX: i64 = 0x7FFF;
/// Largest value of the native magnitude scale (`FF_FFNOMINALMAX`).
pub const NATIVE_MAX: i64 = 10000;

/// Converts a value from the abstract `0..=32767` scale to the native `0..=10000` scale.
///
/// The result is truncated, and not clamped: inputs above 32767 map above 10000.
#[inline]
pub const fn convert(x: i64) -> i64 {
    x * NATIVE_MAX / ABSTRACT_MAX
}

/// Like [`convert`], but saturates at 10000 for inputs above 32767.
#[inline]
pub const fn cconvert(x: i64) -> i64 {
    if x > ABSTRACT_MAX {
        NATIVE_MAX
    } else {
        convert(x)
    }
}

/// Milliseconds to the framework's microseconds, wrapping like the 32-bit native fields.
#[inline]
fn ms_to_us(ms: u32) -> u32 {
    ms.wrapping_mul(1000)
}

bitflags! {
    /// `FFEFF_*` flags describing how axes and directions are interpreted.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
    pub struct EffectFlags: u32 {
        const OBJECT_IDS = FFEFF_OBJECTIDS;
        const OBJECT_OFFSETS = FFEFF_OBJECTOFFSETS;
        const CARTESIAN = FFEFF_CARTESIAN;
        const POLAR = FFEFF_POLAR;
        const SPHERICAL = FFEFF_SPHERICAL;
    }
}

bitflags! {
    /// `FFEP_*` flags selecting which parameters a parameter update applies.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
    pub struct ParamFlags: u32 {
        const DURATION = FFEP_DURATION;
        const SAMPLE_PERIOD = FFEP_SAMPLEPERIOD;
        const GAIN = FFEP_GAIN;
        const TRIGGER_BUTTON = FFEP_TRIGGERBUTTON;
        const TRIGGER_REPEAT_INTERVAL = FFEP_TRIGGERREPEATINTERVAL;
        const AXES = FFEP_AXES;
        const DIRECTION = FFEP_DIRECTION;
        const ENVELOPE = FFEP_ENVELOPE;
        const TYPE_SPECIFIC_PARAMS = FFEP_TYPESPECIFICPARAMS;
        const START_DELAY = FFEP_STARTDELAY;
        const START = FFEP_START;
        const NO_RESTART = FFEP_NORESTART;
        const NO_DOWNLOAD = FFEP_NODOWNLOAD;
    }
}

impl ParamFlags {
    /// All parameters (`FFEP_ALLPARAMS`).
    pub const ALL: Self = Self::from_bits_retain(FFEP_ALLPARAMS);

    /// The parameters pushed by [`Effect::update`].
    ///
    /// Gain and sample period are only applied when the effect is created.
    ///
    /// [`Effect::update`]: crate::Effect::update
    pub const UPDATE: Self = Self::from_bits_retain(
        FFEP_DIRECTION | FFEP_DURATION | FFEP_ENVELOPE | FFEP_STARTDELAY | FFEP_TYPESPECIFICPARAMS,
    );
}

bitflags! {
    /// `FFES_*` flags for starting an effect.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
    pub struct StartFlags: u32 {
        /// Stop all other effects on the device before starting this one.
        const SOLO = FFES_SOLO;
        /// Don't download the effect before starting it.
        const NO_DOWNLOAD = FFES_NODOWNLOAD;
    }
}

/// Type-specific block of a periodic effect, on the native scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativePeriodic {
    pub magnitude: u32,
    pub offset: i32,
    pub phase: u32,
    /// Period in microseconds.
    pub period: u32,
}

/// Type-specific block of a constant force, on the native scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeConstant {
    pub magnitude: i32,
}

/// Native envelope, levels on the `0..=10000` scale and times in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeEnvelope {
    pub attack_level: u32,
    pub attack_time: u32,
    pub fade_level: u32,
    pub fade_time: u32,
}

/// Owned mirror of `FFEFFECT`.
///
/// The axis and direction buffers are owned by this structure, and resized on every derivation so
/// that they always match the current device and description.
#[derive(Clone, PartialEq, Eq)]
pub struct NativeEffect {
    size: u32,
    flags: EffectFlags,
    duration: u32,
    sample_period: u32,
    gain: u32,
    trigger_button: u32,
    trigger_repeat_interval: u32,
    axes: Vec<u32>,
    direction: Option<Vec<i32>>,
    envelope: Option<NativeEnvelope>,
    periodic: Option<NativePeriodic>,
    constant: Option<NativeConstant>,
    start_delay: u32,
}

impl NativeEffect {
    /// Creates a zeroed effect structure with no buffers attached.
    pub fn new() -> Self {
        Self {
            size: 0,
            flags: EffectFlags::empty(),
            duration: 0,
            sample_period: 0,
            gain: 0,
            trigger_button: 0,
            trigger_repeat_interval: 0,
            axes: Vec::new(),
            direction: None,
            envelope: None,
            periodic: None,
            constant: None,
            start_delay: 0,
        }
    }

    /// Derives the native structure for `desc` on a device with the given axis identifiers.
    pub fn derive(desc: &EffectDescription, device_axes: &[u8]) -> Self {
        let mut this = Self::new();
        this.update(desc, device_axes);
        this
    }

    /// Re-derives every field from `desc`, reusing the existing buffers.
    ///
    /// `device_axes` are the force-feedback axes of the owning device; at most [`MAX_AXES`] of
    /// them are used.
    pub fn update(&mut self, desc: &EffectDescription, device_axes: &[u8]) {
        let params = &desc.params;
        self.size = size_of::<FFEFFECT>() as u32;
        self.sample_period = params.sample_period;
        self.gain = params.gain;
        self.flags = EffectFlags::OBJECT_OFFSETS;

        self.duration = ms_to_us(params.duration);
        self.start_delay = ms_to_us(params.delay);

        let n = device_axes.len().min(MAX_AXES);
        self.axes.clear();
        self.axes
            .extend(device_axes[..n].iter().map(|&axis| u32::from(axis)));

        if desc.effect_type.is_periodic() {
            let periodic = &desc.periodic;
            self.periodic = Some(NativePeriodic {
                magnitude: convert(i64::from(periodic.magnitude)) as u32,
                offset: convert(i64::from(periodic.offset)) as i32,
                phase: periodic.phase,
                period: ms_to_us(periodic.period),
            });
            self.constant = None;
            self.update_direction(params);
        } else {
            // Constant effects carry a force block but no direction.
            self.periodic = None;
            self.constant = Some(NativeConstant {
                magnitude: convert(i64::from(desc.constant.magnitude)) as i32,
            });
            self.direction = None;
        }

        self.envelope = if desc.envelope.is_flat() {
            None
        } else {
            let env = &desc.envelope;
            Some(NativeEnvelope {
                attack_level: convert(i64::from(env.attack_level)) as u32,
                attack_time: ms_to_us(env.attack_time),
                fade_level: convert(i64::from(env.fade_level)) as u32,
                fade_time: ms_to_us(env.fade_time),
            })
        };
    }

    fn update_direction(&mut self, params: &EffectParams) {
        if params.axis_count == 0 {
            self.flags |= EffectFlags::SPHERICAL;
            self.direction = None;
            return;
        }

        let n = (params.axis_count as usize).min(MAX_AXES);
        let dir = self.direction.get_or_insert_with(Vec::new);
        dir.clear();
        dir.resize(n, 0);

        match params.coordinates {
            Coordinates::POLAR => {
                self.flags |= EffectFlags::POLAR;
                dir[0] = params.axes[0];
            }
            Coordinates::CARTESIAN => {
                self.flags |= EffectFlags::CARTESIAN;
                dir.copy_from_slice(&params.axes[..n]);
            }
            Coordinates::SPHERICAL => {
                self.flags |= EffectFlags::SPHERICAL;
                dir.copy_from_slice(&params.axes[..n]);
            }
            other => {
                log::warn!("unknown direction coordinate system {other:?}; direction left zeroed");
            }
        }
    }

    /// Drops every buffer attached to this structure.
    pub fn clear_buffers(&mut self) {
        self.axes = Vec::new();
        self.direction = None;
        self.envelope = None;
        self.periodic = None;
        self.constant = None;
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn flags(&self) -> EffectFlags {
        self.flags
    }

    /// Duration in microseconds.
    #[inline]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    #[inline]
    pub fn sample_period(&self) -> u32 {
        self.sample_period
    }

    #[inline]
    pub fn gain(&self) -> u32 {
        self.gain
    }

    #[inline]
    pub fn trigger_button(&self) -> u32 {
        self.trigger_button
    }

    #[inline]
    pub fn trigger_repeat_interval(&self) -> u32 {
        self.trigger_repeat_interval
    }

    #[inline]
    pub fn axes(&self) -> &[u32] {
        &self.axes
    }

    /// The direction vector, or [`None`] if the effect has no direction.
    #[inline]
    pub fn direction(&self) -> Option<&[i32]> {
        self.direction.as_deref()
    }

    #[inline]
    pub fn envelope(&self) -> Option<&NativeEnvelope> {
        self.envelope.as_ref()
    }

    #[inline]
    pub fn periodic(&self) -> Option<&NativePeriodic> {
        self.periodic.as_ref()
    }

    #[inline]
    pub fn constant(&self) -> Option<&NativeConstant> {
        self.constant.as_ref()
    }

    /// Start delay in microseconds.
    #[inline]
    pub fn start_delay(&self) -> u32 {
        self.start_delay
    }

    /// Lowers this structure to a C `FFEFFECT` backed by freshly allocated buffers.
    pub(crate) fn to_raw(&self) -> RawEffect {
        let mut axes = self.axes.clone();

        // The framework reads `cAxes` direction entries whenever a direction is present.
        let mut direction = self.direction.clone().map(|mut dir| {
            if dir.len() < axes.len() {
                dir.resize(axes.len(), 0);
            }
            dir
        });

        let mut envelope = self.envelope.map(|env| {
            Box::new(FFENVELOPE {
                dwSize: size_of::<FFENVELOPE>() as u32,
                dwAttackLevel: env.attack_level,
                dwAttackTime: env.attack_time,
                dwFadeLevel: env.fade_level,
                dwFadeTime: env.fade_time,
            })
        });

        let mut periodic = self.periodic.map(|p| {
            Box::new(FFPERIODIC {
                dwMagnitude: p.magnitude,
                lOffset: p.offset,
                dwPhase: p.phase,
                dwPeriod: p.period,
            })
        });
        let mut constant = self.constant.map(|c| {
            Box::new(FFCONSTANTFORCE {
                lMagnitude: c.magnitude,
            })
        });

        let (type_specific_size, type_specific) = match (&mut periodic, &mut constant) {
            (Some(p), _) => (
                size_of::<FFPERIODIC>() as u32,
                ptr::from_mut(&mut **p).cast::<c_void>(),
            ),
            (None, Some(c)) => (
                size_of::<FFCONSTANTFORCE>() as u32,
                ptr::from_mut(&mut **c).cast::<c_void>(),
            ),
            (None, None) => (0, ptr::null_mut()),
        };

        let raw = FFEFFECT {
            dwSize: self.size,
            dwFlags: self.flags.bits(),
            dwDuration: self.duration,
            dwSamplePeriod: self.sample_period,
            dwGain: self.gain,
            dwTriggerButton: self.trigger_button,
            dwTriggerRepeatInterval: self.trigger_repeat_interval,
            cAxes: axes.len() as u32,
            rgdwAxes: if axes.is_empty() {
                ptr::null_mut()
            } else {
                axes.as_mut_ptr()
            },
            rglDirection: direction
                .as_mut()
                .map_or(ptr::null_mut(), |dir| dir.as_mut_ptr()),
            lpEnvelope: envelope
                .as_deref_mut()
                .map_or(ptr::null_mut(), |env| ptr::from_mut(env)),
            cbTypeSpecificParams: type_specific_size,
            lpvTypeSpecificParams: type_specific,
            dwStartDelay: self.start_delay,
        };

        RawEffect {
            raw,
            _axes: axes,
            _direction: direction,
            _envelope: envelope,
            _periodic: periodic,
            _constant: constant,
        }
    }
}

impl Default for NativeEffect {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NativeEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeEffect")
            .field("flags", &self.flags)
            .field("duration", &self.duration)
            .field("start_delay", &self.start_delay)
            .field("sample_period", &self.sample_period)
            .field("gain", &self.gain)
            .field("axes", &self.axes)
            .field("direction", &self.direction)
            .field("envelope", &self.envelope)
            .field("periodic", &self.periodic)
            .field("constant", &self.constant)
            .finish()
    }
}

/// A C `FFEFFECT` together with the buffers its pointers refer to.
///
/// Heap buffers don't move when this struct is moved, so the pointers stay valid for as long as
/// the [`RawEffect`] is alive.
pub(crate) struct RawEffect {
    raw: FFEFFECT,
    _axes: Vec<u32>,
    _direction: Option<Vec<i32>>,
    _envelope: Option<Box<FFENVELOPE>>,
    _periodic: Option<Box<FFPERIODIC>>,
    _constant: Option<Box<FFCONSTANTFORCE>>,
}

impl RawEffect {
    #[cfg_attr(not(target_os = "macos"), allow(dead_code))]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut FFEFFECT {
        &mut self.raw
    }

    #[cfg(test)]
    pub(crate) fn raw(&self) -> &FFEFFECT {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use std::slice;

    use super::*;
    use crate::description::{EffectType, Envelope};

    const DEVICE_AXES: &[u8] = &[0x30, 0x31];

    fn vibrate() -> EffectDescription {
        EffectDescription::periodic(EffectType::Sine, 10000, 1000).with_duration(2000)
    }

    #[test]
    fn conversion() {
        assert_eq!(convert(0), 0);
        assert_eq!(convert(32767), 10000);
        assert_eq!(convert(16384), 5000);
        assert_eq!(convert(10000), 3051);
        assert_eq!(convert(-32767), -10000);
        // not clamped
        assert_eq!(convert(65534), 20000);

        assert_eq!(cconvert(0), 0);
        assert_eq!(cconvert(16384), 5000);
        assert_eq!(cconvert(32767), 10000);
        assert_eq!(cconvert(32768), 10000);
        assert_eq!(cconvert(i64::from(u32::MAX)), 10000);
    }

    #[test]
    fn vibrate_scenario() {
        let native = NativeEffect::derive(&vibrate(), DEVICE_AXES);
        assert_eq!(native.size() as usize, size_of::<FFEFFECT>());
        assert!(native.flags().contains(EffectFlags::OBJECT_OFFSETS));
        assert!(native.flags().contains(EffectFlags::SPHERICAL));
        assert_eq!(native.direction(), None);
        assert_eq!(native.duration(), 2_000_000);

        let periodic = native.periodic().unwrap();
        assert_eq!(periodic.magnitude, 3051);
        assert_eq!(periodic.period, 1_000_000);
        assert_eq!(periodic.offset, 0);
    }

    #[test]
    fn timing_in_microseconds() {
        let desc = vibrate().with_duration(1234).with_delay(56);
        let native = NativeEffect::derive(&desc, &[]);
        assert_eq!(native.duration(), 1_234_000);
        assert_eq!(native.start_delay(), 56_000);
    }

    #[test]
    fn axes_follow_device() {
        let native = NativeEffect::derive(&vibrate(), &[1, 2, 3, 4]);
        assert_eq!(native.axes(), &[1, 2, 3]);

        let native = NativeEffect::derive(&vibrate(), DEVICE_AXES);
        assert_eq!(native.axes(), &[0x30, 0x31]);

        let mut native = NativeEffect::derive(&vibrate(), &[7]);
        assert_eq!(native.axes(), &[7]);
        native.update(&vibrate(), DEVICE_AXES);
        assert_eq!(native.axes(), &[0x30, 0x31]);
    }

    #[test]
    fn polar_uses_first_axis_only() {
        let desc = vibrate().with_direction(Coordinates::POLAR, &[9000, -10000, 5]);
        let native = NativeEffect::derive(&desc, DEVICE_AXES);
        assert!(native.flags().contains(EffectFlags::POLAR));
        assert!(!native.flags().contains(EffectFlags::SPHERICAL));
        assert_eq!(native.direction(), Some(&[9000, 0, 0][..]));
    }

    #[test]
    fn cartesian_and_spherical_fill_sequentially() {
        for (coords, flag) in [
            (Coordinates::CARTESIAN, EffectFlags::CARTESIAN),
            (Coordinates::SPHERICAL, EffectFlags::SPHERICAL),
        ] {
            let desc = vibrate().with_direction(coords, &[10, 20, 30]);
            let native = NativeEffect::derive(&desc, DEVICE_AXES);
            assert!(native.flags().contains(flag));
            assert_eq!(native.direction(), Some(&[10, 20, 30][..]));

            let desc = vibrate().with_direction(coords, &[10, 20]);
            let native = NativeEffect::derive(&desc, DEVICE_AXES);
            assert_eq!(native.direction(), Some(&[10, 20][..]));
        }

        // An out-of-range axis count is capped.
        let mut desc = vibrate().with_direction(Coordinates::CARTESIAN, &[1, 2, 3]);
        desc.params.axis_count = 17;
        let native = NativeEffect::derive(&desc, DEVICE_AXES);
        assert_eq!(native.direction(), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn direction_resized_on_update() {
        let mut native = NativeEffect::derive(
            &vibrate().with_direction(Coordinates::CARTESIAN, &[1, 2, 3]),
            DEVICE_AXES,
        );
        native.update(
            &vibrate().with_direction(Coordinates::SPHERICAL, &[4]),
            DEVICE_AXES,
        );
        assert_eq!(native.direction(), Some(&[4][..]));
        assert!(!native.flags().contains(EffectFlags::CARTESIAN));

        native.update(&vibrate(), DEVICE_AXES);
        assert_eq!(native.direction(), None);
        assert!(native.flags().contains(EffectFlags::SPHERICAL));
    }

    #[test]
    fn unknown_coordinates_leave_zeroed_direction() {
        let mut desc = vibrate().with_direction(Coordinates::CARTESIAN, &[5, 6]);
        desc.params.coordinates = Coordinates::from_raw(0x80);
        let native = NativeEffect::derive(&desc, DEVICE_AXES);
        assert_eq!(native.direction(), Some(&[0, 0][..]));
        assert_eq!(native.flags(), EffectFlags::OBJECT_OFFSETS);
    }

    #[test]
    fn constant_has_force_block_but_no_direction() {
        let desc = EffectDescription::constant(30000)
            .with_duration(1000)
            .with_direction(Coordinates::POLAR, &[0, -10000, 0]);
        let native = NativeEffect::derive(&desc, DEVICE_AXES);
        assert_eq!(native.constant(), Some(&NativeConstant { magnitude: 9155 }));
        assert_eq!(native.periodic(), None);
        assert_eq!(native.direction(), None);
        assert_eq!(native.flags(), EffectFlags::OBJECT_OFFSETS);
        assert_eq!(native.duration(), 1_000_000);

        let native = NativeEffect::derive(&EffectDescription::constant(-32767), &[]);
        assert_eq!(native.constant(), Some(&NativeConstant { magnitude: -10000 }));

        // Switching the type drops the stale type-specific block.
        let mut native = NativeEffect::derive(&vibrate(), DEVICE_AXES);
        native.update(&desc, DEVICE_AXES);
        assert_eq!(native.periodic(), None);
        assert!(native.constant().is_some());
        native.update(&vibrate(), DEVICE_AXES);
        assert_eq!(native.constant(), None);
        assert!(native.periodic().is_some());
    }

    #[test]
    fn envelope() {
        let native = NativeEffect::derive(&vibrate(), DEVICE_AXES);
        assert_eq!(native.envelope(), None);

        let desc = vibrate().with_envelope(Envelope {
            attack_time: 500,
            attack_level: 32767,
            fade_time: 1500,
            fade_level: 0,
        });
        let native = NativeEffect::derive(&desc, DEVICE_AXES);
        assert_eq!(
            native.envelope(),
            Some(&NativeEnvelope {
                attack_level: 10000,
                attack_time: 500_000,
                fade_level: 0,
                fade_time: 1_500_000,
            })
        );
    }

    #[test]
    fn clear_buffers_is_repeatable() {
        let desc = vibrate().with_direction(Coordinates::CARTESIAN, &[1, 2]);
        let mut native = NativeEffect::derive(&desc, DEVICE_AXES);
        native.clear_buffers();
        native.clear_buffers();
        assert!(native.axes().is_empty());
        assert_eq!(native.direction(), None);
        assert_eq!(native.periodic(), None);
    }

    #[test]
    fn flags() {
        let flags = EffectFlags::OBJECT_OFFSETS | EffectFlags::POLAR;
        assert_eq!(flags.bits(), FFEFF_OBJECTOFFSETS | FFEFF_POLAR);
        let debug = format!("{flags:?}");
        assert!(debug.contains("OBJECT_OFFSETS"), "{debug}");
        assert!(debug.contains("POLAR"), "{debug}");

        assert!(ParamFlags::ALL.contains(ParamFlags::UPDATE));
        assert!(ParamFlags::ALL.contains(ParamFlags::GAIN));
        assert!(ParamFlags::UPDATE.contains(ParamFlags::DIRECTION));
        assert!(!ParamFlags::UPDATE.contains(ParamFlags::GAIN));
        assert!(!ParamFlags::UPDATE.contains(ParamFlags::SAMPLE_PERIOD));
    }

    #[test]
    fn raw_layout() {
        let desc = vibrate()
            .with_direction(Coordinates::POLAR, &[9000])
            .with_envelope(Envelope {
                attack_time: 10,
                ..Envelope::default()
            });
        let native = NativeEffect::derive(&desc, DEVICE_AXES);
        let raw = native.to_raw();
        let raw = raw.raw();

        assert_eq!(raw.cAxes, 2);
        assert_eq!(raw.dwDuration, 2_000_000);
        assert_eq!(raw.cbTypeSpecificParams as usize, size_of::<FFPERIODIC>());
        unsafe {
            assert_eq!(slice::from_raw_parts(raw.rgdwAxes, 2), &[0x30, 0x31]);
            // padded to the device's axis count
            assert_eq!(slice::from_raw_parts(raw.rglDirection, 2), &[9000, 0]);
            assert_eq!((*raw.lpEnvelope).dwAttackTime, 10_000);
            let periodic = &*raw.lpvTypeSpecificParams.cast::<FFPERIODIC>();
            assert_eq!(periodic.dwMagnitude, 3051);
        }

        let native = NativeEffect::derive(&EffectDescription::constant(16384), &[]);
        let raw = native.to_raw();
        let raw = raw.raw();
        assert!(raw.rgdwAxes.is_null());
        assert!(raw.rglDirection.is_null());
        assert!(raw.lpEnvelope.is_null());
        assert_eq!(raw.cbTypeSpecificParams as usize, size_of::<FFCONSTANTFORCE>());
        unsafe {
            let constant = &*raw.lpvTypeSpecificParams.cast::<FFCONSTANTFORCE>();
            assert_eq!(constant.lMagnitude, 5000);
        }

        let mut native = native;
        native.clear_buffers();
        let raw = native.to_raw();
        assert!(raw.raw().lpvTypeSpecificParams.is_null());
        assert_eq!(raw.raw().cbTypeSpecificParams, 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn start_flags_serde() {
        let flags = StartFlags::SOLO | StartFlags::NO_DOWNLOAD;
        let bytes = postcard::to_allocvec(&flags).unwrap();
        let back: StartFlags = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(back, flags);
    }
}
