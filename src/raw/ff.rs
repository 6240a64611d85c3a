//! `ForceFeedback/ForceFeedback.h` and `ForceFeedbackConstants.h`

#![allow(dead_code)] // not every constant is exposed

use std::ffi::c_void;

pub type DWORD = u32;
pub type LONG = i32;
pub type HRESULT = i32;

pub type FFDeviceObjectReference = *mut c_void;
pub type FFEffectObjectReference = *mut c_void;

#[derive(Clone, Copy)]
#[repr(C)]
pub struct FFENVELOPE {
    pub dwSize: DWORD,
    pub dwAttackLevel: DWORD,
    pub dwAttackTime: DWORD,
    pub dwFadeLevel: DWORD,
    pub dwFadeTime: DWORD,
}

#[derive(Clone, Copy)]
#[repr(C)]
pub struct FFPERIODIC {
    pub dwMagnitude: DWORD,
    pub lOffset: LONG,
    pub dwPhase: DWORD,
    pub dwPeriod: DWORD,
}

#[derive(Clone, Copy)]
#[repr(C)]
pub struct FFCONSTANTFORCE {
    pub lMagnitude: LONG,
}

#[derive(Clone, Copy)]
#[repr(C)]
pub struct FFEFFECT {
    pub dwSize: DWORD,
    pub dwFlags: DWORD,
    pub dwDuration: DWORD,
    pub dwSamplePeriod: DWORD,
    pub dwGain: DWORD,
    pub dwTriggerButton: DWORD,
    pub dwTriggerRepeatInterval: DWORD,
    pub cAxes: DWORD,
    pub rgdwAxes: *mut DWORD,
    pub rglDirection: *mut LONG,
    pub lpEnvelope: *mut FFENVELOPE,
    pub cbTypeSpecificParams: DWORD,
    pub lpvTypeSpecificParams: *mut c_void,
    pub dwStartDelay: DWORD,
}

#[derive(Clone, Copy)]
#[repr(C)]
pub struct NumVersion {
    pub nonRelRev: u8,
    pub stage: u8,
    pub minorAndBugRev: u8,
    pub majorRev: u8,
}

#[derive(Clone, Copy)]
#[repr(C)]
pub struct FFCAPABILITIES {
    pub ffSpecVer: NumVersion,
    pub supportedEffects: u32,
    pub emulatedEffects: u32,
    pub subType: u32,
    pub numFfAxes: u32,
    pub ffAxes: [u8; 32],
    pub storageCapacity: u32,
    pub playbackCapacity: u32,
    pub firmwareVer: NumVersion,
    pub hardwareVer: NumVersion,
    pub driverVer: NumVersion,
}

pub const FF_OK: HRESULT = 0;
pub const FF_FALSE: HRESULT = 1;
pub const FF_DOWNLOADSKIPPED: HRESULT = 3;
pub const FF_EFFECTRESTARTED: HRESULT = 4;
pub const FF_TRUNCATED: HRESULT = 8;
pub const FF_TRUNCATEDANDRESTARTED: HRESULT = 0xC;

pub const FFERR_DEVICENOTREG: HRESULT = 0x80040154_u32 as HRESULT;
pub const FFERR_DEVICEFULL: HRESULT = 0x80040201_u32 as HRESULT;
pub const FFERR_MOREDATA: HRESULT = 0x80040202_u32 as HRESULT;
pub const FFERR_NOTDOWNLOADED: HRESULT = 0x80040203_u32 as HRESULT;
pub const FFERR_HASEFFECTS: HRESULT = 0x80040204_u32 as HRESULT;
pub const FFERR_INCOMPLETEEFFECT: HRESULT = 0x80040206_u32 as HRESULT;
pub const FFERR_EFFECTPLAYING: HRESULT = 0x80040208_u32 as HRESULT;
pub const FFERR_UNPLUGGED: HRESULT = 0x80040209_u32 as HRESULT;
pub const FFERR_INVALIDDOWNLOADID: HRESULT = 0x80040300_u32 as HRESULT;
pub const FFERR_DEVICEPAUSED: HRESULT = 0x80040301_u32 as HRESULT;
pub const FFERR_INTERNAL: HRESULT = 0x80040302_u32 as HRESULT;
pub const FFERR_EFFECTTYPEMISMATCH: HRESULT = 0x80040303_u32 as HRESULT;
pub const FFERR_UNSUPPORTEDAXIS: HRESULT = 0x80040304_u32 as HRESULT;
pub const FFERR_NOTINITIALIZED: HRESULT = 0x80040305_u32 as HRESULT;
pub const FFERR_EFFECTTYPENOTSUPPORTED: HRESULT = 0x80040306_u32 as HRESULT;
pub const FFERR_DEVICERELEASED: HRESULT = 0x80040307_u32 as HRESULT;
pub const FFERR_UNSUPPORTED: HRESULT = 0x80004001_u32 as HRESULT;
pub const FFERR_NOINTERFACE: HRESULT = 0x80004002_u32 as HRESULT;
pub const FFERR_GENERIC: HRESULT = 0x80004005_u32 as HRESULT;
pub const FFERR_OUTOFMEMORY: HRESULT = 0x8007000E_u32 as HRESULT;
pub const FFERR_INVALIDPARAM: HRESULT = 0x80070057_u32 as HRESULT;

pub const FFEFF_OBJECTIDS: DWORD = 0x01;
pub const FFEFF_OBJECTOFFSETS: DWORD = 0x02;
pub const FFEFF_CARTESIAN: DWORD = 0x10;
pub const FFEFF_POLAR: DWORD = 0x20;
pub const FFEFF_SPHERICAL: DWORD = 0x40;

pub const FFEP_DURATION: DWORD = 0x01;
pub const FFEP_SAMPLEPERIOD: DWORD = 0x02;
pub const FFEP_GAIN: DWORD = 0x04;
pub const FFEP_TRIGGERBUTTON: DWORD = 0x08;
pub const FFEP_TRIGGERREPEATINTERVAL: DWORD = 0x10;
pub const FFEP_AXES: DWORD = 0x20;
pub const FFEP_DIRECTION: DWORD = 0x40;
pub const FFEP_ENVELOPE: DWORD = 0x80;
pub const FFEP_TYPESPECIFICPARAMS: DWORD = 0x100;
pub const FFEP_STARTDELAY: DWORD = 0x200;
pub const FFEP_ALLPARAMS: DWORD = 0x3FF;
pub const FFEP_START: DWORD = 0x20000000;
pub const FFEP_NORESTART: DWORD = 0x40000000;
pub const FFEP_NODOWNLOAD: DWORD = 0x80000000;

pub const FFES_SOLO: DWORD = 0x01;
pub const FFES_NODOWNLOAD: DWORD = 0x80000000;

pub const FF_INFINITE: DWORD = 0xFFFFFFFF;
pub const FF_DEGREES: DWORD = 100;
pub const FF_FFNOMINALMAX: DWORD = 10000;
pub const FF_SECONDS: DWORD = 1000000;

pub const FFCAP_ET_CONSTANTFORCE: u32 = 0x00000001;
pub const FFCAP_ET_RAMPFORCE: u32 = 0x00000002;
pub const FFCAP_ET_SQUARE: u32 = 0x00000004;
pub const FFCAP_ET_SINE: u32 = 0x00000008;
pub const FFCAP_ET_TRIANGLE: u32 = 0x00000010;
pub const FFCAP_ET_SAWTOOTHUP: u32 = 0x00000020;
pub const FFCAP_ET_SAWTOOTHDOWN: u32 = 0x00000040;
pub const FFCAP_ET_SPRING: u32 = 0x00000080;
pub const FFCAP_ET_DAMPER: u32 = 0x00000100;
pub const FFCAP_ET_INERTIA: u32 = 0x00000200;
pub const FFCAP_ET_FRICTION: u32 = 0x00000400;
pub const FFCAP_ET_CUSTOMFORCE: u32 = 0x00000800;

/// UUID bytes of the `kFFEffectType_*_ID` constants.
///
/// All effect type UUIDs share the prefix `E559C46x-C5CD-11D6-8A1C-00039353BD00`.
const fn effect_type_uuid(low: u8) -> [u8; 16] {
    [
        0xE5, 0x59, 0xC4, low, 0xC5, 0xCD, 0x11, 0xD6, 0x8A, 0x1C, 0x00, 0x03, 0x93, 0x53, 0xBD,
        0x00,
    ]
}

pub const kFFEffectType_ConstantForce_ID: [u8; 16] = effect_type_uuid(0x60);
pub const kFFEffectType_RampForce_ID: [u8; 16] = effect_type_uuid(0x61);
pub const kFFEffectType_Square_ID: [u8; 16] = effect_type_uuid(0x62);
pub const kFFEffectType_Sine_ID: [u8; 16] = effect_type_uuid(0x63);
pub const kFFEffectType_Triangle_ID: [u8; 16] = effect_type_uuid(0x64);
pub const kFFEffectType_SawtoothUp_ID: [u8; 16] = effect_type_uuid(0x65);
pub const kFFEffectType_SawtoothDown_ID: [u8; 16] = effect_type_uuid(0x66);

#[cfg(target_os = "macos")]
#[link(name = "ForceFeedback", kind = "framework")]
unsafe extern "C" {
    pub fn FFIsForceFeedback(hidDevice: libc::mach_port_t) -> HRESULT;
    pub fn FFCreateDevice(
        hidDevice: libc::mach_port_t,
        pDeviceReference: *mut FFDeviceObjectReference,
    ) -> HRESULT;
    pub fn FFReleaseDevice(deviceReference: FFDeviceObjectReference) -> HRESULT;
    pub fn FFDeviceGetForceFeedbackCapabilities(
        deviceReference: FFDeviceObjectReference,
        pFFDeviceCaps: *mut FFCAPABILITIES,
    ) -> HRESULT;
    pub fn FFDeviceCreateEffect(
        deviceReference: FFDeviceObjectReference,
        uuidRef: *const c_void,
        pEffectDefinition: *mut FFEFFECT,
        pEffectReference: *mut FFEffectObjectReference,
    ) -> HRESULT;
    pub fn FFDeviceReleaseEffect(
        deviceReference: FFDeviceObjectReference,
        effectReference: FFEffectObjectReference,
    ) -> HRESULT;
    pub fn FFEffectSetParameters(
        effectReference: FFEffectObjectReference,
        pEffectDefinition: *mut FFEFFECT,
        flags: DWORD,
    ) -> HRESULT;
    pub fn FFEffectStart(
        effectReference: FFEffectObjectReference,
        iterations: DWORD,
        flags: DWORD,
    ) -> HRESULT;
    pub fn FFEffectStop(effectReference: FFEffectObjectReference) -> HRESULT;
    pub fn FFEffectUnload(effectReference: FFEffectObjectReference) -> HRESULT;
}
