//! The IOKit / ForceFeedback backend.

use std::{
    ffi::{CStr, c_void},
    fmt, ptr,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    description::EffectType,
    device::{Capabilities, Device, Usage},
    driver::{FfDevice, FfEffect, Status},
    enumerate::EnumerateImpl,
    error::{Error, Operation},
    native::{NativeEffect, ParamFlags, StartFlags},
    raw::{ff::*, iokit::*},
};

/// An owned IOKit object reference, released on drop.
struct IoObject(io_object_t);

impl Drop for IoObject {
    fn drop(&mut self) {
        unsafe {
            IOObjectRelease(self.0);
        }
    }
}

/// An owned CoreFoundation object, released on drop.
struct CfObject(CFTypeRef);

impl CfObject {
    /// Takes ownership of `obj`, which must come from a *Create* or *Copy* function.
    fn new(obj: CFTypeRef) -> Option<Self> {
        if obj.is_null() { None } else { Some(Self(obj)) }
    }
}

impl Drop for CfObject {
    fn drop(&mut self) {
        unsafe {
            CFRelease(self.0);
        }
    }
}

fn cf_string(s: &CStr) -> Option<CfObject> {
    CfObject::new(unsafe {
        CFStringCreateWithCString(kCFAllocatorDefault, s.as_ptr(), kCFStringEncodingUTF8)
    })
}

fn property(service: &IoObject, key: &[u8]) -> Option<CfObject> {
    let key = CStr::from_bytes_with_nul(key).ok()?;
    let key = cf_string(key)?;
    CfObject::new(unsafe {
        IORegistryEntryCreateCFProperty(service.0, key.0, kCFAllocatorDefault, 0)
    })
}

fn string_property(service: &IoObject, key: &[u8]) -> Option<String> {
    let value = property(service, key)?;
    unsafe {
        if CFGetTypeID(value.0) != CFStringGetTypeID() {
            return None;
        }
        let len = CFStringGetLength(value.0);
        let cap = CFStringGetMaximumSizeForEncoding(len, kCFStringEncodingUTF8) + 1;
        let mut buf = vec![0u8; usize::try_from(cap).ok()?];
        if CFStringGetCString(value.0, buf.as_mut_ptr().cast(), cap, kCFStringEncodingUTF8) == 0 {
            return None;
        }
        let s = CStr::from_bytes_until_nul(&buf).ok()?;
        Some(s.to_string_lossy().into_owned())
    }
}

fn number_property(service: &IoObject, key: &[u8]) -> Option<i64> {
    let value = property(service, key)?;
    unsafe {
        if CFGetTypeID(value.0) != CFNumberGetTypeID() {
            return None;
        }
        let mut out = 0i64;
        let ok = CFNumberGetValue(
            value.0,
            kCFNumberSInt64Type,
            ptr::from_mut(&mut out).cast::<c_void>(),
        );
        (ok != 0).then_some(out)
    }
}

/// Iterates over IOKit HID services that support force feedback.
pub(crate) struct Services {
    iter: IoObject,
}

impl EnumerateImpl for Services {
    fn open() -> Result<Self, Error> {
        unsafe {
            let matching = IOServiceMatching(kIOHIDDeviceKey.as_ptr().cast());
            if matching.is_null() {
                return Err(Error::Kern {
                    call: "IOServiceMatching",
                    code: -1,
                });
            }
            let mut iter: io_iterator_t = MACH_PORT_NULL;
            // consumes `matching`
            let ret = IOServiceGetMatchingServices(kIOMainPortDefault, matching, &mut iter);
            if ret != KERN_SUCCESS {
                return Err(Error::Kern {
                    call: "IOServiceGetMatchingServices",
                    code: ret,
                });
            }
            Ok(Self {
                iter: IoObject(iter),
            })
        }
    }

    fn next_device(&mut self) -> Option<Result<Device, Error>> {
        loop {
            let service = unsafe { IOIteratorNext(self.iter.0) };
            if service == MACH_PORT_NULL {
                return None;
            }
            let service = IoObject(service);

            let ret = unsafe { FFIsForceFeedback(service.0) };
            if ret != FF_OK {
                log::trace!(
                    "skipping HID service {:#x}: {:?}",
                    service.0,
                    Status::from_raw(ret)
                );
                continue;
            }

            return Some(open_device(service));
        }
    }
}

fn open_device(service: IoObject) -> Result<Device, Error> {
    let name = string_property(&service, kIOHIDProductKey).unwrap_or_else(|| {
        log::debug!("HID service {:#x} has no product name", service.0);
        String::from("Unknown Device")
    });
    let usage = Usage::new(
        number_property(&service, kIOHIDPrimaryUsagePageKey).unwrap_or(0) as u32,
        number_property(&service, kIOHIDPrimaryUsageKey).unwrap_or(0) as u32,
    );

    let mut raw: FFDeviceObjectReference = ptr::null_mut();
    Status::from_raw(unsafe { FFCreateDevice(service.0, &mut raw) })
        .check()
        .map_err(Error::native(Operation::CreateDevice))?;
    let device = DeviceRef {
        raw,
        _service: service,
    };

    let mut caps: FFCAPABILITIES = unsafe { std::mem::zeroed() };
    Status::from_raw(unsafe { FFDeviceGetForceFeedbackCapabilities(device.raw, &mut caps) })
        .check()
        .map_err(Error::native(Operation::QueryCapabilities))?;
    let axis_count = (caps.numFfAxes as usize).min(caps.ffAxes.len());
    let capabilities = Capabilities::new(
        caps.storageCapacity,
        caps.playbackCapacity,
        &caps.ffAxes[..axis_count],
    )
    .with_supported_effects(caps.supportedEffects);

    let driver = MacDevice {
        device: Arc::new(Mutex::new(device)),
    };
    Ok(Device::with_driver(name, usage, capabilities, driver))
}

fn effect_type_uuid(ty: EffectType) -> CFUUIDRef {
    let b = match ty {
        EffectType::Sine => kFFEffectType_Sine_ID,
        EffectType::Square => kFFEffectType_Square_ID,
        EffectType::Triangle => kFFEffectType_Triangle_ID,
        EffectType::SawtoothUp => kFFEffectType_SawtoothUp_ID,
        EffectType::SawtoothDown => kFFEffectType_SawtoothDown_ID,
        EffectType::Constant => kFFEffectType_ConstantForce_ID,
    };
    // Constant UUIDs are cached by CoreFoundation and must not be released.
    unsafe {
        CFUUIDGetConstantUUIDWithBytes(
            kCFAllocatorSystemDefault,
            b[0],
            b[1],
            b[2],
            b[3],
            b[4],
            b[5],
            b[6],
            b[7],
            b[8],
            b[9],
            b[10],
            b[11],
            b[12],
            b[13],
            b[14],
            b[15],
        )
    }
}

/// An `FFDeviceObjectReference` and the HID service it was created from.
///
/// Released when the last [`MacDevice`] or [`MacEffect`] referring to it is dropped, so effects
/// taken out of a [`Device`] stay valid after the device itself is gone.
struct DeviceRef {
    raw: FFDeviceObjectReference,
    _service: IoObject,
}

// Safety: the ForceFeedback API may be called from any thread, as long as calls on one device are
// not concurrent. Shared access goes through the `Mutex` in `SharedDevice`.
unsafe impl Send for DeviceRef {}

impl Drop for DeviceRef {
    fn drop(&mut self) {
        let status = Status::from_raw(unsafe { FFReleaseDevice(self.raw) });
        if !status.is_success() {
            log::warn!("FFReleaseDevice failed: {status}");
        }
    }
}

type SharedDevice = Arc<Mutex<DeviceRef>>;

fn lock(device: &SharedDevice) -> MutexGuard<'_, DeviceRef> {
    // `DeviceRef` has no invariants a panic could break.
    device.lock().unwrap_or_else(PoisonError::into_inner)
}

struct MacDevice {
    device: SharedDevice,
}

impl fmt::Debug for MacDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let device = lock(&self.device);
        f.debug_struct("MacDevice")
            .field("raw", &device.raw)
            .field("service", &device._service.0)
            .finish()
    }
}

impl FfDevice for MacDevice {
    fn create_effect(
        &mut self,
        ty: EffectType,
        effect: &NativeEffect,
    ) -> Result<Box<dyn FfEffect>, Status> {
        let mut raw = effect.to_raw();
        let mut effect_ref: FFEffectObjectReference = ptr::null_mut();
        {
            let device = lock(&self.device);
            Status::from_raw(unsafe {
                FFDeviceCreateEffect(
                    device.raw,
                    effect_type_uuid(ty),
                    raw.as_mut_ptr(),
                    &mut effect_ref,
                )
            })
            .check()?;
        }

        Ok(Box::new(MacEffect {
            device: self.device.clone(),
            raw: effect_ref,
        }))
    }
}

/// An `FFEffectObjectReference`, keeping the device it was created on alive.
struct MacEffect {
    device: SharedDevice,
    raw: FFEffectObjectReference,
}

// Safety: see `DeviceRef`. Every call on the effect holds the device lock.
unsafe impl Send for MacEffect {}

impl fmt::Debug for MacEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacEffect").field("raw", &self.raw).finish()
    }
}

impl Drop for MacEffect {
    fn drop(&mut self) {
        let device = lock(&self.device);
        let status = Status::from_raw(unsafe { FFDeviceReleaseEffect(device.raw, self.raw) });
        if !status.is_success() {
            log::warn!("FFDeviceReleaseEffect failed: {status}");
        }
    }
}

impl FfEffect for MacEffect {
    fn set_parameters(&mut self, effect: &NativeEffect, flags: ParamFlags) -> Result<(), Status> {
        let mut raw = effect.to_raw();
        let _device = lock(&self.device);
        Status::from_raw(unsafe { FFEffectSetParameters(self.raw, raw.as_mut_ptr(), flags.bits()) })
            .check()
    }

    fn start(&mut self, iterations: u32, flags: StartFlags) -> Result<(), Status> {
        let _device = lock(&self.device);
        Status::from_raw(unsafe { FFEffectStart(self.raw, iterations, flags.bits()) }).check()
    }

    fn stop(&mut self) -> Result<(), Status> {
        let _device = lock(&self.device);
        Status::from_raw(unsafe { FFEffectStop(self.raw) }).check()
    }

    fn unload(&mut self) -> Result<(), Status> {
        let _device = lock(&self.device);
        Status::from_raw(unsafe { FFEffectUnload(self.raw) }).check()
    }
}
