//! A recording [`FfDevice`] for tests.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    description::EffectType,
    driver::{FfDevice, FfEffect, Status},
    native::{NativeEffect, ParamFlags, StartFlags},
};

/// A native call observed by [`MockDevice`]. `id` counts created effects, starting at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create {
        id: u32,
        ty: EffectType,
        native: NativeEffect,
    },
    SetParameters {
        id: u32,
        native: NativeEffect,
        flags: ParamFlags,
    },
    Start {
        id: u32,
        iterations: u32,
        flags: StartFlags,
    },
    Stop {
        id: u32,
    },
    Unload {
        id: u32,
    },
    /// The effect handle was dropped.
    Drop {
        id: u32,
    },
    /// The last reference to the native device was dropped.
    ReleaseDevice,
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    next_id: u32,
    fail_create: Option<Status>,
    fail_next: Option<Status>,
}

/// The native device reference, shared by a [`MockDevice`] and every effect created on it.
#[derive(Debug)]
struct DeviceRef {
    state: Arc<Mutex<State>>,
}

impl Drop for DeviceRef {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.calls.push(Call::ReleaseDevice);
        }
    }
}

/// Records every call made through it and its effects, and fails on request.
///
/// Clones share the recorded calls, so a test can keep a clone around after handing one to a
/// [`Device`](crate::Device). Each clone holds its own device reference, which is released once
/// that clone and all effects created through it are gone.
#[derive(Debug)]
pub struct MockDevice {
    state: Arc<Mutex<State>>,
    device: Arc<DeviceRef>,
}

impl Clone for MockDevice {
    fn clone(&self) -> Self {
        Self::with_state(self.state.clone())
    }
}

impl MockDevice {
    pub fn new() -> Self {
        Self::with_state(Arc::default())
    }

    fn with_state(state: Arc<Mutex<State>>) -> Self {
        Self {
            device: Arc::new(DeviceRef {
                state: state.clone(),
            }),
            state,
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Makes every subsequent effect creation fail with `status`.
    pub fn fail_create(&self, status: Status) {
        self.state().fail_create = Some(status);
    }

    /// Makes the next call on any effect fail with `status`.
    pub fn fail_next(&self, status: Status) {
        self.state().fail_next = Some(status);
    }
}

impl FfDevice for MockDevice {
    fn create_effect(
        &mut self,
        ty: EffectType,
        effect: &NativeEffect,
    ) -> Result<Box<dyn FfEffect>, Status> {
        let mut state = self.state();
        if let Some(status) = state.fail_create {
            return Err(status);
        }
        let id = state.next_id;
        state.next_id += 1;
        state.calls.push(Call::Create {
            id,
            ty,
            native: effect.clone(),
        });
        Ok(Box::new(MockEffect {
            id,
            state: self.state.clone(),
            _device: self.device.clone(),
        }))
    }
}

#[derive(Debug)]
struct MockEffect {
    id: u32,
    state: Arc<Mutex<State>>,
    _device: Arc<DeviceRef>,
}

impl MockEffect {
    fn record(&self, call: Call) -> Result<(), Status> {
        let mut state = self.state.lock().unwrap();
        if let Some(status) = state.fail_next.take() {
            return Err(status);
        }
        state.calls.push(call);
        Ok(())
    }
}

impl FfEffect for MockEffect {
    fn set_parameters(&mut self, effect: &NativeEffect, flags: ParamFlags) -> Result<(), Status> {
        self.record(Call::SetParameters {
            id: self.id,
            native: effect.clone(),
            flags,
        })
    }

    fn start(&mut self, iterations: u32, flags: StartFlags) -> Result<(), Status> {
        self.record(Call::Start {
            id: self.id,
            iterations,
            flags,
        })
    }

    fn stop(&mut self) -> Result<(), Status> {
        self.record(Call::Stop { id: self.id })
    }

    fn unload(&mut self) -> Result<(), Status> {
        self.record(Call::Unload { id: self.id })
    }
}

impl Drop for MockEffect {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.calls.push(Call::Drop { id: self.id });
        }
    }
}
