#![allow(non_camel_case_types, non_snake_case, non_upper_case_globals)]

pub mod ff;
#[cfg(target_os = "macos")]
pub mod iokit;
