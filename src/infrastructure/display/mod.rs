//! Platform display adapter.
//!
//! [`DisplayPlatform`] is the only seam between the workflow and the
//! operating system's display subsystem. Enumeration calls return `None`
//! once the platform runs out of devices, and a settings query returns
//! `None` for an adapter that is not driving an active desktop. Neither is
//! an error.
//!
//! | Module    | OS      | API used                                                  |
//! |-----------|---------|-----------------------------------------------------------|
//! | `windows` | Windows | `EnumDisplayDevicesW`, `EnumDisplaySettingsW`, `ChangeDisplaySettingsExW` |
//!
//! Other targets get [`AppError::UnsupportedPlatform`] from [`open_native`].

use thiserror::Error;

use crate::domain::{AdapterHandle, Geometry, GeometryChange, Result};
#[cfg(not(target_os = "windows"))]
use crate::domain::AppError;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(test)]
pub mod mock;

/// A monitor as reported underneath one adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorDevice {
    /// Friendly description string reported by the platform.
    pub description: String,
    /// Whether the platform reports the monitor as attached to the desktop.
    pub attached_to_desktop: bool,
}

/// The display driver refused a stage or commit request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} rejected: {detail}")]
pub struct Rejection {
    pub operation: &'static str,
    pub detail: String,
}

/// Operating-system display subsystem.
pub trait DisplayPlatform {
    /// Adapter at `index`, or `None` past the end of the adapter list.
    fn adapter(&self, index: u32) -> Option<AdapterHandle>;

    /// Monitor at `index` under `adapter`, or `None` past the end of its list.
    fn monitor(&self, adapter: &AdapterHandle, index: u32) -> Option<MonitorDevice>;

    /// Currently active position and rotation of `adapter`.
    ///
    /// `None` means the adapter is not driving an active desktop.
    fn current_geometry(&self, adapter: &AdapterHandle) -> Option<Geometry>;

    /// Persists `change` for `adapter` without making it visible yet.
    ///
    /// # Errors
    /// Returns a [`Rejection`] if the platform refuses the change.
    fn stage(&self, adapter: &AdapterHandle, change: &GeometryChange)
        -> std::result::Result<(), Rejection>;

    /// Makes every staged change visible in one transition.
    ///
    /// # Errors
    /// Returns a [`Rejection`] if the platform refuses to apply the staged layout.
    fn commit(&self) -> std::result::Result<(), Rejection>;
}

/// Opens the display backend for the running operating system.
///
/// # Errors
/// Returns [`AppError::UnsupportedPlatform`] where no backend exists.
#[cfg(target_os = "windows")]
pub fn open_native() -> Result<Box<dyn DisplayPlatform>> {
    Ok(Box::new(windows::Win32Display::new()))
}

/// Opens the display backend for the running operating system.
///
/// # Errors
/// Returns [`AppError::UnsupportedPlatform`] where no backend exists.
#[cfg(not(target_os = "windows"))]
pub fn open_native() -> Result<Box<dyn DisplayPlatform>> {
    Err(AppError::UnsupportedPlatform {
        os: std::env::consts::OS,
    })
}
