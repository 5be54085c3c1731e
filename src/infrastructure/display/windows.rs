//! Windows display configuration via the Win32 GDI display APIs.
//!
//! Adapters and monitors are walked with `EnumDisplayDevicesW`, current
//! settings come from `EnumDisplaySettingsW(ENUM_CURRENT_SETTINGS)`, and
//! changes are written to the registry with
//! `CDS_UPDATEREGISTRY | CDS_NORESET` before a final parameterless
//! `ChangeDisplaySettingsExW` applies all of them at once.

#![allow(unsafe_code)]

use windows::core::PCWSTR;
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    ChangeDisplaySettingsExW, EnumDisplayDevicesW, EnumDisplaySettingsW, CDS_NORESET, CDS_TYPE,
    CDS_UPDATEREGISTRY, DEVMODEW, DEVMODE_DISPLAY_ORIENTATION, DEVMODE_FIELD_FLAGS,
    DISPLAY_DEVICEW, DISPLAY_DEVICE_ATTACHED_TO_DESKTOP, DISP_CHANGE, DISP_CHANGE_BADDUALVIEW,
    DISP_CHANGE_BADFLAGS, DISP_CHANGE_BADMODE, DISP_CHANGE_BADPARAM, DISP_CHANGE_FAILED,
    DISP_CHANGE_NOTUPDATED, DISP_CHANGE_RESTART, DISP_CHANGE_SUCCESSFUL, DM_DISPLAYORIENTATION,
    DM_POSITION, ENUM_CURRENT_SETTINGS,
};

use super::{DisplayPlatform, MonitorDevice, Rejection};
use crate::domain::{AdapterHandle, Geometry, GeometryChange, Rotation};

/// Win32 implementation of [`DisplayPlatform`].
#[derive(Debug, Default)]
pub struct Win32Display;

impl Win32Display {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DisplayPlatform for Win32Display {
    fn adapter(&self, index: u32) -> Option<AdapterHandle> {
        let device = display_device(None, index)?;
        Some(AdapterHandle::new(from_wide(&device.DeviceName)))
    }

    fn monitor(&self, adapter: &AdapterHandle, index: u32) -> Option<MonitorDevice> {
        let device = display_device(Some(adapter.name()), index)?;
        Some(MonitorDevice {
            description: from_wide(&device.DeviceString),
            attached_to_desktop: device.StateFlags.0 & DISPLAY_DEVICE_ATTACHED_TO_DESKTOP.0 != 0,
        })
    }

    fn current_geometry(&self, adapter: &AdapterHandle) -> Option<Geometry> {
        let mode = current_mode(adapter)?;

        // SAFETY: the display arm of the union is the one populated for
        // display devices by EnumDisplaySettingsW.
        let (position, orientation) = unsafe {
            let display = mode.Anonymous1.Anonymous2;
            (display.dmPosition, display.dmDisplayOrientation)
        };

        let rotation = u8::try_from(orientation.0)
            .ok()
            .and_then(|value| Rotation::try_from(value).ok());
        let Some(rotation) = rotation else {
            tracing::warn!(adapter = %adapter, value = orientation.0, "Unknown display orientation");
            return None;
        };

        Some(Geometry::new(position.x, position.y, rotation))
    }

    fn stage(&self, adapter: &AdapterHandle, change: &GeometryChange) -> Result<(), Rejection> {
        let mut mode = current_mode(adapter).ok_or_else(|| Rejection {
            operation: "stage",
            detail: format!("{adapter} has no active display mode"),
        })?;

        let mut fields = DEVMODE_FIELD_FLAGS(0);
        // SAFETY: writes go to the display arm of the union, matching what
        // EnumDisplaySettingsW filled in above.
        unsafe {
            if change.fields.position {
                mode.Anonymous1.Anonymous2.dmPosition.x = change.geometry.x;
                mode.Anonymous1.Anonymous2.dmPosition.y = change.geometry.y;
                fields |= DM_POSITION;
            }
            if change.fields.orientation {
                mode.Anonymous1.Anonymous2.dmDisplayOrientation =
                    DEVMODE_DISPLAY_ORIENTATION(u32::from(u8::from(change.geometry.rotation)));
                fields |= DM_DISPLAYORIENTATION;
            }
        }
        mode.dmFields = fields;

        let name = to_wide(adapter.name());
        // SAFETY: `name` is NUL-terminated and `mode` is a fully initialised
        // DEVMODEW; both outlive the call.
        let status = unsafe {
            ChangeDisplaySettingsExW(
                PCWSTR(name.as_ptr()),
                Some(std::ptr::from_ref(&mode)),
                HWND::default(),
                CDS_UPDATEREGISTRY | CDS_NORESET,
                None,
            )
        };

        check_status("stage", status)
    }

    fn commit(&self) -> Result<(), Rejection> {
        // SAFETY: null device and mode ask Windows to apply the registry
        // settings staged by previous CDS_NORESET calls.
        let status = unsafe {
            ChangeDisplaySettingsExW(PCWSTR::null(), None, HWND::default(), CDS_TYPE(0), None)
        };

        check_status("commit", status)
    }
}

/// Queries one entry of the adapter list (`parent == None`) or of an
/// adapter's monitor list.
fn display_device(parent: Option<&str>, index: u32) -> Option<DISPLAY_DEVICEW> {
    let mut device = DISPLAY_DEVICEW {
        cb: u32::try_from(std::mem::size_of::<DISPLAY_DEVICEW>()).ok()?,
        ..Default::default()
    };
    let parent = parent.map(to_wide);
    let parent_ptr = parent
        .as_ref()
        .map_or_else(PCWSTR::null, |name| PCWSTR(name.as_ptr()));

    // SAFETY: `device.cb` is set, and `parent_ptr` is either null or points
    // into `parent`, which lives until the end of this function.
    let found = unsafe { EnumDisplayDevicesW(parent_ptr, index, &mut device, 0) };
    found.as_bool().then_some(device)
}

fn current_mode(adapter: &AdapterHandle) -> Option<DEVMODEW> {
    let mut mode = DEVMODEW {
        dmSize: u16::try_from(std::mem::size_of::<DEVMODEW>()).ok()?,
        ..Default::default()
    };
    let name = to_wide(adapter.name());

    // SAFETY: `name` is NUL-terminated and `mode.dmSize` is set.
    let found =
        unsafe { EnumDisplaySettingsW(PCWSTR(name.as_ptr()), ENUM_CURRENT_SETTINGS, &mut mode) };
    found.as_bool().then_some(mode)
}

fn check_status(operation: &'static str, status: DISP_CHANGE) -> Result<(), Rejection> {
    if status == DISP_CHANGE_SUCCESSFUL {
        return Ok(());
    }

    let detail = match status {
        DISP_CHANGE_RESTART => "a restart is required",
        DISP_CHANGE_FAILED => "the display driver failed the request",
        DISP_CHANGE_BADMODE => "the graphics mode is not supported",
        DISP_CHANGE_NOTUPDATED => "unable to write settings to the registry",
        DISP_CHANGE_BADFLAGS => "an invalid set of flags was passed",
        DISP_CHANGE_BADPARAM => "an invalid parameter was passed",
        DISP_CHANGE_BADDUALVIEW => "the system is DualView capable",
        _ => "unknown failure",
    };

    Err(Rejection {
        operation,
        detail: format!("{detail} (code {})", status.0),
    })
}

fn to_wide(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

fn from_wide(buffer: &[u16]) -> String {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..len])
}
