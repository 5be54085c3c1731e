//! Domain models for monitor layouts.
//!
//! These models describe the monitors the platform reports and the layout
//! the operator wants them to have.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{AppError, Result};

/// Stable token identifying one physical monitor across runs.
///
/// Equality is exact; use [`MonitorIdentity::key`] for the case-insensitive
/// form used by [`TargetMap`] lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MonitorIdentity(String);

impl MonitorIdentity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identity is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Case-insensitive lookup key.
    #[must_use]
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for MonitorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Adapter output currently driving a monitor.
///
/// Only meaningful within the enumeration pass that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdapterHandle(String);

impl AdapterHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdapterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Clockwise rotation from the monitor's native orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rotation {
    #[default]
    Deg0 = 0,
    Deg90 = 1,
    Deg180 = 2,
    Deg270 = 3,
}

impl From<Rotation> for u8 {
    fn from(r: Rotation) -> Self {
        r as Self
    }
}

impl TryFrom<u8> for Rotation {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Deg0),
            1 => Ok(Self::Deg90),
            2 => Ok(Self::Deg180),
            3 => Ok(Self::Deg270),
            other => Err(format!("invalid orientation {other}, expected 0-3")),
        }
    }
}

impl Rotation {
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Position and rotation of a monitor on the virtual desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub rotation: Rotation,
}

impl Geometry {
    #[must_use]
    pub const fn new(x: i32, y: i32, rotation: Rotation) -> Self {
        Self { x, y, rotation }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}", self.x, self.y, self.rotation)
    }
}

/// Which display properties a [`GeometryChange`] modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangedFields {
    pub position: bool,
    pub orientation: bool,
}

impl ChangedFields {
    /// Position and orientation, nothing else.
    pub const LAYOUT: Self = Self {
        position: true,
        orientation: true,
    };
}

/// A geometry to stage together with the fields it is allowed to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryChange {
    pub geometry: Geometry,
    pub fields: ChangedFields,
}

impl GeometryChange {
    /// Change that moves and rotates a monitor, leaving every other property alone.
    #[must_use]
    pub const fn layout(geometry: Geometry) -> Self {
        Self {
            geometry,
            fields: ChangedFields::LAYOUT,
        }
    }
}

/// An active monitor observed during one enumeration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorRecord {
    pub identity: MonitorIdentity,
    pub adapter: AdapterHandle,
    pub current: Geometry,
}

/// Desired geometry for one monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEntry {
    pub identity: MonitorIdentity,
    pub geometry: Geometry,
}

/// Immutable mapping from monitor identity to its target geometry.
///
/// Lookups are case-insensitive; iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct TargetMap {
    entries: Vec<TargetEntry>,
    index: HashMap<String, usize>,
}

impl TargetMap {
    /// Builds a map, rejecting the second occurrence of any identity.
    ///
    /// # Errors
    /// Returns [`AppError::DuplicateMonitor`] if two entries share an identity
    /// (compared case-insensitively).
    pub fn from_entries(entries: impl IntoIterator<Item = TargetEntry>) -> Result<Self> {
        let mut map = Self::default();

        for entry in entries {
            let key = entry.identity.key();
            if map.index.contains_key(&key) {
                return Err(AppError::DuplicateMonitor {
                    identity: entry.identity.to_string(),
                });
            }
            map.index.insert(key, map.entries.len());
            map.entries.push(entry);
        }

        Ok(map)
    }

    #[must_use]
    pub fn get(&self, identity: &MonitorIdentity) -> Option<&TargetEntry> {
        self.index
            .get(&identity.key())
            .map(|&i| &self.entries[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetEntry> {
        self.entries.iter()
    }
}
