//! In-memory display platform for tests.
//!
//! Staged changes only become visible through [`DisplayPlatform::current_geometry`]
//! after a successful [`DisplayPlatform::commit`], mirroring the deferred
//! registry writes of the real backend.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use super::{DisplayPlatform, MonitorDevice, Rejection};
use crate::domain::{AdapterHandle, Geometry, GeometryChange};

#[derive(Debug, Clone)]
pub struct MockAdapter {
    pub name: String,
    pub monitors: Vec<MonitorDevice>,
    /// `None` models an adapter with no active mode.
    pub current: Option<Geometry>,
}

#[derive(Debug, Default)]
pub struct MockDisplay {
    adapters: RefCell<Vec<MockAdapter>>,
    reject_stage: HashSet<String>,
    reject_commit: bool,
    staged: RefCell<Vec<(AdapterHandle, GeometryChange)>>,
    pending: RefCell<Vec<(AdapterHandle, GeometryChange)>>,
    commits: Cell<usize>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an adapter driving one desktop-attached monitor.
    pub fn with_monitor(self, adapter: &str, description: &str, current: Option<Geometry>) -> Self {
        self.with_adapter(MockAdapter {
            name: adapter.to_string(),
            monitors: vec![MonitorDevice {
                description: description.to_string(),
                attached_to_desktop: true,
            }],
            current,
        })
    }

    pub fn with_adapter(self, adapter: MockAdapter) -> Self {
        self.adapters.borrow_mut().push(adapter);
        self
    }

    /// Makes every stage call for `adapter` fail.
    pub fn rejecting_stage(mut self, adapter: &str) -> Self {
        self.reject_stage.insert(adapter.to_string());
        self
    }

    pub fn rejecting_commit(mut self) -> Self {
        self.reject_commit = true;
        self
    }

    /// Every change passed to a successful stage call, in call order,
    /// including ones already committed.
    pub fn staged(&self) -> Vec<(AdapterHandle, GeometryChange)> {
        self.staged.borrow().clone()
    }

    pub fn commit_count(&self) -> usize {
        self.commits.get()
    }

    fn find(&self, adapter: &AdapterHandle) -> Option<MockAdapter> {
        self.adapters
            .borrow()
            .iter()
            .find(|a| a.name == adapter.name())
            .cloned()
    }
}

impl DisplayPlatform for MockDisplay {
    fn adapter(&self, index: u32) -> Option<AdapterHandle> {
        let adapters = self.adapters.borrow();
        let adapter = adapters.get(usize::try_from(index).ok()?)?;
        Some(AdapterHandle::new(adapter.name.clone()))
    }

    fn monitor(&self, adapter: &AdapterHandle, index: u32) -> Option<MonitorDevice> {
        self.find(adapter)?
            .monitors
            .get(usize::try_from(index).ok()?)
            .cloned()
    }

    fn current_geometry(&self, adapter: &AdapterHandle) -> Option<Geometry> {
        self.find(adapter)?.current
    }

    fn stage(&self, adapter: &AdapterHandle, change: &GeometryChange) -> Result<(), Rejection> {
        if self.reject_stage.contains(adapter.name()) {
            return Err(Rejection {
                operation: "stage",
                detail: format!("{adapter} refused the change"),
            });
        }
        self.staged.borrow_mut().push((adapter.clone(), *change));
        self.pending.borrow_mut().push((adapter.clone(), *change));
        Ok(())
    }

    fn commit(&self) -> Result<(), Rejection> {
        self.commits.set(self.commits.get() + 1);
        if self.reject_commit {
            return Err(Rejection {
                operation: "commit",
                detail: "the display driver failed the request".into(),
            });
        }

        let pending = self.pending.take();
        let mut adapters = self.adapters.borrow_mut();
        for (handle, change) in &pending {
            if let Some(adapter) = adapters.iter_mut().find(|a| a.name == handle.name()) {
                let mut geometry = adapter.current.unwrap_or_default();
                if change.fields.position {
                    geometry.x = change.geometry.x;
                    geometry.y = change.geometry.y;
                }
                if change.fields.orientation {
                    geometry.rotation = change.geometry.rotation;
                }
                adapter.current = Some(geometry);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rotation;

    #[test]
    fn test_commit_applies_each_staged_change_once() {
        let platform = MockDisplay::new()
            .with_monitor("D1", "Left", Some(Geometry::new(0, 0, Rotation::Deg0)));
        let handle = AdapterHandle::new("D1");

        platform
            .stage(&handle, &GeometryChange::layout(Geometry::new(1920, 0, Rotation::Deg0)))
            .unwrap();
        platform.commit().unwrap();

        // Moved back outside the platform, e.g. by the operator.
        platform.adapters.borrow_mut()[0].current = Some(Geometry::new(0, 0, Rotation::Deg0));
        platform.commit().unwrap();

        assert_eq!(platform.commit_count(), 2);
        assert_eq!(platform.staged().len(), 1);
        assert_eq!(
            platform.current_geometry(&handle),
            Some(Geometry::new(0, 0, Rotation::Deg0))
        );
    }

    #[test]
    fn test_rejected_commit_leaves_layout_unchanged() {
        let platform = MockDisplay::new()
            .with_monitor("D1", "Left", Some(Geometry::new(0, 0, Rotation::Deg0)))
            .rejecting_commit();
        let handle = AdapterHandle::new("D1");

        platform
            .stage(&handle, &GeometryChange::layout(Geometry::new(1920, 0, Rotation::Deg90)))
            .unwrap();

        assert!(platform.commit().is_err());
        assert_eq!(
            platform.current_geometry(&handle),
            Some(Geometry::new(0, 0, Rotation::Deg0))
        );
    }
}
