//! Monitor discovery.
//!
//! Walks the platform's adapter and monitor lists, derives a stable
//! identity for each desktop-attached monitor, and pairs it with the
//! adapter's current geometry.

use crate::domain::{AdapterHandle, MonitorIdentity, MonitorRecord};
use crate::infrastructure::DisplayPlatform;

/// Upper bound on adapters walked, in case the platform never reports the end.
const MAX_ADAPTERS: u32 = 64;
/// Upper bound on monitors walked under a single adapter.
const MAX_MONITORS_PER_ADAPTER: u32 = 16;

/// A desktop-attached monitor and the adapter driving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredMonitor {
    pub identity: MonitorIdentity,
    pub adapter: AdapterHandle,
}

/// Enumerates desktop-attached monitors in platform order.
///
/// Each list ends at the first index the platform has no entry for.
/// Monitors whose identity comes out blank are dropped.
pub fn enumerate(platform: &dyn DisplayPlatform) -> Vec<DiscoveredMonitor> {
    let mut discovered = Vec::new();

    for adapter in (0..MAX_ADAPTERS).map_while(|i| platform.adapter(i)) {
        let monitors =
            (0..MAX_MONITORS_PER_ADAPTER).map_while(|i| platform.monitor(&adapter, i));

        for monitor in monitors {
            if !monitor.attached_to_desktop {
                tracing::debug!(adapter = %adapter, monitor = %monitor.description, "Monitor not attached to desktop");
                continue;
            }

            let identity = monitor_identity(&adapter, &monitor.description);
            if identity.is_blank() {
                tracing::error!(adapter = %adapter, "Monitor reported without a usable identity, skipping");
                continue;
            }

            discovered.push(DiscoveredMonitor {
                identity,
                adapter: adapter.clone(),
            });
        }
    }

    tracing::debug!("Discovered {} monitor(s)", discovered.len());

    discovered
}

/// Enumerates monitors and reads each adapter's active geometry.
///
/// Monitors on adapters without an active mode are not part of the
/// desktop right now and are left out.
pub fn capture(platform: &dyn DisplayPlatform) -> Vec<MonitorRecord> {
    enumerate(platform)
        .into_iter()
        .filter_map(|monitor| match platform.current_geometry(&monitor.adapter) {
            Some(current) => Some(MonitorRecord {
                identity: monitor.identity,
                adapter: monitor.adapter,
                current,
            }),
            None => {
                tracing::debug!(identity = %monitor.identity, "Adapter has no active mode, skipping");
                None
            }
        })
        .collect()
}

/// Identity built from the adapter name and the monitor's description.
///
/// Blank when both parts are blank.
fn monitor_identity(adapter: &AdapterHandle, description: &str) -> MonitorIdentity {
    let adapter = adapter.name().trim();
    let description = description.trim();

    if adapter.is_empty() && description.is_empty() {
        return MonitorIdentity::new(String::new());
    }
    MonitorIdentity::new(format!("{adapter}\\{description}"))
}
