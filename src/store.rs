//! Last-known device state shared between the sync protocol and the view.
//!
//! The store is the single source of truth the view renders from. It is
//! only ever advanced through partial merges; fields the remote has not
//! answered for yet stay unknown, and a known field never falls back to
//! unknown.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

/// Partial state update, carrying only the fields a response mentioned.
///
/// This is also the wire shape of a property GET: the body either
/// contains `{"on": ...}` or `{"color": ...}`, and whichever keys are
/// present get merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl StateDelta {
    pub fn on(value: bool) -> Self {
        Self {
            on: Some(value),
            ..Self::default()
        }
    }

    pub fn color(value: impl Into<String>) -> Self {
        Self {
            color: Some(value.into()),
            ..Self::default()
        }
    }
}

/// Last-known bulb state. `None` means "not yet known".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    pub on: Option<bool>,
    pub color: Option<String>,
}

/// Thread-safe store for the bulb's merged state.
///
/// Merges are field-wise last-write-wins; concurrent refresh and write
/// cycles may interleave and there is deliberately no global ordering
/// guard. The version is incremented once per observable change so
/// consumers can tell whether a merge actually moved the state.
pub struct DeviceStateStore {
    state: RwLock<DeviceState>,
    version: AtomicU32,
}

impl DeviceStateStore {
    /// Create an empty store; both fields start unknown.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(DeviceState::default()),
            version: AtomicU32::new(0),
        }
    }

    /// Snapshot of the current merged state.
    pub fn current(&self) -> DeviceState {
        self.state.read().clone()
    }

    /// Apply a partial update. Absent fields are left untouched, so an
    /// empty delta is a no-op. Returns whether the state changed.
    ///
    /// Empty color strings are ignored the same way absent fields are;
    /// the device occasionally reports one before it has a color.
    pub fn merge(&self, delta: &StateDelta) -> bool {
        let mut state = self.state.write();
        let mut changed = false;

        if let Some(on) = delta.on
            && state.on != Some(on)
        {
            state.on = Some(on);
            changed = true;
        }

        if let Some(color) = &delta.color
            && !color.is_empty()
            && state.color.as_deref() != Some(color.as_str())
        {
            state.color = Some(color.clone());
            changed = true;
        }

        if changed {
            self.version.fetch_add(1, Ordering::SeqCst);
        }
        changed
    }

    /// Change counter; bumps once per merge that moved the state.
    pub fn version(&self) -> u32 {
        self.version.load(Ordering::SeqCst)
    }
}

impl Default for DeviceStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unknown() {
        let store = DeviceStateStore::new();
        assert_eq!(store.current(), DeviceState::default());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_fields_compose() {
        let store = DeviceStateStore::new();
        assert!(store.merge(&StateDelta::on(false)));
        assert!(store.merge(&StateDelta::color("#ffffff")));

        assert_eq!(
            store.current(),
            DeviceState {
                on: Some(false),
                color: Some("#ffffff".to_string()),
            }
        );
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn test_empty_delta_is_noop() {
        let store = DeviceStateStore::new();
        store.merge(&StateDelta::on(true));
        let before = store.current();

        assert!(!store.merge(&StateDelta::default()));
        assert_eq!(store.current(), before);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_known_field_never_resets() {
        let store = DeviceStateStore::new();
        store.merge(&StateDelta {
            on: Some(true),
            color: Some("#ff0000".to_string()),
        });

        // A delta without a field leaves it alone.
        store.merge(&StateDelta::on(false));
        assert_eq!(store.current().color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_empty_color_is_ignored() {
        let store = DeviceStateStore::new();
        store.merge(&StateDelta::color("#00ff00"));

        assert!(!store.merge(&StateDelta::color("")));
        assert_eq!(store.current().color.as_deref(), Some("#00ff00"));
    }

    #[test]
    fn test_redundant_merge_does_not_bump_version() {
        let store = DeviceStateStore::new();
        store.merge(&StateDelta::on(true));
        assert_eq!(store.version(), 1);

        assert!(!store.merge(&StateDelta::on(true)));
        assert_eq!(store.version(), 1);
    }

    // There is no in-flight cancellation, so a slow stale response can
    // land after a fresher one. The store offers no protection beyond
    // per-field last-write-wins; this pins that down.
    #[test]
    fn test_overlapping_merges_last_write_wins() {
        let store = DeviceStateStore::new();
        store.merge(&StateDelta::color("#112233")); // fresher response
        store.merge(&StateDelta::color("#445566")); // stale straggler

        assert_eq!(store.current().color.as_deref(), Some("#445566"));
    }

    #[test]
    fn test_delta_deserializes_partial_bodies() {
        let delta: StateDelta = serde_json::from_str(r#"{"on": true}"#).unwrap();
        assert_eq!(delta, StateDelta::on(true));

        let delta: StateDelta = serde_json::from_str(r##"{"color": "#abcdef"}"##).unwrap();
        assert_eq!(delta, StateDelta::color("#abcdef"));

        // Unrelated keys merge nothing.
        let delta: StateDelta = serde_json::from_str(r#"{"level": 42}"#).unwrap();
        assert_eq!(delta, StateDelta::default());
    }
}
