//! Synchronization between the remote bulb and the local panel state.
//!
//! Two independent flows share the store with no global lock:
//!
//! - refresh: read both properties concurrently and merge whatever each
//!   one reports. A failed read is logged and merges nothing.
//! - write: PUT first, advance local state only after the device
//!   acknowledges with status 200. On any other status, or a transport
//!   failure, the store stays at its prior value, which is the whole
//!   rollback.
//!
//! Flows may interleave; the store's per-field last-write-wins merge is
//! the only ordering guarantee. In-flight requests are never cancelled.

use crate::client::{PropertyTransport, PropertyValue};
use crate::descriptor::Property;
use crate::error::{PanelError, Result};
use crate::render::ViewBinder;
use crate::store::DeviceStateStore;
use log::{error, info};
use std::sync::Arc;

/// User input events forwarded from the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// A color string submitted from the color input.
    ColorSubmitted(String),
    /// The on/off control was activated.
    PowerToggled,
}

/// Orchestrates refresh and write cycles against one bulb.
pub struct SyncController<T: PropertyTransport> {
    transport: T,
    store: Arc<DeviceStateStore>,
    view: ViewBinder,
}

impl<T: PropertyTransport> SyncController<T> {
    pub fn new(transport: T, store: Arc<DeviceStateStore>, view: ViewBinder) -> Self {
        Self {
            transport,
            store,
            view,
        }
    }

    pub fn store(&self) -> &Arc<DeviceStateStore> {
        &self.store
    }

    /// Fetch both properties and merge each result into the store.
    ///
    /// The reads are independent and the merge is commutative, so no
    /// ordering is promised. A rejection on one property does not stop
    /// the other from landing; the store just keeps its stale value for
    /// the failed one. No retry is scheduled.
    pub async fn refresh(&self) {
        let (on, color) = tokio::join!(
            self.transport.read(Property::On),
            self.transport.read(Property::Color),
        );

        for (property, result) in [(Property::On, on), (Property::Color, color)] {
            match result {
                Ok(delta) => {
                    if self.store.merge(&delta) {
                        self.view.render();
                    }
                }
                Err(e) => {
                    error!("[Sync] Failed to fetch {} status: {}", property.name(), e);
                }
            }
        }
    }

    /// Write a new color to the device, confirming before the panel
    /// shows it.
    pub async fn request_color_change(&self, color: String) {
        if let Err(e) = self.submit(PropertyValue::Color(color)).await {
            error!("[Sync] Failed to set color: {}", e);
        }
    }

    /// Write a new power state to the device, same confirm discipline
    /// as the color path.
    pub async fn request_power_change(&self, on: bool) {
        if let Err(e) = self.submit(PropertyValue::On(on)).await {
            error!("[Sync] Failed to set power: {}", e);
        }
    }

    /// Toggle power from the last-known state. An unknown power state
    /// toggles to on.
    pub async fn request_power_toggle(&self) {
        let next = !self.store.current().on.unwrap_or(false);
        self.request_power_change(next).await;
    }

    /// Dispatch a user event from the rendering surface.
    pub async fn handle_event(&self, event: PanelEvent) {
        match event {
            PanelEvent::ColorSubmitted(color) => self.request_color_change(color).await,
            PanelEvent::PowerToggled => self.request_power_toggle().await,
        }
    }

    /// Write-then-confirm: the store advances only on status 200.
    async fn submit(&self, value: PropertyValue) -> Result<()> {
        let status = self.transport.write(&value).await?;
        if status != 200 {
            return Err(PanelError::WriteRejected(status));
        }

        info!("[Sync] Device confirmed {} write", value.property().name());
        if self.store.merge(&value.into_delta()) {
            self.view.render();
        }
        Ok(())
    }
}
