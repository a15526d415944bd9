//! Bulb panel library.
//!
//! Core state synchronization for a single color smart bulb exposed over
//! authenticated HTTP: fetch-and-merge refresh of the bulb's two
//! properties, write-then-confirm user changes, and a pure projection of
//! the merged state into render instructions for any backend.

pub mod client;
pub mod color;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod render;
pub mod store;
pub mod sync;

pub use client::{Credentials, HttpPropertyClient, PropertyTransport, PropertyValue, StaticToken};
pub use descriptor::{BulbEndpoints, Property, ThingDescription};
pub use error::{PanelError, Result};
pub use render::{RenderFrame, RenderSink, ViewBinder, project};
pub use store::{DeviceState, DeviceStateStore, StateDelta};
pub use sync::{PanelEvent, SyncController};
