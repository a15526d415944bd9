//! Projection of device state into render instructions.
//!
//! Rather than binding state to live UI nodes, the store state projects
//! into a small instruction set any rendering backend can consume: a
//! power label, an icon fill color, and a high-contrast flag.

use crate::color;
use crate::store::{DeviceState, DeviceStateStore};
use log::debug;
use parking_lot::Mutex;
use std::sync::Arc;

/// Everything a backend needs to draw the bulb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    /// `"on"` / `"off"`, or `None` while the power state is unknown
    /// (an unknown state changes nothing on screen).
    pub power_label: Option<&'static str>,
    /// Powered flag for backends that switch whole visual states.
    pub powered: Option<bool>,
    /// Fill color for the bulb icon, once known.
    pub icon_fill: Option<String>,
    /// Whether to use the high-contrast presentation.
    pub bright: bool,
}

/// Project a state snapshot into a render frame. Pure.
pub fn project(state: &DeviceState) -> RenderFrame {
    RenderFrame {
        power_label: state.on.map(|on| if on { "on" } else { "off" }),
        powered: state.on,
        icon_fill: state.color.clone(),
        bright: state
            .color
            .as_deref()
            .is_some_and(color::is_bright),
    }
}

/// Rendering backend consuming frames.
pub trait RenderSink: Send + Sync {
    fn apply(&self, frame: &RenderFrame);
}

/// Pushes store changes to a rendering backend.
///
/// Consecutive identical frames are suppressed so a merge that did not
/// move any visible field costs the backend nothing.
pub struct ViewBinder {
    store: Arc<DeviceStateStore>,
    sink: Box<dyn RenderSink>,
    last: Mutex<Option<RenderFrame>>,
}

impl ViewBinder {
    pub fn new(store: Arc<DeviceStateStore>, sink: Box<dyn RenderSink>) -> Self {
        Self {
            store,
            sink,
            last: Mutex::new(None),
        }
    }

    /// Project the current store state and hand it to the backend if it
    /// differs from the previous frame.
    pub fn render(&self) {
        let frame = project(&self.store.current());
        let mut last = self.last.lock();

        if last.as_ref() == Some(&frame) {
            return;
        }
        debug!("[View] {:?}", frame);
        self.sink.apply(&frame);
        *last = Some(frame);
    }
}
