use slotmap::{SlotMap, new_key_type};

use crate::foundation::core::{Point, Viewport};
use crate::host::event::{EventKind, HostEvent};

new_key_type! {
    /// Handle of a requested frame callback.
    pub struct FrameHandle;
    /// Handle of a registered event listener.
    pub struct ListenerHandle;
}

/// Single-threaded host environment: viewport, next-frame scheduler and listener registry.
///
/// A requested frame fires at most once; components re-request every frame. Callbacks are not
/// stored here. Owners keep their handles and ask the host whether a frame is due
/// ([`Host::take_frame`]) or a listener is still attached ([`Host::is_listening`]).
#[derive(Debug)]
pub struct Host {
    viewport: Viewport,
    pointer: Option<Point>,
    frames: SlotMap<FrameHandle, ()>,
    listeners: SlotMap<ListenerHandle, EventKind>,
}

impl Host {
    /// Host with the given viewport and nothing scheduled.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pointer: None,
            frames: SlotMap::with_key(),
            listeners: SlotMap::with_key(),
        }
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Last pointer position in viewport pixels.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Record host-level state carried by an event (viewport size, pointer position).
    pub fn apply(&mut self, event: &HostEvent) {
        match event {
            HostEvent::Resize(viewport) => self.viewport = *viewport,
            HostEvent::PointerMove(p) => self.pointer = Some(*p),
            HostEvent::Input { .. } => {}
        }
    }

    /// Schedule a callback for the next frame.
    pub fn request_frame(&mut self) -> FrameHandle {
        self.frames.insert(())
    }

    /// Cancel a pending frame. Returns `false` if it already fired or was cancelled.
    pub fn cancel_frame(&mut self, handle: FrameHandle) -> bool {
        self.frames.remove(handle).is_some()
    }

    /// Consume a due frame. Returns `true` exactly once per request.
    pub fn take_frame(&mut self, handle: FrameHandle) -> bool {
        self.frames.remove(handle).is_some()
    }

    /// `true` while the request is pending.
    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.frames.contains_key(handle)
    }

    /// Number of frame callbacks still pending.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Attach a listener for `kind`.
    pub fn add_listener(&mut self, kind: EventKind) -> ListenerHandle {
        self.listeners.insert(kind)
    }

    /// Detach a listener. Returns `false` if it was not attached.
    pub fn remove_listener(&mut self, handle: ListenerHandle) -> bool {
        self.listeners.remove(handle).is_some()
    }

    /// `true` if `handle` is attached and listens for `kind`.
    pub fn is_listening(&self, handle: ListenerHandle, kind: EventKind) -> bool {
        self.listeners.get(handle) == Some(&kind)
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of attached listeners for `kind`.
    pub fn listeners_for(&self, kind: EventKind) -> usize {
        self.listeners.values().filter(|k| **k == kind).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/runtime.rs"]
mod tests;
