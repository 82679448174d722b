//! Pointer hit testing.
//!
//! Two registries live here:
//!
//! - `InteractionRegistry` holds clickable regions *inside* the control.
//!   It is rebuilt on every render, and clicks resolve to the
//!   highest-priority region under the pointer.
//! - `PointerRegistry` holds long-lived outside-click listeners. A control
//!   registers once when it mounts and gets a `ListenerGuard`. The guard
//!   owns the control's current bounds and deregisters itself when
//!   dropped.
//!
//! # Example
//!
//! ```ignore
//! let pointers = PointerRegistry::new();
//! let guard = pointers.register(Bounds::default());
//!
//! // During render:
//! guard.set_bounds(Bounds::new(x, y, width, height));
//!
//! // On pointer down:
//! if pointers.outside(x, y).contains(&guard.id()) {
//!     control.pointer_down_outside();
//! }
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::events::Action;

/// Rectangular screen region in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Bounds {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && u32::from(x) < u32::from(self.x) + u32::from(self.width)
            && u32::from(y) < u32::from(self.y) + u32::from(self.height)
    }

    /// Smallest region covering both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        if self.width == 0 || self.height == 0 {
            return *other;
        }
        if other.width == 0 || other.height == 0 {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (u32::from(self.x) + u32::from(self.width))
            .max(u32::from(other.x) + u32::from(other.width));
        let bottom = (u32::from(self.y) + u32::from(self.height))
            .max(u32::from(other.y) + u32::from(other.height));
        Bounds {
            x,
            y,
            width: (right - u32::from(x)).min(u32::from(u16::MAX)) as u16,
            height: (bottom - u32::from(y)).min(u32::from(u16::MAX)) as u16,
        }
    }
}

/// A clickable region inside the control.
#[derive(Debug, Clone)]
pub struct InteractiveRegion {
    /// Identifier for debugging/logging
    pub id: &'static str,
    pub bounds: Bounds,
    pub on_click: Action,
    /// Higher = checked first
    pub priority: i32,
}

impl InteractiveRegion {
    pub fn clickable(id: &'static str, bounds: Bounds, action: Action) -> Self {
        Self {
            id,
            bounds,
            on_click: action,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Click regions, rebuilt each frame during render.
#[derive(Debug, Default)]
pub struct InteractionRegistry {
    regions: Vec<InteractiveRegion>,
}

impl InteractionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all registered regions (call at start of each render)
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn register(&mut self, region: InteractiveRegion) {
        self.regions.push(region);
    }

    pub fn register_click(&mut self, id: &'static str, bounds: Bounds, action: Action) {
        self.register(InteractiveRegion::clickable(id, bounds, action));
    }

    /// Action of the highest-priority region containing the point.
    pub fn handle_click(&self, x: u16, y: u16) -> Action {
        self.regions
            .iter()
            .filter(|r| r.bounds.contains(x, y))
            .max_by_key(|r| r.priority)
            .map(|r| r.on_click.clone())
            .unwrap_or(Action::None)
    }
}

/// Handle identifying one outside-click listener.
pub type ListenerId = u64;

#[derive(Debug, Default)]
struct Listeners {
    next_id: ListenerId,
    bounds: BTreeMap<ListenerId, Bounds>,
}

/// Process-wide registry of outside-click listeners.
///
/// Cloning yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct PointerRegistry {
    inner: Rc<RefCell<Listeners>>,
}

impl PointerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until the guard drops.
    pub fn register(&self, bounds: Bounds) -> ListenerGuard {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.bounds.insert(id, bounds);

        ListenerGuard {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Listeners whose bounds do not contain the point.
    pub fn outside(&self, x: u16, y: u16) -> Vec<ListenerId> {
        self.inner
            .borrow()
            .bounds
            .iter()
            .filter(|(_, bounds)| !bounds.contains(x, y))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owned registration in a `PointerRegistry`; deregisters on drop.
#[derive(Debug)]
pub struct ListenerGuard {
    id: ListenerId,
    registry: Weak<RefCell<Listeners>>,
}

impl ListenerGuard {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Update the boundary this listener considers "inside".
    pub fn set_bounds(&self, bounds: Bounds) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().bounds.insert(self.id, bounds);
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.registry
            .upgrade()
            .and_then(|registry| registry.borrow().bounds.get(&self.id).copied())
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().bounds.remove(&self.id);
        }
    }
}
