// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input channels and the compile-time table of eventable types.
//!
//! Every physical trigger the engine understands is an [`EventableType`]: a
//! name tagged with the [`Channel`] it arrives on. The constants in this module
//! form the complete table; quasimodes reference them directly, so there is no
//! registry to populate at runtime.

use core::fmt;
use core::hash::{Hash, Hasher};

/// One of the five physical input families.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    /// Keyboard keys (modifiers included) and other pressable buttons.
    Key,
    /// Pointer movement, with or without a button held.
    Drag,
    /// Scroll wheel and trackpad scrolling.
    Scroll,
    /// Trackpad pinch (magnification).
    Pinch,
    /// Trackpad two-finger rotation.
    Rotate,
}

impl Channel {
    /// All channels in table order.
    pub const ALL: [Self; 5] = [Self::Key, Self::Drag, Self::Scroll, Self::Pinch, Self::Rotate];

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Key => 0,
            Self::Drag => 1,
            Self::Scroll => 2,
            Self::Pinch => 3,
            Self::Rotate => 4,
        }
    }
}

/// Identifier for one trigger of one channel (a key, or "drag" itself).
///
/// Equality and hashing use the name only; names are unique across the table.
#[derive(Copy, Clone, Debug)]
pub struct EventableType {
    channel: Channel,
    name: &'static str,
}

impl EventableType {
    /// Create a type on an explicit channel.
    pub const fn new(channel: Channel, name: &'static str) -> Self {
        Self { channel, name }
    }

    /// Create a key-channel type.
    pub const fn key(name: &'static str) -> Self {
        Self::new(Channel::Key, name)
    }

    /// Create a drag-channel type.
    pub const fn drag(name: &'static str) -> Self {
        Self::new(Channel::Drag, name)
    }

    /// Channel this type arrives on.
    pub const fn channel(self) -> Channel {
        self.channel
    }

    /// Unique name of this type.
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Whether this is one of the [`MODIFIERS`].
    pub fn is_modifier(self) -> bool {
        MODIFIERS.contains(&self)
    }
}

impl PartialEq for EventableType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for EventableType {}

impl Hash for EventableType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for EventableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// Modifiers.

/// Shift modifier.
pub const SHIFT: EventableType = EventableType::key("shift");
/// Control modifier.
pub const CONTROL: EventableType = EventableType::key("control");
/// Option (alt) modifier.
pub const OPTION: EventableType = EventableType::key("option");
/// Command (meta) modifier.
pub const COMMAND: EventableType = EventableType::key("command");

// Keys.

/// The `A` key.
pub const A: EventableType = EventableType::key("a");
/// The `B` key.
pub const B: EventableType = EventableType::key("b");
/// The `C` key.
pub const C: EventableType = EventableType::key("c");
/// The `D` key.
pub const D: EventableType = EventableType::key("d");
/// The `V` key.
pub const V: EventableType = EventableType::key("v");
/// The `X` key.
pub const X: EventableType = EventableType::key("x");
/// The `Z` key.
pub const Z: EventableType = EventableType::key("z");

// Buttons. These arrive on the key channel: a press is `Began`, a release `Ended`.

/// Primary-button click.
pub const CLICK: EventableType = EventableType::key("click");
/// Secondary-button click.
pub const SUB_CLICK: EventableType = EventableType::key("subClick");
/// Force-touch tap.
pub const TAP: EventableType = EventableType::key("tap");

// Pointer.

/// Primary-button drag.
pub const DRAG: EventableType = EventableType::drag("drag");
/// Secondary-button (or pen) drag.
pub const SUB_DRAG: EventableType = EventableType::drag("subDrag");
/// Pointer movement with no button held.
pub const POINTING: EventableType = EventableType::drag("pointing");

// Gestures.

/// Scroll gesture.
pub const SCROLL: EventableType = EventableType::new(Channel::Scroll, "scroll");
/// Pinch gesture.
pub const PINCH: EventableType = EventableType::new(Channel::Pinch, "pinch");
/// Rotation gesture.
pub const ROTATE: EventableType = EventableType::new(Channel::Rotate, "rotate");

/// The modifier keys.
pub const MODIFIERS: &[EventableType] = &[SHIFT, CONTROL, OPTION, COMMAND];

/// Every eventable type known to the engine.
pub const ALL: &[EventableType] = &[
    SHIFT, CONTROL, OPTION, COMMAND, A, B, C, D, V, X, Z, CLICK, SUB_CLICK, TAP, DRAG, SUB_DRAG,
    POINTING, SCROLL, PINCH, ROTATE,
];

/// Look up a type from the table by name.
pub fn by_name(name: &str) -> Option<EventableType> {
    ALL.iter().copied().find(|ty| ty.name == name)
}
