// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The manager trait and the dispatch helpers managers share.

use kurbo::Point;
use understory_quasimode::{Action, EventMap, Eventable, Phase};

use crate::receiver::{Capability, DisplayMode, Receiver};
use crate::view::{GestureTarget, ViewTree};

/// Owns a family of actions and routes their events to receivers.
///
/// [`Sender`](crate::Sender) calls [`ActionManager::send`] once per tick,
/// after the [`EventMap`] resolved the tick's action events.
pub trait ActionManager<T: ViewTree> {
    /// The actions this manager owns, in arbitration order.
    fn actions(&self) -> &'static [Action];

    /// Dispatch this tick's events.
    fn send(&mut self, events: &EventMap, tree: &mut T);
}

/// One dispatchable frame of an action: its composite phase plus the device
/// event driving it.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Frame {
    pub(crate) phase: Phase,
    pub(crate) device: Eventable,
}

impl Frame {
    pub(crate) fn at(&self) -> Point {
        self.device.root_location()
    }

    pub(crate) fn time(&self) -> f64 {
        self.device.time()
    }

    pub(crate) fn pressure(&self) -> f64 {
        match self.device {
            Eventable::Key(e) => e.pressure,
            Eventable::Drag(e) => e.pressure,
            Eventable::Scroll(_) | Eventable::Pinch(_) | Eventable::Rotate(_) => 1.0,
        }
    }
}

/// The frame of `action` to dispatch this tick, if any.
///
/// A composite `Began` is only dispatched when the device event began too.
pub(crate) fn frame(events: &EventMap, action: &Action) -> Option<Frame> {
    let event = events.sendable_action_event(action)?;
    let device = *events.device_event(action)?;
    if !event.is_sendable(device.phase()) {
        tracing::trace!(
            action = action.name,
            device_phase = ?device.phase(),
            "began without a fresh device event; not dispatched"
        );
        return None;
    }
    Some(Frame {
        phase: event.phase,
        device,
    })
}

/// The closing frame of a gesture `action` that ended this tick without an
/// edit of its own types, as when a larger quasimode took over mid-drag.
///
/// Such an end is not sendable, but whoever tracked the gesture still needs
/// to hear that it is over. The frame reuses the last device event.
pub(crate) fn interrupted(events: &EventMap, action: &Action) -> Option<Frame> {
    let event = events.action_event(action)?;
    if event.phase != Phase::Ended || events.sendable_action_event(action).is_some() {
        return None;
    }
    let device = *events.device_event(action)?;
    tracing::debug!(action = action.name, "ended by a larger quasimode");
    Some(Frame {
        phase: Phase::Ended,
        device,
    })
}

/// Root location of a one-shot action firing this tick.
pub(crate) fn fired(events: &EventMap, action: &Action) -> Option<Point> {
    frame(events, action)
        .filter(|f| f.phase == Phase::Began)
        .map(|f| f.at())
}

/// Convert `at` into the local space of `key` and hand its receiver to `f`.
pub(crate) fn deliver<T: ViewTree>(
    tree: &mut T,
    key: T::Key,
    at: Point,
    f: impl FnOnce(&mut dyn Receiver, Point),
) {
    let Some(local) = tree.convert_from_root(key, at) else {
        return;
    };
    if let Some(receiver) = tree.receiver_mut(key) {
        f(receiver, local);
    }
}

/// Fire a one-shot `action` at the receiver offering `capability` under the pointer.
///
/// Returns whether a receiver was found.
pub(crate) fn one_shot<T: ViewTree>(
    events: &EventMap,
    action: &Action,
    tree: &mut T,
    capability: Capability,
    f: impl FnOnce(&mut dyn Receiver, Point),
) -> bool {
    let Some(at) = fired(events, action) else {
        return false;
    };
    let Some(key) = tree.locate(at, capability) else {
        tracing::trace!(action = action.name, "no receiver for one-shot action");
        return false;
    };
    tracing::debug!(action = action.name, ?key, "fire");
    deliver(tree, key, at, f);
    true
}

/// Advance the tracked gesture of `action` by one frame and deliver it.
///
/// The receiver found on `Began` gets every later frame until the gesture
/// ends, wherever the pointer goes. A gesture ended by suppression is closed
/// with a final `Ended` frame.
pub(crate) fn gesture<T: ViewTree>(
    events: &EventMap,
    action: &Action,
    target: &mut GestureTarget<T::Key>,
    tree: &mut T,
    capability: Capability,
    f: impl FnOnce(&mut dyn Receiver, Point, Frame),
) {
    let frame = match frame(events, action) {
        Some(frame) => frame,
        None if target.is_active() => match interrupted(events, action) {
            Some(frame) => frame,
            None => return,
        },
        None => return,
    };
    let at = frame.at();
    if let Some(key) = target.track(tree, frame.phase, at, capability) {
        deliver(tree, key, at, |r, p| f(r, p, frame));
    }
}

/// The view showing a modifier-held display mode.
///
/// A mode shows while exactly its modifiers are held; adding a modifier or
/// releasing one switches to whichever mode matches next, or to
/// [`DisplayMode::None`]. The view is found under the pointer when the mode
/// starts, and the previous view is reset when another one takes over.
#[derive(Clone, Debug)]
pub(crate) struct ModeDisplay<K> {
    mode: DisplayMode,
    target: Option<K>,
}

impl<K> Default for ModeDisplay<K> {
    fn default() -> Self {
        Self {
            mode: DisplayMode::None,
            target: None,
        }
    }
}

impl<K: Copy + Eq + core::fmt::Debug> ModeDisplay<K> {
    pub(crate) fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Recompute the mode from `modes` and push any change to the receivers.
    pub(crate) fn update<T>(
        &mut self,
        events: &EventMap,
        tree: &mut T,
        modes: &[(Action, DisplayMode)],
        capability: Capability,
        set: impl Fn(&mut dyn Receiver, DisplayMode),
    ) where
        T: ViewTree<Key = K>,
    {
        let held = modes.iter().find(|(action, _)| events.is_held_alone(action));
        let mode = held.map_or(DisplayMode::None, |&(_, mode)| mode);
        if mode == self.mode {
            return;
        }
        tracing::debug!(from = ?self.mode, to = ?mode, "display mode");
        self.mode = mode;

        let next = held.and_then(|(action, _)| {
            let at = action
                .quasimode
                .types()
                .find_map(|ty| events.event(ty))?
                .root_location();
            tree.locate(at, capability)
        });
        if let Some(previous) = self.target.filter(|&k| Some(k) != next) {
            if let Some(receiver) = tree.receiver_mut(previous) {
                set(receiver, DisplayMode::None);
            }
        }
        if let Some(key) = next {
            if let Some(receiver) = tree.receiver_mut(key) {
                set(receiver, mode);
            }
        }
        self.target = next;
    }
}
