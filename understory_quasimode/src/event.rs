// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-channel event payloads.
//!
//! The platform layer builds one of these for every physical event and hands
//! it to [`EventMap::record`](crate::EventMap::record). Payloads are plain
//! values; nothing mutates them after construction except the map demoting a
//! stored phase at the end of a tick.

use kurbo::{Point, Vec2};

use crate::types::Channel;

/// Lifecycle phase, used both for raw device events and for composite action phases.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// First frame.
    #[default]
    Began,
    /// Any frame between the first and the last.
    Changed,
    /// Last frame.
    Ended,
}

/// Key press or release.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct KeyEvent {
    /// Pointer location in root space when the key changed.
    pub root_location: Point,
    /// Timestamp in seconds.
    pub time: f64,
    /// Device phase: press is `Began`, release is `Ended`.
    pub phase: Phase,
    /// Click pressure, `1.0` for ordinary keys.
    pub pressure: f64,
}

/// Pointer movement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DragEvent {
    /// Pointer location in root space.
    pub root_location: Point,
    /// Timestamp in seconds.
    pub time: f64,
    /// Device phase.
    pub phase: Phase,
    /// Pen or force-touch pressure in `0.0..=1.0`.
    pub pressure: f64,
}

/// Scroll wheel or trackpad scroll.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollEvent {
    /// Pointer location in root space.
    pub root_location: Point,
    /// Timestamp in seconds.
    pub time: f64,
    /// Device phase.
    pub phase: Phase,
    /// Scroll delta.
    pub delta: Vec2,
    /// Phase of the inertial tail, if the platform reports one.
    pub momentum_phase: Option<Phase>,
}

/// Trackpad pinch.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PinchEvent {
    /// Pointer location in root space.
    pub root_location: Point,
    /// Timestamp in seconds.
    pub time: f64,
    /// Device phase.
    pub phase: Phase,
    /// Magnification delta for this frame.
    pub magnification: f64,
}

/// Trackpad rotation.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RotateEvent {
    /// Pointer location in root space.
    pub root_location: Point,
    /// Timestamp in seconds.
    pub time: f64,
    /// Device phase.
    pub phase: Phase,
    /// Rotation delta for this frame, in degrees.
    pub rotation: f64,
}

/// A raw event from any channel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Eventable {
    /// Key press or release.
    Key(KeyEvent),
    /// Pointer movement.
    Drag(DragEvent),
    /// Scrolling.
    Scroll(ScrollEvent),
    /// Pinching.
    Pinch(PinchEvent),
    /// Rotating.
    Rotate(RotateEvent),
}

impl Eventable {
    /// Channel this event arrived on.
    pub fn channel(&self) -> Channel {
        match self {
            Self::Key(_) => Channel::Key,
            Self::Drag(_) => Channel::Drag,
            Self::Scroll(_) => Channel::Scroll,
            Self::Pinch(_) => Channel::Pinch,
            Self::Rotate(_) => Channel::Rotate,
        }
    }

    /// Location in root space.
    pub fn root_location(&self) -> Point {
        match self {
            Self::Key(e) => e.root_location,
            Self::Drag(e) => e.root_location,
            Self::Scroll(e) => e.root_location,
            Self::Pinch(e) => e.root_location,
            Self::Rotate(e) => e.root_location,
        }
    }

    /// Timestamp in seconds.
    pub fn time(&self) -> f64 {
        match self {
            Self::Key(e) => e.time,
            Self::Drag(e) => e.time,
            Self::Scroll(e) => e.time,
            Self::Pinch(e) => e.time,
            Self::Rotate(e) => e.time,
        }
    }

    /// Device phase.
    pub fn phase(&self) -> Phase {
        match self {
            Self::Key(e) => e.phase,
            Self::Drag(e) => e.phase,
            Self::Scroll(e) => e.phase,
            Self::Pinch(e) => e.phase,
            Self::Rotate(e) => e.phase,
        }
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        match self {
            Self::Key(e) => e.phase = phase,
            Self::Drag(e) => e.phase = phase,
            Self::Scroll(e) => e.phase = phase,
            Self::Pinch(e) => e.phase = phase,
            Self::Rotate(e) => e.phase = phase,
        }
    }
}

/// A concrete payload type belonging to exactly one channel.
///
/// Lets callers record and read back events without matching on [`Eventable`].
pub trait ChannelEvent: Copy + Into<Eventable> {
    /// Channel the payload belongs to.
    const CHANNEL: Channel;

    /// Borrow the payload out of a raw event of the matching channel.
    fn from_eventable(event: &Eventable) -> Option<&Self>;
}

macro_rules! channel_event {
    ($ty:ident, $variant:ident) => {
        impl From<$ty> for Eventable {
            fn from(event: $ty) -> Self {
                Self::$variant(event)
            }
        }

        impl ChannelEvent for $ty {
            const CHANNEL: Channel = Channel::$variant;

            fn from_eventable(event: &Eventable) -> Option<&Self> {
                match event {
                    Eventable::$variant(e) => Some(e),
                    _ => None,
                }
            }
        }
    };
}

channel_event!(KeyEvent, Key);
channel_event!(DragEvent, Drag);
channel_event!(ScrollEvent, Scroll);
channel_event!(PinchEvent, Pinch);
channel_event!(RotateEvent, Rotate);
