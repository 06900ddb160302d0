// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive a `Sender` over a small view tree.
//!
//! A canvas holds two shapes. The script below selects with `command+drag`,
//! flips to deselect by pressing `shift` mid-drag, moves a shape with a
//! plain drag, transforms it with `option+drag`, and looks it up with a tap.
//!
//! Run:
//! - `cargo run -p understory_demos --example sender_basics`
//! - `RUST_LOG=trace cargo run -p understory_demos --example sender_basics` to
//!   watch every tick resolve.

use kurbo::{Affine, Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_action::adapters::view_tree::capabilities_of;
use understory_action::{
    ActionError, DisplayMode, Movable, Queryable, Receiver, Reference, Selectable, Sender,
    Transformable,
};
use understory_quasimode::types::{COMMAND, DRAG, OPTION, SHIFT, TAP};
use understory_quasimode::{DragEvent, KeyEvent, Phase};
use understory_view_tree::{LocalNode, NodeId, Tree};

type Views = Tree<Box<dyn Receiver>>;

/// The canvas only takes part in rubber-band selection.
#[derive(Debug)]
struct Canvas;

impl Selectable for Canvas {
    fn select(&mut self, from: Rect, phase: Phase) {
        println!("canvas: select {from:?} ({phase:?})");
    }
    fn deselect(&mut self, from: Rect, phase: Phase) {
        println!("canvas: deselect {from:?} ({phase:?})");
    }
    fn select_all(&mut self) {
        println!("canvas: select all");
    }
    fn deselect_all(&mut self) {
        println!("canvas: deselect all");
    }
}

impl Receiver for Canvas {
    fn as_selectable(&mut self) -> Option<&mut dyn Selectable> {
        Some(self)
    }
}

/// A shape can be moved, transformed and looked up.
#[derive(Debug)]
struct Shape {
    name: &'static str,
}

impl Movable for Shape {
    fn move_to(&mut self, to: Point, pressure: f64, _time: f64, phase: Phase) {
        println!("{}: move to {to:?} at pressure {pressure} ({phase:?})", self.name);
    }
}

impl Transformable for Shape {
    fn set_display_mode(&mut self, mode: DisplayMode) {
        println!("{}: handles {mode:?}", self.name);
    }
    fn transform(&mut self, at: Point, _pressure: f64, _time: f64, phase: Phase) {
        println!("{}: transform at {at:?} ({phase:?})", self.name);
    }
    fn warp(&mut self, at: Point, _pressure: f64, _time: f64, phase: Phase) {
        println!("{}: warp at {at:?} ({phase:?})", self.name);
    }
    fn move_z(&mut self, at: Point, _pressure: f64, _time: f64, phase: Phase) {
        println!("{}: move z at {at:?} ({phase:?})", self.name);
    }
}

impl Queryable for Shape {
    fn reference(&mut self, at: Point) -> Reference {
        println!("{}: looked up at {at:?}", self.name);
        Reference::new(self.name, "A shape on the canvas")
    }
}

impl Receiver for Shape {
    fn as_movable(&mut self) -> Option<&mut dyn Movable> {
        Some(self)
    }
    fn as_transformable(&mut self) -> Option<&mut dyn Transformable> {
        Some(self)
    }
    fn as_queryable(&mut self) -> Option<&mut dyn Queryable> {
        Some(self)
    }
}

fn add(
    views: &mut Views,
    parent: Option<NodeId>,
    bounds: Rect,
    transform: Affine,
    mut receiver: Box<dyn Receiver>,
) -> NodeId {
    let local = LocalNode {
        local_bounds: bounds,
        local_transform: transform,
        capabilities: capabilities_of(&mut *receiver),
        ..LocalNode::default()
    };
    views.insert(parent, local, Some(receiver))
}

fn key(phase: Phase) -> KeyEvent {
    KeyEvent {
        phase,
        ..KeyEvent::default()
    }
}

fn key_at(phase: Phase, x: f64, y: f64) -> KeyEvent {
    KeyEvent {
        root_location: Point::new(x, y),
        ..key(phase)
    }
}

fn drag(phase: Phase, x: f64, y: f64) -> DragEvent {
    DragEvent {
        root_location: Point::new(x, y),
        phase,
        pressure: 1.0,
        ..DragEvent::default()
    }
}

fn main() -> Result<(), ActionError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut views = Views::new();
    let canvas = add(
        &mut views,
        None,
        Rect::new(0.0, 0.0, 400.0, 300.0),
        Affine::IDENTITY,
        Box::new(Canvas),
    );
    add(
        &mut views,
        Some(canvas),
        Rect::new(0.0, 0.0, 80.0, 60.0),
        Affine::translate((40.0, 40.0)),
        Box::new(Shape { name: "square" }),
    );
    add(
        &mut views,
        Some(canvas),
        Rect::new(0.0, 0.0, 50.0, 50.0),
        Affine::translate((200.0, 100.0)) * Affine::rotate(0.3),
        Box::new(Shape { name: "diamond" }),
    );

    let mut sender = Sender::new();

    println!("-- command+drag selects, shift flips to deselect");
    sender.send_key(COMMAND, key(Phase::Began), &mut views)?;
    sender.send_drag(DRAG, drag(Phase::Began, 150.0, 200.0), &mut views)?;
    sender.send_drag(DRAG, drag(Phase::Changed, 250.0, 250.0), &mut views)?;
    sender.send_key(SHIFT, key(Phase::Began), &mut views)?;
    sender.send_drag(DRAG, drag(Phase::Changed, 300.0, 280.0), &mut views)?;
    sender.send_drag(DRAG, drag(Phase::Ended, 300.0, 280.0), &mut views)?;
    sender.send_key(SHIFT, key(Phase::Ended), &mut views)?;
    sender.send_key(COMMAND, key(Phase::Ended), &mut views)?;

    println!("-- plain drag moves the square");
    sender.send_drag(DRAG, drag(Phase::Began, 60.0, 60.0), &mut views)?;
    sender.send_drag(DRAG, drag(Phase::Changed, 90.0, 70.0), &mut views)?;
    sender.send_drag(DRAG, drag(Phase::Ended, 100.0, 80.0), &mut views)?;

    println!("-- option shows the diamond's handles, option+drag transforms it");
    sender.send_key(OPTION, key_at(Phase::Began, 215.0, 120.0), &mut views)?;
    sender.send_drag(DRAG, drag(Phase::Began, 215.0, 120.0), &mut views)?;
    sender.send_drag(DRAG, drag(Phase::Ended, 220.0, 125.0), &mut views)?;
    sender.send_key(OPTION, key_at(Phase::Ended, 220.0, 125.0), &mut views)?;

    println!("-- a tap looks up the square");
    sender.send_key(TAP, key_at(Phase::Began, 60.0, 60.0), &mut views)?;
    sender.send_key(TAP, key_at(Phase::Ended, 60.0, 60.0), &mut views)?;

    println!("-- a drag payload sent as a key is rejected");
    if let Err(err) = sender.send_key(DRAG, key(Phase::Began), &mut views) {
        println!("rejected: {err}");
    }

    Ok(())
}
