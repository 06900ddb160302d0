// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test fixtures: a flat view list with recording receivers, and a harness
//! that runs one manager through full ticks.

use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Point, Rect, Vec2};
use understory_quasimode::{
    Catalog, DragEvent, EventMap, Eventable, EventableType, KeyEvent, Phase, PinchEvent,
    RotateEvent, ScrollEvent,
};

use crate::manager::ActionManager;
use crate::receiver::*;
use crate::view::ViewTree;

/// A receiver call, in the receiver's local space.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Indicate(Point),
    Select(Rect, Phase),
    Deselect(Rect, Phase),
    SelectAll,
    DeselectAll,
    Zoom(Point, f64, Phase),
    ResetView(Point),
    Rotate(Point, f64, Phase),
    Scroll(Point, Vec2, Phase, Option<Phase>),
    LookUp(Point),
    Undo,
    Redo,
    Copied(Point),
    Paste(usize, Point),
    Delete(Point),
    Bind(Point),
    New(Point),
    Run(Point),
    Move(Point, Phase),
    MoveZ(Point, Phase),
    Transform(Point, Phase),
    Warp(Point, Phase),
    Stroke(Point, Phase),
    LassoErase(Point, Phase),
    DisplayMode(DisplayMode),
    InsertPoint(Point),
    RemoveNearestPoint(Point),
    MovePoint(Point, Phase),
    MoveVertex(Point, Phase),
}

pub(crate) type Log = Rc<RefCell<Vec<(&'static str, Call)>>>;

/// Receiver implementing every capability and logging each call.
#[derive(Debug)]
pub(crate) struct Recorder {
    name: &'static str,
    log: Log,
    /// Whether a copy yields anything.
    has_copy: bool,
}

impl Recorder {
    pub(crate) fn new(name: &'static str, log: Log) -> Self {
        Self {
            name,
            log,
            has_copy: true,
        }
    }

    fn push(&self, call: Call) {
        self.log.borrow_mut().push((self.name, call));
    }
}

impl Indicatable for Recorder {
    fn indicate(&mut self, at: Point) {
        self.push(Call::Indicate(at));
    }
}

impl Selectable for Recorder {
    fn select(&mut self, from: Rect, phase: Phase) {
        self.push(Call::Select(from, phase));
    }
    fn deselect(&mut self, from: Rect, phase: Phase) {
        self.push(Call::Deselect(from, phase));
    }
    fn select_all(&mut self) {
        self.push(Call::SelectAll);
    }
    fn deselect_all(&mut self) {
        self.push(Call::DeselectAll);
    }
}

impl Zoomable for Recorder {
    fn zoom(&mut self, at: Point, _time: f64, magnification: f64, phase: Phase) {
        self.push(Call::Zoom(at, magnification, phase));
    }
    fn reset_view(&mut self, at: Point) {
        self.push(Call::ResetView(at));
    }
}

impl Rotatable for Recorder {
    fn rotate(&mut self, at: Point, _time: f64, quantity: f64, phase: Phase) {
        self.push(Call::Rotate(at, quantity, phase));
    }
}

impl Scrollable for Recorder {
    fn scroll(
        &mut self,
        at: Point,
        _time: f64,
        delta: Vec2,
        phase: Phase,
        momentum_phase: Option<Phase>,
    ) {
        self.push(Call::Scroll(at, delta, phase, momentum_phase));
    }
}

impl Queryable for Recorder {
    fn reference(&mut self, at: Point) -> Reference {
        self.push(Call::LookUp(at));
        Reference::new(self.name, "recorder")
    }
}

impl Undoable for Recorder {
    fn undo(&mut self) {
        self.push(Call::Undo);
    }
    fn redo(&mut self) {
        self.push(Call::Redo);
    }
}

impl Copiable for Recorder {
    fn copied_objects(&mut self, at: Point) -> Vec<CopiedObject> {
        self.push(Call::Copied(at));
        if !self.has_copy {
            return Vec::new();
        }
        let object: CopiedObject = Rc::new(self.name);
        vec![object]
    }
    fn delete(&mut self, at: Point) {
        self.push(Call::Delete(at));
    }
    fn paste(&mut self, objects: &[CopiedObject], at: Point) {
        self.push(Call::Paste(objects.len(), at));
    }
}

impl Bindable for Recorder {
    fn bind(&mut self, at: Point) {
        self.push(Call::Bind(at));
    }
}

impl Newable for Recorder {
    fn new_object(&mut self, at: Point) {
        self.push(Call::New(at));
    }
}

impl Runnable for Recorder {
    fn run(&mut self, at: Point) {
        self.push(Call::Run(at));
    }
}

impl Movable for Recorder {
    fn move_to(&mut self, to: Point, _pressure: f64, _time: f64, phase: Phase) {
        self.push(Call::Move(to, phase));
    }
}

impl Transformable for Recorder {
    fn set_display_mode(&mut self, mode: DisplayMode) {
        self.push(Call::DisplayMode(mode));
    }
    fn transform(&mut self, at: Point, _pressure: f64, _time: f64, phase: Phase) {
        self.push(Call::Transform(at, phase));
    }
    fn warp(&mut self, at: Point, _pressure: f64, _time: f64, phase: Phase) {
        self.push(Call::Warp(at, phase));
    }
    fn move_z(&mut self, at: Point, _pressure: f64, _time: f64, phase: Phase) {
        self.push(Call::MoveZ(at, phase));
    }
}

impl Strokable for Recorder {
    fn stroke(&mut self, at: Point, _pressure: f64, _time: f64, phase: Phase) {
        self.push(Call::Stroke(at, phase));
    }
    fn lasso_erase(&mut self, at: Point, _pressure: f64, _time: f64, phase: Phase) {
        self.push(Call::LassoErase(at, phase));
    }
}

impl PointEditable for Recorder {
    fn set_display_mode(&mut self, mode: DisplayMode) {
        self.push(Call::DisplayMode(mode));
    }
    fn insert_point(&mut self, at: Point) {
        self.push(Call::InsertPoint(at));
    }
    fn remove_nearest_point(&mut self, at: Point) {
        self.push(Call::RemoveNearestPoint(at));
    }
    fn move_point(&mut self, at: Point, _pressure: f64, _time: f64, phase: Phase) {
        self.push(Call::MovePoint(at, phase));
    }
    fn move_vertex(&mut self, at: Point, _pressure: f64, _time: f64, phase: Phase) {
        self.push(Call::MoveVertex(at, phase));
    }
}

impl Receiver for Recorder {
    fn as_indicatable(&mut self) -> Option<&mut dyn Indicatable> {
        Some(self)
    }
    fn as_selectable(&mut self) -> Option<&mut dyn Selectable> {
        Some(self)
    }
    fn as_zoomable(&mut self) -> Option<&mut dyn Zoomable> {
        Some(self)
    }
    fn as_rotatable(&mut self) -> Option<&mut dyn Rotatable> {
        Some(self)
    }
    fn as_scrollable(&mut self) -> Option<&mut dyn Scrollable> {
        Some(self)
    }
    fn as_queryable(&mut self) -> Option<&mut dyn Queryable> {
        Some(self)
    }
    fn as_undoable(&mut self) -> Option<&mut dyn Undoable> {
        Some(self)
    }
    fn as_copiable(&mut self) -> Option<&mut dyn Copiable> {
        Some(self)
    }
    fn as_bindable(&mut self) -> Option<&mut dyn Bindable> {
        Some(self)
    }
    fn as_newable(&mut self) -> Option<&mut dyn Newable> {
        Some(self)
    }
    fn as_runnable(&mut self) -> Option<&mut dyn Runnable> {
        Some(self)
    }
    fn as_movable(&mut self) -> Option<&mut dyn Movable> {
        Some(self)
    }
    fn as_transformable(&mut self) -> Option<&mut dyn Transformable> {
        Some(self)
    }
    fn as_strokable(&mut self) -> Option<&mut dyn Strokable> {
        Some(self)
    }
    fn as_point_editable(&mut self) -> Option<&mut dyn PointEditable> {
        Some(self)
    }
}

#[derive(Debug)]
struct FakeView {
    frame: Rect,
    capabilities: Vec<Capability>,
    alive: bool,
    receiver: Option<Recorder>,
}

/// Flat list of axis-aligned views; later views are in front.
///
/// Local space of a view is its frame translated to the origin.
#[derive(Debug, Default)]
pub(crate) struct FakeTree {
    views: Vec<FakeView>,
    log: Log,
}

impl FakeTree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(
        &mut self,
        name: &'static str,
        frame: Rect,
        capabilities: &[Capability],
    ) -> usize {
        self.views.push(FakeView {
            frame,
            capabilities: capabilities.to_vec(),
            alive: true,
            receiver: Some(Recorder::new(name, self.log.clone())),
        });
        self.views.len() - 1
    }

    pub(crate) fn remove(&mut self, key: usize) {
        self.views[key].alive = false;
    }

    /// Make copies from `key` come back empty.
    pub(crate) fn empty_copies(&mut self, key: usize) {
        if let Some(recorder) = self.views[key].receiver.as_mut() {
            recorder.has_copy = false;
        }
    }

    /// Drain the calls received so far.
    pub(crate) fn take_calls(&mut self) -> Vec<(&'static str, Call)> {
        core::mem::take(&mut *self.log.borrow_mut())
    }

    /// Frames of the live overlays.
    pub(crate) fn overlays(&self) -> Vec<Rect> {
        self.views
            .iter()
            .filter(|v| v.alive && v.receiver.is_none())
            .map(|v| v.frame)
            .collect()
    }
}

impl ViewTree for FakeTree {
    type Key = usize;

    fn locate(&self, at: Point, capability: Capability) -> Option<usize> {
        self.views.iter().rposition(|v| {
            v.alive
                && v.receiver.is_some()
                && v.capabilities.contains(&capability)
                && v.frame.contains(at)
        })
    }

    fn is_alive(&self, key: usize) -> bool {
        self.views.get(key).is_some_and(|v| v.alive)
    }

    fn convert_from_root(&self, key: usize, point: Point) -> Option<Point> {
        let view = self.views.get(key).filter(|v| v.alive)?;
        Some(point - view.frame.origin().to_vec2())
    }

    fn receiver_mut(&mut self, key: usize) -> Option<&mut dyn Receiver> {
        let view = self.views.get_mut(key).filter(|v| v.alive)?;
        view.receiver.as_mut().map(|r| r as &mut dyn Receiver)
    }

    fn insert_overlay(&mut self, frame: Rect) -> usize {
        self.views.push(FakeView {
            frame,
            capabilities: Vec::new(),
            alive: true,
            receiver: None,
        });
        self.views.len() - 1
    }

    fn set_overlay_frame(&mut self, overlay: usize, frame: Rect) {
        if let Some(view) = self.views.get_mut(overlay) {
            view.frame = frame;
        }
    }

    fn remove_overlay(&mut self, overlay: usize) {
        self.remove(overlay);
    }
}

/// Runs one manager through full ticks against the standard catalog.
pub(crate) struct Harness<M> {
    pub(crate) events: EventMap,
    pub(crate) catalog: Catalog,
    pub(crate) manager: M,
    pub(crate) tree: FakeTree,
}

impl<M: ActionManager<FakeTree>> Harness<M> {
    pub(crate) fn new(manager: M, tree: FakeTree) -> Self {
        Self {
            events: EventMap::new(),
            catalog: Catalog::standard(),
            manager,
            tree,
        }
    }

    pub(crate) fn tick(&mut self, ty: EventableType, event: impl Into<Eventable>) {
        if !self.events.record(ty, event).unwrap() {
            return;
        }
        self.events.update_action_events(&self.catalog);
        self.manager.send(&self.events, &mut self.tree);
        self.events.remove_ended_action_events();
        self.events.settle();
    }

    pub(crate) fn key(&mut self, ty: EventableType, phase: Phase, at: Point) {
        let event = KeyEvent {
            root_location: at,
            phase,
            pressure: 1.0,
            ..KeyEvent::default()
        };
        self.tick(ty, event);
    }

    /// Press and release a key.
    pub(crate) fn tap(&mut self, ty: EventableType, at: Point) {
        self.key(ty, Phase::Began, at);
        self.key(ty, Phase::Ended, at);
    }

    pub(crate) fn drag(&mut self, ty: EventableType, phase: Phase, at: Point) {
        let event = DragEvent {
            root_location: at,
            phase,
            pressure: 0.5,
            ..DragEvent::default()
        };
        self.tick(ty, event);
    }

    pub(crate) fn scroll(&mut self, phase: Phase, at: Point, delta: Vec2) {
        let event = ScrollEvent {
            root_location: at,
            phase,
            delta,
            ..ScrollEvent::default()
        };
        self.tick(understory_quasimode::types::SCROLL, event);
    }

    pub(crate) fn pinch(&mut self, phase: Phase, at: Point, magnification: f64) {
        let event = PinchEvent {
            root_location: at,
            phase,
            magnification,
            ..PinchEvent::default()
        };
        self.tick(understory_quasimode::types::PINCH, event);
    }

    pub(crate) fn rotate(&mut self, phase: Phase, at: Point, rotation: f64) {
        let event = RotateEvent {
            root_location: at,
            phase,
            rotation,
            ..RotateEvent::default()
        };
        self.tick(understory_quasimode::types::ROTATE, event);
    }

    pub(crate) fn calls(&mut self) -> Vec<(&'static str, Call)> {
        self.tree.take_calls()
    }
}
