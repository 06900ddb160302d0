// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability traits implemented by objects that receive actions.
//!
//! Every action family has one trait. Points and rectangles handed to a
//! receiver are already in its local space; phases are composite action
//! phases, not device phases.
//!
//! A host object opts into families by implementing the traits and
//! overriding the matching [`Receiver`] accessors:
//!
//! ```
//! use kurbo::Point;
//! use understory_action::{Queryable, Receiver, Reference};
//!
//! struct Shape;
//!
//! impl Queryable for Shape {
//!     fn reference(&mut self, _at: Point) -> Reference {
//!         Reference::new("Shape", "A closed outline")
//!     }
//! }
//!
//! impl Receiver for Shape {
//!     fn as_queryable(&mut self) -> Option<&mut dyn Queryable> {
//!         Some(self)
//!     }
//! }
//!
//! let mut shape = Shape;
//! let reference = shape.as_queryable().unwrap().reference(Point::ORIGIN);
//! assert_eq!(reference.name, "Shape");
//! assert!(shape.as_movable().is_none());
//! ```

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use kurbo::{Point, Rect, Vec2};
use understory_quasimode::Phase;

/// An object placed on the pasteboard by [`Copiable::copied_objects`].
///
/// Payload semantics belong to the receivers; the pasteboard only moves them around.
pub type CopiedObject = Rc<dyn Any>;

/// What a [`Queryable`] object says about itself when looked up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reference {
    /// Short name of the kind of object.
    pub name: String,
    /// One or two sentences on what it is and how to use it.
    pub description: String,
}

impl Reference {
    /// Create a reference.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Receiver capability, one per action family.
///
/// Hit testing is filtered by capability: a view is only located for a
/// family it advertises.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// [`Indicatable`].
    Indicatable,
    /// [`Selectable`].
    Selectable,
    /// [`Bindable`].
    Bindable,
    /// [`Scrollable`].
    Scrollable,
    /// [`Zoomable`].
    Zoomable,
    /// [`Rotatable`].
    Rotatable,
    /// [`Queryable`].
    Queryable,
    /// [`Undoable`].
    Undoable,
    /// [`Copiable`].
    Copiable,
    /// [`Newable`].
    Newable,
    /// [`Runnable`].
    Runnable,
    /// [`Movable`].
    Movable,
    /// [`Transformable`].
    Transformable,
    /// [`Strokable`].
    Strokable,
    /// [`PointEditable`].
    PointEditable,
}

impl Capability {
    /// Every capability.
    pub const ALL: [Self; 15] = [
        Self::Indicatable,
        Self::Selectable,
        Self::Bindable,
        Self::Scrollable,
        Self::Zoomable,
        Self::Rotatable,
        Self::Queryable,
        Self::Undoable,
        Self::Copiable,
        Self::Newable,
        Self::Runnable,
        Self::Movable,
        Self::Transformable,
        Self::Strokable,
        Self::PointEditable,
    ];
}

/// How an object draws its editing handles while a mode modifier is held.
///
/// [`Transformable`] objects see the first three modes, [`PointEditable`]
/// objects the last two; both are reset to [`DisplayMode::None`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    /// Regular display.
    #[default]
    None,
    /// Show stacking handles.
    MoveZ,
    /// Show transform handles.
    Transform,
    /// Show warp handles.
    Warp,
    /// Show editable points.
    EditPoint,
    /// Show vertices.
    Vertex,
}

/// Hover highlighting.
pub trait Indicatable {
    /// The pointer is over `at`.
    fn indicate(&mut self, at: Point);
}

/// Marquee selection.
pub trait Selectable {
    /// Select what lies in `from`. Called every frame of the marquee gesture.
    fn select(&mut self, from: Rect, phase: Phase);
    /// Deselect what lies in `from`. Called every frame of the marquee gesture.
    fn deselect(&mut self, from: Rect, phase: Phase);
    /// Select everything.
    fn select_all(&mut self);
    /// Deselect everything.
    fn deselect_all(&mut self);
}

/// Zooming.
pub trait Zoomable {
    /// Zoom around `at` by `magnification` for this frame.
    fn zoom(&mut self, at: Point, time: f64, magnification: f64, phase: Phase);
    /// Restore the default view.
    fn reset_view(&mut self, at: Point);
}

/// View rotation.
pub trait Rotatable {
    /// Rotate around `at` by `quantity` degrees for this frame.
    fn rotate(&mut self, at: Point, time: f64, quantity: f64, phase: Phase);
}

/// Scrolling.
pub trait Scrollable {
    /// Scroll by `delta`. `momentum_phase` tracks the inertial tail when the
    /// platform reports one.
    fn scroll(
        &mut self,
        at: Point,
        time: f64,
        delta: Vec2,
        phase: Phase,
        momentum_phase: Option<Phase>,
    );
}

/// Looking up what an object is.
pub trait Queryable {
    /// Describe what is at `at`.
    fn reference(&mut self, at: Point) -> Reference;
}

/// Undo and redo.
pub trait Undoable {
    /// Undo the last change.
    fn undo(&mut self);
    /// Redo the last undone change.
    fn redo(&mut self);
}

/// Copy, cut and paste.
pub trait Copiable {
    /// Objects to place on the pasteboard for a copy at `at`. Empty when
    /// there is nothing to copy.
    fn copied_objects(&mut self, at: Point) -> Vec<CopiedObject>;
    /// Delete what is at `at`; the second half of a cut.
    fn delete(&mut self, at: Point);
    /// Paste `objects` at `at`.
    fn paste(&mut self, objects: &[CopiedObject], at: Point);
}

/// Binding.
pub trait Bindable {
    /// Bind what is at `at`.
    fn bind(&mut self, at: Point);
}

/// Object creation.
pub trait Newable {
    /// Create a new object at `at`.
    fn new_object(&mut self, at: Point);
}

/// Running.
pub trait Runnable {
    /// Run what is at `at`.
    fn run(&mut self, at: Point);
}

/// Moving objects in the plane.
pub trait Movable {
    /// Move so the grabbed point follows `to`.
    fn move_to(&mut self, to: Point, pressure: f64, time: f64, phase: Phase);
}

/// Free transform, warp and stacking order.
pub trait Transformable {
    /// Show or hide handles: [`DisplayMode::Transform`], [`DisplayMode::Warp`],
    /// [`DisplayMode::MoveZ`] or [`DisplayMode::None`].
    fn set_display_mode(&mut self, mode: DisplayMode);
    /// Transform from a drag at `at`.
    fn transform(&mut self, at: Point, pressure: f64, time: f64, phase: Phase);
    /// Warp from a drag at `at`.
    fn warp(&mut self, at: Point, pressure: f64, time: f64, phase: Phase);
    /// Change stacking order with a vertical drag at `at`.
    fn move_z(&mut self, at: Point, pressure: f64, time: f64, phase: Phase);
}

/// Stroking with a secondary drag.
pub trait Strokable {
    /// Extend the stroke to `at`.
    fn stroke(&mut self, at: Point, pressure: f64, time: f64, phase: Phase);
    /// Extend the erasing lasso to `at`.
    fn lasso_erase(&mut self, at: Point, pressure: f64, time: f64, phase: Phase);
}

/// Point and vertex editing.
pub trait PointEditable {
    /// Show or hide handles: [`DisplayMode::EditPoint`],
    /// [`DisplayMode::Vertex`] or [`DisplayMode::None`].
    fn set_display_mode(&mut self, mode: DisplayMode);
    /// Insert a point at `at`.
    fn insert_point(&mut self, at: Point);
    /// Remove the point nearest to `at`.
    fn remove_nearest_point(&mut self, at: Point);
    /// Move the grabbed point to `at`.
    fn move_point(&mut self, at: Point, pressure: f64, time: f64, phase: Phase);
    /// Move the grabbed vertex to `at`.
    fn move_vertex(&mut self, at: Point, pressure: f64, time: f64, phase: Phase);
}

/// An object that can be the target of action events.
///
/// Each accessor returns the object as one capability, or `None` if the
/// object does not take part in that family. All accessors default to `None`.
pub trait Receiver {
    /// As [`Indicatable`].
    fn as_indicatable(&mut self) -> Option<&mut dyn Indicatable> {
        None
    }
    /// As [`Selectable`].
    fn as_selectable(&mut self) -> Option<&mut dyn Selectable> {
        None
    }
    /// As [`Zoomable`].
    fn as_zoomable(&mut self) -> Option<&mut dyn Zoomable> {
        None
    }
    /// As [`Rotatable`].
    fn as_rotatable(&mut self) -> Option<&mut dyn Rotatable> {
        None
    }
    /// As [`Scrollable`].
    fn as_scrollable(&mut self) -> Option<&mut dyn Scrollable> {
        None
    }
    /// As [`Queryable`].
    fn as_queryable(&mut self) -> Option<&mut dyn Queryable> {
        None
    }
    /// As [`Undoable`].
    fn as_undoable(&mut self) -> Option<&mut dyn Undoable> {
        None
    }
    /// As [`Copiable`].
    fn as_copiable(&mut self) -> Option<&mut dyn Copiable> {
        None
    }
    /// As [`Bindable`].
    fn as_bindable(&mut self) -> Option<&mut dyn Bindable> {
        None
    }
    /// As [`Newable`].
    fn as_newable(&mut self) -> Option<&mut dyn Newable> {
        None
    }
    /// As [`Runnable`].
    fn as_runnable(&mut self) -> Option<&mut dyn Runnable> {
        None
    }
    /// As [`Movable`].
    fn as_movable(&mut self) -> Option<&mut dyn Movable> {
        None
    }
    /// As [`Transformable`].
    fn as_transformable(&mut self) -> Option<&mut dyn Transformable> {
        None
    }
    /// As [`Strokable`].
    fn as_strokable(&mut self) -> Option<&mut dyn Strokable> {
        None
    }
    /// As [`PointEditable`].
    fn as_point_editable(&mut self) -> Option<&mut dyn PointEditable> {
        None
    }

    /// Whether this object takes part in `capability`.
    fn supports(&mut self, capability: Capability) -> bool {
        match capability {
            Capability::Indicatable => self.as_indicatable().is_some(),
            Capability::Selectable => self.as_selectable().is_some(),
            Capability::Zoomable => self.as_zoomable().is_some(),
            Capability::Rotatable => self.as_rotatable().is_some(),
            Capability::Scrollable => self.as_scrollable().is_some(),
            Capability::Queryable => self.as_queryable().is_some(),
            Capability::Undoable => self.as_undoable().is_some(),
            Capability::Copiable => self.as_copiable().is_some(),
            Capability::Bindable => self.as_bindable().is_some(),
            Capability::Newable => self.as_newable().is_some(),
            Capability::Runnable => self.as_runnable().is_some(),
            Capability::Movable => self.as_movable().is_some(),
            Capability::Transformable => self.as_transformable().is_some(),
            Capability::Strokable => self.as_strokable().is_some(),
            Capability::PointEditable => self.as_point_editable().is_some(),
        }
    }
}
