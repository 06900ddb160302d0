// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The standard action managers, one per receiver capability.
//!
//! | manager | actions | capability |
//! |---|---|---|
//! | [`IndicatableActionManager`] | `indicate` | [`Indicatable`](crate::Indicatable) |
//! | [`SelectableActionManager`] | `select`, `selectAll`, `deselect`, `deselectAll` | [`Selectable`](crate::Selectable) |
//! | [`BindableActionManager`] | `bind` | [`Bindable`](crate::Bindable) |
//! | [`ScrollableActionManager`] | `scroll` | [`Scrollable`](crate::Scrollable) |
//! | [`ZoomableActionManager`] | `zoom`, `resetView` | [`Zoomable`](crate::Zoomable) |
//! | [`RotatableActionManager`] | `rotate` | [`Rotatable`](crate::Rotatable) |
//! | [`QueryableActionManager`] | `lookUp` | [`Queryable`](crate::Queryable) |
//! | [`UndoableActionManager`] | `undo`, `redo` | [`Undoable`](crate::Undoable) |
//! | [`CopiableActionManager`] | `cut`, `copy`, `paste` | [`Copiable`](crate::Copiable) |
//! | [`NewableActionManager`] | `new` | [`Newable`](crate::Newable) |
//! | [`RunnableActionManager`] | `run` | [`Runnable`](crate::Runnable) |
//! | [`TransformableActionManager`] | `move`, `transformMode`, `transform`, `warpMode`, `warp`, `moveZMode`, `moveZ` | [`Movable`](crate::Movable), [`Transformable`](crate::Transformable) |
//! | [`StrokableActionManager`] | `stroke`, `lassoErase` | [`Strokable`](crate::Strokable) |
//! | [`PointEditableActionManager`] | `editPointMode`, `removePoint`, `insertPoint`, `movePoint`, `vertexMode`, `moveVertex` | [`PointEditable`](crate::PointEditable) |

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::manager::ActionManager;
use crate::view::ViewTree;

mod commands;
mod editing;
mod indicatable;
mod navigation;
mod point_editable;
mod queryable;
mod selectable;
mod strokable;
mod transformable;

pub use commands::{BindableActionManager, NewableActionManager, RunnableActionManager};
pub use editing::{CopiableActionManager, UndoableActionManager};
pub use indicatable::IndicatableActionManager;
pub use navigation::{RotatableActionManager, ScrollableActionManager, ZoomableActionManager};
pub use point_editable::PointEditableActionManager;
pub use queryable::QueryableActionManager;
pub use selectable::{SelectMode, SelectableActionManager};
pub use strokable::StrokableActionManager;
pub use transformable::TransformableActionManager;

/// One of each standard manager, in the order of
/// [`catalog::ALL`](understory_quasimode::catalog::ALL).
pub fn default_managers<T: ViewTree>() -> Vec<Box<dyn ActionManager<T>>> {
    vec![
        Box::new(IndicatableActionManager),
        Box::new(SelectableActionManager::<T::Key>::new()),
        Box::new(BindableActionManager),
        Box::new(ScrollableActionManager::<T::Key>::new()),
        Box::new(ZoomableActionManager::<T::Key>::new()),
        Box::new(RotatableActionManager::<T::Key>::new()),
        Box::new(QueryableActionManager::new()),
        Box::new(UndoableActionManager),
        Box::new(CopiableActionManager::new()),
        Box::new(NewableActionManager),
        Box::new(RunnableActionManager),
        Box::new(TransformableActionManager::<T::Key>::new()),
        Box::new(StrokableActionManager::<T::Key>::new()),
        Box::new(PointEditableActionManager::<T::Key>::new()),
    ]
}
