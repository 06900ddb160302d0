// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;
use understory_quasimode::{CatalogError, Error as EventError};

/// Errors surfaced by [`Sender`](crate::Sender).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The managers' actions do not form a valid catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// A raw event was rejected before any dispatch.
    #[error(transparent)]
    Event(#[from] EventError),
}
