// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Resolution itself never fails: hit-test misses, released channels and
//! ambiguous arbitration are ordinary states. Errors are limited to feeding
//! the engine inconsistent input or building an invalid catalog.

use thiserror::Error;

use crate::types::Channel;

/// Errors raised while recording raw events.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The payload belongs to a different channel than the eventable type.
    #[error("`{name}` is a {expected:?} type but received a {actual:?} event")]
    ChannelMismatch {
        /// Name of the eventable type.
        name: &'static str,
        /// Channel of the eventable type.
        expected: Channel,
        /// Channel of the payload.
        actual: Channel,
    },
}

/// Errors raised while building a [`Catalog`](crate::Catalog).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two actions share a name.
    #[error("duplicate action name `{0}`")]
    DuplicateName(&'static str),
    /// Two actions require exactly the same set of types; they would suppress
    /// each other and never fire.
    #[error("actions `{first}` and `{second}` have identical quasimodes")]
    IdenticalQuasimode {
        /// Earlier action in catalog order.
        first: &'static str,
        /// Later action in catalog order.
        second: &'static str,
    },
    /// An action requires no types and would be hittable at all times.
    #[error("action `{0}` has an empty quasimode")]
    EmptyQuasimode(&'static str),
}
