// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Error type for traversal preconditions.
//!
//! Analysis queries (`resolve`, type inference) never produce these: for
//! them, "could not determine" is a valid terminal outcome expressed as
//! `None`. `TraverseError` covers only contract violations (operating on a
//! position handle that was never bound to a traversal context, or whose
//! container has been discarded) plus failures surfaced by visitor hooks
//! themselves.

use thiserror::Error;

/// Unified error type for traversal operations.
#[derive(Debug, Error)]
pub enum TraverseError {
    /// The operation requires a bound traversal context, but the path was
    /// never bound (or was created outside a traversal).
    #[error("path has no bound context for `{op}`")]
    UnboundPath { op: &'static str },

    /// The path's container has been discarded; the position no longer
    /// exists.
    #[error("path container is gone for `{op}`")]
    DetachedPath { op: &'static str },

    /// A visitor hook reported a failure.
    #[error("hook failed: {message}")]
    Hook { message: String },
}

impl TraverseError {
    /// Convenience constructor for hook failures.
    pub fn hook(message: impl Into<String>) -> TraverseError {
        TraverseError::Hook {
            message: message.into(),
        }
    }
}
