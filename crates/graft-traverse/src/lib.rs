// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Tree-position traversal core for graft.
//!
//! This crate is the position abstraction at the center of graft's
//! syntax-tree transformation engine: identity-stable [`Path`] handles to
//! locations inside a tree, a mutation protocol that keeps the tree, its
//! scopes, and its sibling sequences consistent across unrestricted
//! in-place rewrites, enter/exit visitor dispatch with cooperative
//! skip/stop, and best-effort constant resolution and type inference built
//! on top.
//!
//! # A traversal, end to end
//!
//! ```ignore
//! use std::rc::Rc;
//! use graft_ast::{build, NodeKind};
//! use graft_traverse::{hook, traverse, HookAction, VisitorOpts};
//!
//! let program = build::program(vec![
//!     build::expression_statement(build::identifier("before")),
//! ]);
//!
//! let opts = Rc::new(VisitorOpts::new().on_kind_enter(
//!     NodeKind::Identifier,
//!     hook(|path, _state| {
//!         Ok(HookAction::Replace(build::identifier("after")))
//!     }),
//! ));
//!
//! traverse(&program, &opts, None, None)?;
//! ```
//!
//! Hooks may destructively rewrite the position they are invoked on:
//! replace it with one node or a whole statement sequence, or remove it.
//! The engine keeps sibling iteration, scope bindings, and per-position
//! plugin data coherent across the rewrite.
//!
//! Traversal is single-threaded, synchronous, and depth-first; there is no
//! parallel execution and no suspension. Sharing one tree across threads is
//! unsupported by construction (`Rc` handles throughout).

mod context;
mod error;
mod file;
mod hooks;
mod path;
mod resolve;
mod scope;

pub use context::{dispatch_node, traverse, traverse_in_scope, Context};
pub use error::TraverseError;
pub use file::{Diagnostic, File};
pub use hooks::{
    hook, resolve_hook, Hook, HookAction, HookKind, HookSet, PluginState, VisitorOpts,
};
pub use path::{Children, Container, Path, Replacement, WeakPath};
pub use resolve::TypeInfo;
pub use scope::{Binding, BindingKind, Scope};
