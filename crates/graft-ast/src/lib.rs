// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Syntax tree node model for graft.
//!
//! This crate defines the data model the graft traversal engine operates
//! over: reference-identity nodes with a closed kind taxonomy
//! ([`NodeKind`]), containers addressed by [`Key`] (named fields on a node,
//! or indices into a sibling [`ListCell`]), structural predicates, and node
//! builders.
//!
//! The model is deliberately behavior-free: everything here is data plus
//! pure structural queries. Traversal, mutation, scope tracking, and
//! resolution live in `graft-traverse`.

pub mod build;
mod kind;
mod node;
mod predicates;

pub use kind::{required_fields, visit_fields, Field, Key, NodeKind, NODE_KINDS};
pub use node::{
    DeclKind, FieldValue, ListCell, ListRef, LiteralValue, NodeCell, NodeId, NodeRef, PathTable,
    Slot,
};
pub use predicates::{
    coerce_to_block, get_binding_identifiers, inherit_comments, is_block, is_block_scoped,
    is_literal, is_referenced, is_referenced_identifier, is_scope_introducing,
    is_statement_or_block_field, is_var, to_computed_key, NodePattern, STATEMENT_OR_BLOCK_FIELDS,
};
