// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The validating file collaborator.
//!
//! A [`File`] represents the compilation unit a tree belongs to. After every
//! mutation, the mutation protocol hands each replacement node to
//! [`File::check_node`], which walks the replacement subtree and records a
//! [`Diagnostic`] for every node missing a structurally mandatory slot. The
//! traversal core triggers the check and passes its outcome through; it
//! never interprets or recovers from what the check finds.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use tracing::debug;

use graft_ast::{required_fields, Field, NodeKind, NodeRef};

use crate::scope::Scope;

/// One structural finding recorded by [`File::check_node`].
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Diagnostic identifier of the offending node.
    pub node: u64,
    /// Kind of the offending node.
    pub kind: NodeKind,
    /// The missing slot.
    pub field: Field,
    /// Human-readable description.
    pub message: String,
}

/// The compilation unit a tree belongs to: owns the diagnostics produced by
/// post-mutation structural checks.
#[derive(Default)]
pub struct File {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl File {
    pub fn new() -> Rc<File> {
        Rc::new(File::default())
    }

    /// Structurally check one replacement node under the given scope,
    /// recording a diagnostic per missing mandatory slot. The whole subtree
    /// is checked; the scope identifies where the replacement landed.
    pub fn check_node(&self, node: &NodeRef, _scope: &Rc<Scope>) {
        self.check_subtree(node);
    }

    fn check_subtree(&self, node: &NodeRef) {
        for field in required_fields(node.kind()) {
            if !node.has_field(*field) {
                debug!(kind = %node.kind(), field = %field, "node is missing a mandatory slot");
                self.diagnostics.borrow_mut().push(Diagnostic {
                    node: node.id().as_u64(),
                    kind: node.kind(),
                    field: *field,
                    message: format!("{} is missing mandatory slot `{}`", node.kind(), field),
                });
            }
        }
        for (_, value) in node.fields() {
            match value {
                graft_ast::FieldValue::Node(child) => self.check_subtree(&child),
                graft_ast::FieldValue::List(list) => {
                    for child in list.nodes() {
                        self.check_subtree(&child);
                    }
                }
                graft_ast::FieldValue::Seq(children) => {
                    for child in &children {
                        self.check_subtree(child);
                    }
                }
                graft_ast::FieldValue::Empty => {}
            }
        }
    }

    /// Snapshot the recorded diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Whether any structural findings have been recorded.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.borrow().is_empty()
    }
}

impl std::fmt::Debug for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "File(diagnostics={})", self.diagnostics.borrow().len())
    }
}
