// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Traversal contexts and the recursive child dispatcher.
//!
//! A [`Context`] carries the active hook table, plugin state, and scope for
//! one container being visited. The dispatcher ([`dispatch_node`]) walks a
//! node's child slots in source order, creating one context per slot and one
//! position per child, and recursing depth-first.
//!
//! # Flatten
//!
//! Flattening is deferred. A mutation that leaves a pending sequence (or a
//! cleared slot) in a sibling list only marks the owning context; the
//! sibling loop performs the splice when control returns to it. This is what
//! lets a visit observe its own slot holding a sequence (the state the
//! enter hook left behind) and dispatch the elements without exit
//! semantics, before the list is normalized.
//!
//! Traversal is single-threaded, synchronous, and depth-first; sibling
//! order follows container order, and a stop propagates outward through
//! return values.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, trace};

use graft_ast::{visit_fields, Field, FieldValue, Key, ListRef, NodeRef, Slot};

use crate::error::TraverseError;
use crate::file::File;
use crate::hooks::{PluginState, VisitorOpts};
use crate::path::{Container, Path};
use crate::scope::Scope;

// ============================================================================
// Context
// ============================================================================

struct ContextInner {
    opts: Rc<VisitorOpts>,
    state: Option<PluginState>,
    scope: Option<Rc<Scope>>,
    parent_path: RefCell<Option<Path>>,
    needs_flatten: Cell<bool>,
}

/// The traversal context for one container: hook table, plugin state,
/// enclosing scope, and the deferred-flatten mark.
#[derive(Clone)]
pub struct Context {
    inner: Rc<ContextInner>,
}

impl Context {
    pub fn new(
        opts: Rc<VisitorOpts>,
        state: Option<PluginState>,
        scope: Option<Rc<Scope>>,
        parent_path: Option<Path>,
    ) -> Context {
        Context {
            inner: Rc::new(ContextInner {
                opts,
                state,
                scope,
                parent_path: RefCell::new(parent_path),
                needs_flatten: Cell::new(false),
            }),
        }
    }

    /// The active hook table.
    pub fn opts(&self) -> Rc<VisitorOpts> {
        self.inner.opts.clone()
    }

    /// The opaque plugin state.
    pub fn state(&self) -> Option<PluginState> {
        self.inner.state.clone()
    }

    /// The scope positions bound through this context inherit.
    pub fn scope(&self) -> Option<Rc<Scope>> {
        self.inner.scope.clone()
    }

    /// The file the governed tree belongs to, if the scope knows one.
    pub fn file(&self) -> Option<Rc<File>> {
        self.inner.scope.as_ref().and_then(|scope| scope.file())
    }

    /// The position owning the container this context visits.
    pub fn parent_path(&self) -> Option<Path> {
        self.inner.parent_path.borrow().clone()
    }

    /// Request a flatten of the visited sequence; performed by the sibling
    /// loop when the current visit returns.
    pub fn mark_flatten(&self) {
        self.inner.needs_flatten.set(true);
    }

    fn take_flatten(&self) -> bool {
        self.inner.needs_flatten.replace(false)
    }

    // ------------------------------------------------------------------
    // Container visits
    // ------------------------------------------------------------------

    /// Visit a single-child field slot of `owner`.
    pub fn visit_field(&self, owner: &NodeRef, field: Field) -> Result<bool, TraverseError> {
        let parent_path = self.parent_path();
        let path = Path::get(
            parent_path.as_ref(),
            Some(self),
            owner,
            &Container::Node(owner.clone()),
            Key::Field(field),
            self.file().as_ref(),
        );
        let stopped = path.visit()?;
        // a field slot has no sequence to splice; a pending mark here came
        // from a removal or an already-coerced replacement
        self.take_flatten();
        Ok(stopped)
    }

    /// Visit every element of a sibling list owned by `owner`, splicing
    /// deferred mutations back into the list between sibling visits.
    pub fn visit_list(&self, owner: &NodeRef, list: &ListRef) -> Result<bool, TraverseError> {
        let parent_path = self.parent_path();
        let mut index = 0;
        while index < list.len() {
            let slot = list.get(index);
            if !matches!(slot, Slot::One(_)) {
                // out-of-band leftover; normalize in place and revisit
                // whatever occupies this index afterwards
                normalize_slot(list, index);
                continue;
            }

            let path = Path::get(
                parent_path.as_ref(),
                Some(self),
                owner,
                &Container::List(list.clone()),
                Key::Index(index),
                self.file().as_ref(),
            );
            let stopped = path.visit()?;

            if self.take_flatten() {
                match list.get(index) {
                    Slot::Empty => {
                        trace!(index, "flattening removal out of sequence");
                        list.splice(index, vec![]);
                        // the next sibling now occupies this index
                    }
                    Slot::Seq(nodes) => {
                        trace!(index, count = nodes.len(), "splicing sequence replacement");
                        let advanced = list.splice(index, nodes);
                        index += advanced;
                    }
                    Slot::One(_) => index += 1,
                }
            } else {
                index += 1;
            }

            if stopped {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Context(scope={}, flatten={})",
            self.inner.scope.is_some(),
            self.inner.needs_flatten.get()
        )
    }
}

fn normalize_slot(list: &ListRef, index: usize) {
    match list.get(index) {
        Slot::Empty => {
            list.splice(index, vec![]);
        }
        Slot::Seq(nodes) => {
            list.splice(index, nodes);
        }
        Slot::One(_) => {}
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Recurse into one node's children: walk its child slots in source order,
/// visiting each through its own position. Returns true if a descendant
/// stopped the traversal.
pub fn dispatch_node(
    node: &NodeRef,
    opts: &Rc<VisitorOpts>,
    scope: Option<&Rc<Scope>>,
    state: Option<&PluginState>,
    parent_path: Option<&Path>,
) -> Result<bool, TraverseError> {
    for field in visit_fields(node.kind()) {
        let context = Context::new(
            opts.clone(),
            state.cloned(),
            scope.cloned(),
            parent_path.cloned(),
        );
        let stopped = match node.field(*field) {
            FieldValue::Empty => false,
            FieldValue::List(list) => context.visit_list(node, &list)?,
            FieldValue::Node(_) | FieldValue::Seq(_) => context.visit_field(node, *field)?,
        };
        if stopped {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Walk a whole subtree: create the root scope (the root node's own scope
/// if it introduces one) and dispatch into the root's children.
///
/// Returns true if a hook stopped the traversal.
pub fn traverse(
    root: &NodeRef,
    opts: &Rc<VisitorOpts>,
    state: Option<PluginState>,
    file: Option<Rc<File>>,
) -> Result<bool, TraverseError> {
    let scope = if graft_ast::is_scope_introducing(root, None) {
        Scope::for_root(root, file)
    } else {
        Scope::root(file)
    };
    traverse_in_scope(root, opts, state, scope)
}

/// Walk a whole subtree under an explicit pre-built scope.
pub fn traverse_in_scope(
    root: &NodeRef,
    opts: &Rc<VisitorOpts>,
    state: Option<PluginState>,
    scope: Rc<Scope>,
) -> Result<bool, TraverseError> {
    debug!(root = %root.kind(), "starting traversal");
    dispatch_node(root, opts, Some(&scope), state.as_ref(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{hook, HookAction};
    use graft_ast::{build, NodeKind};
    use std::cell::RefCell;

    #[test]
    fn test_dispatch_visits_children_in_source_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let seen = log.clone();
        let opts = Rc::new(VisitorOpts::new().on_kind_enter(
            NodeKind::Identifier,
            hook(move |path, _| {
                if let Some(name) = path.node().and_then(|n| n.name()) {
                    seen.borrow_mut().push(name);
                }
                Ok(HookAction::Continue)
            }),
        ));

        let program = build::program(vec![
            build::expression_statement(build::identifier("a")),
            build::expression_statement(build::identifier("b")),
        ]);
        let stopped = traverse(&program, &opts, None, None).unwrap();
        assert!(!stopped);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_list_flatten_after_removal_keeps_following_siblings() {
        let removed = Rc::new(RefCell::new(Vec::new()));
        let seen = removed.clone();
        let opts = Rc::new(VisitorOpts::new().on_kind_enter(
            NodeKind::ExpressionStatement,
            hook(move |path, _| {
                let name = path
                    .child(graft_ast::Field::Expression)
                    .and_then(|p| p.node())
                    .and_then(|n| n.name())
                    .unwrap_or_default();
                seen.borrow_mut().push(name.clone());
                if name == "drop_me" {
                    path.remove()?;
                }
                Ok(HookAction::Continue)
            }),
        ));

        let program = build::program(vec![
            build::expression_statement(build::identifier("drop_me")),
            build::expression_statement(build::identifier("keep")),
        ]);
        traverse(&program, &opts, None, None).unwrap();

        assert_eq!(*removed.borrow(), vec!["drop_me", "keep"]);
        let body = match program.field(graft_ast::Field::Body) {
            FieldValue::List(list) => list,
            other => panic!("expected body list, got {other:?}"),
        };
        assert_eq!(body.len(), 1);
    }
}
