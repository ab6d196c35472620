// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Identity-stable tree positions.
//!
//! A [`Path`] is a long-lived handle to one (container, key) location in a
//! syntax tree. Exactly one `Path` exists per distinct location for the
//! container's lifetime: the factory ([`Path::get`]) scans the side-table
//! embedded in the container for an entry whose last-observed node is
//! reference-identical to the slot's node, reuses it when found, and
//! registers a new handle otherwise. Because lookup matches on node
//! identity rather than key alone, a handle follows its node through list
//! splices, and a distinct node written into the same key gets a distinct
//! handle.
//!
//! The path never caches its node: reading and writing the node is reading
//! and writing the slot itself, so `path.node()` is live across arbitrary
//! rewrites.
//!
//! # Mutation protocol
//!
//! [`Path::replace`], [`Path::replace_many`], and [`Path::remove`] funnel
//! into one private entry point that keeps the tree consistent across
//! destructive rewrites: comment inheritance, slot write, own-scope
//! recomputation, scope invalidation, the optional file structural check,
//! block coercion for sequence replacements into block-mandated slots, and
//! sequence flattening delegated to the owning context.
//!
//! # Ownership
//!
//! Containers own their paths (via the embedded side-table); every
//! tree-ward reference a path holds is weak. A path whose container is
//! discarded is thereby abandoned: its slot reads as detached and analysis
//! on it yields nothing.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use graft_ast::{
    coerce_to_block, get_binding_identifiers, inherit_comments, is_block,
    is_referenced_identifier, is_scope_introducing, is_statement_or_block_field, Field, Key,
    ListCell, ListRef, NodeCell, NodeKind, NodePattern, NodeRef, PathTable, Slot,
};

use crate::context::{dispatch_node, Context};
use crate::error::TraverseError;
use crate::file::File;
use crate::hooks::{resolve_hook, HookAction, HookKind, PluginState, VisitorOpts};
use crate::resolve::TypeInfo;
use crate::scope::Scope;

// ============================================================================
// Containers
// ============================================================================

/// A strong handle to the container side of a position: the node whose
/// named fields hold children, or a sibling list.
#[derive(Clone)]
pub enum Container {
    /// Named-field slots of a node; keys are [`Key::Field`].
    Node(NodeRef),
    /// Indexed slots of a sibling list; keys are [`Key::Index`].
    List(ListRef),
}

impl Container {
    /// Read the slot at `key`. Mismatched key shapes read as empty.
    pub fn read(&self, key: Key) -> Slot {
        match (self, key) {
            (Container::Node(node), Key::Field(field)) => node.slot(field),
            (Container::List(list), Key::Index(index)) => list.get(index),
            _ => Slot::Empty,
        }
    }

    /// Write the slot at `key`. Mismatched key shapes are ignored.
    pub fn write(&self, key: Key, slot: Slot) {
        match (self, key) {
            (Container::Node(node), Key::Field(field)) => node.set_slot(field, slot),
            (Container::List(list), Key::Index(index)) => list.set(index, slot),
            _ => {}
        }
    }

    fn path_table(&self) -> &PathTable {
        match self {
            Container::Node(node) => node.path_table(),
            Container::List(list) => list.path_table(),
        }
    }

    fn downgrade(&self) -> WeakContainer {
        match self {
            Container::Node(node) => WeakContainer::Node(Rc::downgrade(node)),
            Container::List(list) => WeakContainer::List(Rc::downgrade(list)),
        }
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Container::Node(node) => write!(f, "Container::Node({})", node.kind()),
            Container::List(list) => write!(f, "Container::List(len={})", list.len()),
        }
    }
}

enum WeakContainer {
    Node(Weak<NodeCell>),
    List(Weak<ListCell>),
}

impl WeakContainer {
    fn upgrade(&self) -> Option<Container> {
        match self {
            WeakContainer::Node(weak) => weak.upgrade().map(Container::Node),
            WeakContainer::List(weak) => weak.upgrade().map(Container::List),
        }
    }
}

// ============================================================================
// Path
// ============================================================================

/// A replacement written through the mutation protocol.
#[derive(Clone)]
pub enum Replacement {
    /// A single node.
    One(NodeRef),
    /// An ordered sequence of nodes taking the place of one slot.
    Many(Vec<NodeRef>),
}

pub(crate) struct PathInner {
    parent: Weak<NodeCell>,
    container: WeakContainer,
    key: Cell<Key>,
    /// The node identity this path last observed at its slot; what the
    /// factory matches lookups against. Distinct from the node getter,
    /// which always reads the slot live.
    observed: RefCell<Weak<NodeCell>>,
    data: RefCell<HashMap<String, serde_json::Value>>,
    parent_path: RefCell<Option<Path>>,
    context: RefCell<Option<Context>>,
    scope: RefCell<Option<Rc<Scope>>>,
    own_scope: RefCell<Option<Rc<Scope>>>,
    should_skip: Cell<bool>,
    should_stop: Cell<bool>,
    type_info: RefCell<Option<TypeInfo>>,
}

/// Identity-stable handle to one (container, key) tree position.
#[derive(Clone)]
pub struct Path {
    inner: Rc<PathInner>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Path) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Path {}

/// A weak handle to a path, used by collaborators that must not keep
/// positions (and through them, subtrees) alive.
#[derive(Clone)]
pub struct WeakPath(Weak<PathInner>);

impl WeakPath {
    /// Upgrade to a strong handle if the path's container still owns it.
    pub fn upgrade(&self) -> Option<Path> {
        self.0.upgrade().map(|inner| Path { inner })
    }
}

/// The ordered positions behind one child slot.
#[derive(Debug)]
pub enum Children {
    /// The slot is absent (or holds a transient replacement sequence).
    None,
    /// A single-child field.
    One(Path),
    /// A sibling sequence, one position per element.
    Many(Vec<Path>),
}

impl Children {
    /// The single position, if there is exactly one.
    pub fn into_one(self) -> Option<Path> {
        match self {
            Children::One(path) => Some(path),
            _ => None,
        }
    }

    /// The element positions, if the slot holds a sequence.
    pub fn into_many(self) -> Option<Vec<Path>> {
        match self {
            Children::Many(paths) => Some(paths),
            _ => None,
        }
    }
}

impl Path {
    // ------------------------------------------------------------------
    // Factory
    // ------------------------------------------------------------------

    /// Obtain the canonical position for (container, key), creating and
    /// registering it if no existing handle observes the slot's node.
    ///
    /// The returned path is always re-bound to the given context, even on a
    /// cache hit: the hook table, plugin state, and ancestor pointer can
    /// legitimately differ between visits of the same location.
    pub fn get(
        parent_path: Option<&Path>,
        context: Option<&Context>,
        parent: &NodeRef,
        container: &Container,
        key: Key,
        file: Option<&Rc<File>>,
    ) -> Path {
        let target = container.read(key);
        let mut found = None;

        if let Slot::One(target_node) = &target {
            for entry in container.path_table().entries() {
                let Ok(inner) = entry.downcast::<PathInner>() else {
                    continue;
                };
                let candidate = Path { inner };
                if let Some(observed) = candidate.observed() {
                    if NodeCell::same(&observed, target_node) {
                        trace!(key = %key, "path cache hit");
                        found = Some(candidate);
                        break;
                    }
                }
            }
        }

        let path = found.unwrap_or_else(|| {
            trace!(key = %key, "path cache miss; registering");
            let inner = Rc::new(PathInner {
                parent: Rc::downgrade(parent),
                container: container.downgrade(),
                key: Cell::new(key),
                observed: RefCell::new(Weak::new()),
                data: RefCell::new(HashMap::new()),
                parent_path: RefCell::new(None),
                context: RefCell::new(None),
                scope: RefCell::new(None),
                own_scope: RefCell::new(None),
                should_skip: Cell::new(false),
                should_stop: Cell::new(false),
                type_info: RefCell::new(None),
            });
            container.path_table().push(inner.clone() as Rc<dyn Any>);
            Path { inner }
        });

        path.set_context(parent_path, context, key, file);
        path
    }

    /// Downgrade to a weak handle.
    pub fn downgrade(&self) -> WeakPath {
        WeakPath(Rc::downgrade(&self.inner))
    }

    // ------------------------------------------------------------------
    // Context binding
    // ------------------------------------------------------------------

    /// Bind this position to a traversal context: attach context, state,
    /// hook table, ancestor pointer, and key; reset the transient
    /// skip/stop flags; recompute the scope.
    pub fn set_context(
        &self,
        parent_path: Option<&Path>,
        context: Option<&Context>,
        key: Key,
        file: Option<&Rc<File>>,
    ) {
        self.inner.should_skip.set(false);
        self.inner.should_stop.set(false);
        self.inner.key.set(key);
        if let Some(parent_path) = parent_path {
            *self.inner.parent_path.borrow_mut() = Some(parent_path.clone());
        }
        if let Some(context) = context {
            *self.inner.context.borrow_mut() = Some(context.clone());
        }
        self.record_observed();
        self.set_scope(file);
    }

    /// The node identity this path last observed at its slot.
    fn observed(&self) -> Option<NodeRef> {
        self.inner.observed.borrow().upgrade()
    }

    fn record_observed(&self) {
        let observed = match self.container().map(|c| c.read(self.key())) {
            Some(Slot::One(node)) => Rc::downgrade(&node),
            _ => Weak::new(),
        };
        *self.inner.observed.borrow_mut() = observed;
    }

    /// Recompute this position's scope: a scope-introducing node gets its
    /// own scope (created at most once per position), everything else
    /// reuses the scope inherited from the context (or, for a position
    /// navigated to outside any traversal, from its parent position).
    pub fn set_scope(&self, file: Option<&Rc<File>>) {
        let inherited = self
            .inner
            .context
            .borrow()
            .as_ref()
            .and_then(|context| context.scope())
            .or_else(|| self.parent_path().and_then(|parent| parent.scope()));
        let scope = match self.node() {
            Some(node) if is_scope_introducing(&node, self.parent_node().as_ref()) => {
                let existing = self.inner.own_scope.borrow().clone();
                match existing {
                    Some(own) => Some(own),
                    // a bare position materialized outside any traversal
                    // has no parent chain to hang a scope on; creation
                    // waits for the first real binding
                    None if inherited.is_none() && self.context().is_none() => None,
                    None => {
                        let own = Scope::new(self, inherited, file.cloned());
                        *self.inner.own_scope.borrow_mut() = Some(own.clone());
                        Some(own)
                    }
                }
            }
            _ => inherited,
        };
        *self.inner.scope.borrow_mut() = scope;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The key addressing this position within its container.
    pub fn key(&self) -> Key {
        self.inner.key.get()
    }

    /// The node owning this position's container.
    pub fn parent_node(&self) -> Option<NodeRef> {
        self.inner.parent.upgrade()
    }

    /// The position of the owning node, toward the root.
    pub fn parent_path(&self) -> Option<Path> {
        self.inner.parent_path.borrow().clone()
    }

    /// The bound traversal context, if any.
    pub fn context(&self) -> Option<Context> {
        self.inner.context.borrow().clone()
    }

    /// The scope governing this position. Present whenever the position
    /// has been bound with an inherited scope or introduces its own.
    pub fn scope(&self) -> Option<Rc<Scope>> {
        self.inner.scope.borrow().clone()
    }

    fn container(&self) -> Option<Container> {
        self.inner.container.upgrade()
    }

    /// Read the slot live. Fails only if the container is gone.
    pub fn try_slot(&self) -> Result<Slot, TraverseError> {
        self.container()
            .map(|container| container.read(self.key()))
            .ok_or(TraverseError::DetachedPath { op: "slot" })
    }

    /// The node at this position, if the slot currently holds exactly one.
    pub fn node(&self) -> Option<NodeRef> {
        self.container()?.read(self.key()).as_one().cloned()
    }

    // ------------------------------------------------------------------
    // Cross-visit data
    // ------------------------------------------------------------------

    /// Stash arbitrary plugin data on this position. Data survives
    /// repeated visits of the same location across transform passes.
    pub fn set_data(&self, key: impl Into<String>, value: serde_json::Value) {
        self.inner.data.borrow_mut().insert(key.into(), value);
    }

    /// Read back plugin data stored by [`Path::set_data`].
    pub fn get_data(&self, key: &str) -> Option<serde_json::Value> {
        self.inner.data.borrow().get(key).cloned()
    }

    // ------------------------------------------------------------------
    // Memoized type info (see resolve.rs)
    // ------------------------------------------------------------------

    /// Give a context-less position (one materialized by a scope crawl) the
    /// scope that governs it. Never clobbers a scope computed from a bound
    /// context.
    pub(crate) fn prime_scope(&self, scope: &Rc<Scope>) {
        let mut current = self.inner.scope.borrow_mut();
        if current.is_none() {
            *current = Some(scope.clone());
        }
    }

    pub(crate) fn cached_type_info(&self) -> Option<TypeInfo> {
        self.inner.type_info.borrow().clone()
    }

    pub(crate) fn store_type_info(&self, info: TypeInfo) {
        *self.inner.type_info.borrow_mut() = Some(info);
    }

    // ------------------------------------------------------------------
    // Mutation protocol
    // ------------------------------------------------------------------

    /// Replace the node at this position with a single node.
    pub fn replace(&self, node: NodeRef) -> Result<(), TraverseError> {
        self.set_node(Some(Replacement::One(node)), "replace")
    }

    /// Replace the node at this position with an ordered sequence.
    pub fn replace_many(&self, nodes: Vec<NodeRef>) -> Result<(), TraverseError> {
        self.set_node(Some(Replacement::Many(nodes)), "replace")
    }

    /// Remove the node at this position: derived structure is invalidated
    /// against an empty replacement list, the slot is cleared, and the
    /// owning sequence is flattened.
    pub fn remove(&self) -> Result<(), TraverseError> {
        self.set_node(None, "remove")
    }

    /// The single entry point for structural change.
    fn set_node(
        &self,
        replacement: Option<Replacement>,
        op: &'static str,
    ) -> Result<(), TraverseError> {
        if self.context().is_none() {
            return Err(TraverseError::UnboundPath { op });
        }
        let container = self
            .container()
            .ok_or(TraverseError::DetachedPath { op })?;
        let key = self.key();
        let old = container.read(key).as_one().cloned();

        let Some(replacement) = replacement else {
            debug!(key = %key, "removing node");
            self.refresh_derived(old.as_ref(), &[]);
            container.write(key, Slot::Empty);
            self.record_observed();
            self.flatten();
            return Ok(());
        };

        let (slot, replacements, is_sequence) = match replacement {
            Replacement::One(node) => (Slot::One(node.clone()), vec![node], false),
            Replacement::Many(nodes) => (Slot::Seq(nodes.clone()), nodes, true),
        };
        debug!(key = %key, count = replacements.len(), "replacing node");

        // leading comments move from the old node to the first replacement
        if let (Some(old), Some(first)) = (old.as_ref(), replacements.first()) {
            inherit_comments(first, old);
        }

        container.write(key, slot);
        self.record_observed();

        // the replacement may be a different node kind
        self.set_scope(None);

        self.refresh_derived(old.as_ref(), &replacements);

        if let Some(scope) = self.scope() {
            if let Some(file) = scope.file() {
                for node in &replacements {
                    file.check_node(node, &scope);
                }
            }
        }

        if is_sequence {
            // a sequence cannot stand where exactly one statement or block
            // is mandated; wrap it before anything downstream can see it
            if let (Key::Field(field), Container::Node(owner)) = (key, &container) {
                if is_statement_or_block_field(field) && !is_block(owner) {
                    coerce_to_block(owner, field);
                }
            }
            self.flatten();
        }

        Ok(())
    }

    /// Re-derive everything hanging off this position after an out-of-band
    /// change, without changing tree shape.
    pub fn refresh(&self) {
        let node = self.node();
        match &node {
            Some(node) => self.refresh_derived(Some(node), std::slice::from_ref(node)),
            None => self.refresh_derived(None, &[]),
        }
    }

    /// The refresh hook: invalidate derived caches and the scope's binding
    /// index for (old, replacements). Invoked on every mutation, including
    /// removal.
    fn refresh_derived(&self, old: Option<&NodeRef>, replacements: &[NodeRef]) {
        *self.inner.type_info.borrow_mut() = None;
        if let Some(scope) = self.scope() {
            scope.refresh(old, replacements);
        }
    }

    /// Ask the owning context to splice this position's pending sequence
    /// (or removal) into the parent sequence.
    fn flatten(&self) {
        if let Some(context) = self.context() {
            context.mark_flatten();
        }
    }

    // ------------------------------------------------------------------
    // Visitation
    // ------------------------------------------------------------------

    /// Mark this subtree as not-to-be-descended. Siblings are still
    /// visited.
    pub fn skip(&self) {
        self.inner.should_skip.set(true);
    }

    /// Abort the traversal: no descent, and the stop propagates outward
    /// through every enclosing sibling loop.
    pub fn stop(&self) {
        self.inner.should_stop.set(true);
        self.inner.should_skip.set(true);
    }

    /// Whether descent into this subtree was aborted.
    pub fn should_skip(&self) -> bool {
        self.inner.should_skip.get()
    }

    /// Whether the traversal was aborted.
    pub fn should_stop(&self) -> bool {
        self.inner.should_stop.get()
    }

    /// Visit this position: run the enter hook, descend, run the exit
    /// hook, honoring blacklist, skip, and stop. Returns the accumulated
    /// stop flag so a sibling loop can terminate early.
    pub fn visit(&self) -> Result<bool, TraverseError> {
        let Some(context) = self.context() else {
            return Err(TraverseError::UnboundPath { op: "visit" });
        };
        let slot = self.try_slot()?;

        let node = match slot {
            Slot::Empty => return Ok(false),
            Slot::Seq(nodes) => {
                // an out-of-band sequence has no single identity to enter
                // or exit; dispatch each element's children directly
                return self.dispatch_sequence(&context, &nodes);
            }
            Slot::One(node) => node,
        };

        if context.opts().is_blacklisted(node.kind()) {
            trace!(kind = %node.kind(), "blacklisted kind; no hooks");
            return Ok(false);
        }

        self.call_hook(HookKind::Enter)?;

        if self.should_skip() {
            return Ok(self.should_stop());
        }

        // the enter hook may have rewritten this very slot
        match self.try_slot()? {
            Slot::Empty => {}
            Slot::Seq(nodes) => {
                // exit semantics are undefined for a structure that no
                // longer has a single identity
                self.dispatch_sequence(&context, &nodes)?;
            }
            Slot::One(node) => {
                let state = context.state();
                if dispatch_node(
                    &node,
                    &context.opts(),
                    self.scope().as_ref(),
                    state.as_ref(),
                    Some(self),
                )? {
                    self.inner.should_stop.set(true);
                }
                self.call_hook(HookKind::Exit)?;
            }
        }

        Ok(self.should_stop())
    }

    fn dispatch_sequence(
        &self,
        context: &Context,
        nodes: &[NodeRef],
    ) -> Result<bool, TraverseError> {
        let state = context.state();
        for node in nodes {
            if dispatch_node(
                node,
                &context.opts(),
                self.scope().as_ref(),
                state.as_ref(),
                Some(self),
            )? {
                self.inner.should_stop.set(true);
                break;
            }
        }
        Ok(self.should_stop())
    }

    fn call_hook(&self, which: HookKind) -> Result<(), TraverseError> {
        let Some(node) = self.node() else {
            return Ok(());
        };
        let Some(context) = self.context() else {
            return Err(TraverseError::UnboundPath { op: "visit" });
        };
        let Some(handler) = resolve_hook(&context.opts(), node.kind(), which) else {
            return Ok(());
        };
        trace!(kind = %node.kind(), hook = %which, "invoking hook");
        let state = context.state();
        match handler(self, state.as_ref())? {
            HookAction::Continue => Ok(()),
            HookAction::Replace(node) => self.set_node(Some(Replacement::One(node)), "replace"),
            HookAction::ReplaceMany(nodes) => {
                self.set_node(Some(Replacement::Many(nodes)), "replace")
            }
        }
    }

    /// Re-enter traversal over this position's subtree with a fresh hook
    /// table and plugin state.
    pub fn traverse(
        &self,
        opts: &Rc<VisitorOpts>,
        state: Option<PluginState>,
    ) -> Result<bool, TraverseError> {
        let Some(node) = self.node() else {
            return Ok(false);
        };
        dispatch_node(&node, opts, self.scope().as_ref(), state.as_ref(), None)
    }

    // ------------------------------------------------------------------
    // Child access
    // ------------------------------------------------------------------

    /// The positions behind a named child slot: one per element for a
    /// sequence field, a single position otherwise.
    pub fn get_children(&self, field: Field) -> Children {
        let Some(node) = self.node() else {
            return Children::None;
        };
        let context = self.context();
        match node.field(field) {
            graft_ast::FieldValue::Node(_) => Children::One(Path::get(
                Some(self),
                context.as_ref(),
                &node,
                &Container::Node(node.clone()),
                Key::Field(field),
                None,
            )),
            graft_ast::FieldValue::List(list) => {
                let paths = (0..list.len())
                    .map(|index| {
                        Path::get(
                            Some(self),
                            context.as_ref(),
                            &node,
                            &Container::List(list.clone()),
                            Key::Index(index),
                            None,
                        )
                    })
                    .collect();
                Children::Many(paths)
            }
            graft_ast::FieldValue::Seq(_) | graft_ast::FieldValue::Empty => Children::None,
        }
    }

    /// The single position behind a single-child field.
    pub fn child(&self, field: Field) -> Option<Path> {
        self.get_children(field).into_one()
    }

    /// The element positions behind a sequence field.
    pub fn children(&self, field: Field) -> Vec<Path> {
        self.get_children(field).into_many().unwrap_or_default()
    }

    /// Whether the named field is present and non-empty.
    pub fn has(&self, field: Field) -> bool {
        self.node().is_some_and(|node| node.has_field(field))
    }

    // ------------------------------------------------------------------
    // Structural queries
    // ------------------------------------------------------------------

    /// Whether the current node has the given kind.
    pub fn is_kind(&self, kind: NodeKind) -> bool {
        self.node().is_some_and(|node| node.kind() == kind)
    }

    /// Shallow-match the current node against a pattern.
    pub fn matches(&self, pattern: &NodePattern) -> bool {
        self.node().is_some_and(|node| pattern.matches(&node))
    }

    /// Whether the current node is one of the function kinds.
    pub fn is_function(&self) -> bool {
        self.node().is_some_and(|node| node.kind().is_function())
    }

    /// Whether this position introduces a scope.
    pub fn is_scope(&self) -> bool {
        self.node()
            .is_some_and(|node| is_scope_introducing(&node, self.parent_node().as_ref()))
    }

    /// Whether the current node is read for its value in its parent.
    pub fn is_referenced(&self) -> bool {
        match (self.node(), self.parent_node()) {
            (Some(node), Some(parent)) => graft_ast::is_referenced(&node, &parent),
            _ => false,
        }
    }

    /// Whether the current node is an identifier read for its value,
    /// optionally refined by a shallow pattern.
    pub fn is_referenced_identifier(&self, pattern: Option<&NodePattern>) -> bool {
        match (self.node(), self.parent_node()) {
            (Some(node), Some(parent)) => is_referenced_identifier(&node, &parent, pattern),
            _ => false,
        }
    }

    /// Whether the current node binds names block-scoped.
    pub fn is_block_scoped(&self) -> bool {
        self.node()
            .is_some_and(|node| graft_ast::is_block_scoped(&node))
    }

    /// Whether the current node is a `var` declaration.
    pub fn is_var(&self) -> bool {
        self.node().is_some_and(|node| graft_ast::is_var(&node))
    }

    /// The identifier nodes the current node binds.
    pub fn get_binding_identifiers(&self) -> Vec<NodeRef> {
        self.node()
            .map(|node| get_binding_identifiers(&node))
            .unwrap_or_default()
    }
}

// ============================================================================
// Generated per-kind predicates
// ============================================================================

/// Generate the `is_<kind>()` / `is_<kind>_match(pattern)` family over the
/// closed kind taxonomy. An explicit compile-time dispatch: each method
/// tests the node's kind tag (plus, for the `_match` form, a shallow
/// pattern).
macro_rules! kind_predicates {
    (
        $(
            $method:ident : $kind:ident
        ),* $(,)?
    ) => {
        paste::paste! {
            impl Path {
                $(
                    #[doc = concat!("Whether the current node is a `", stringify!($kind), "`.")]
                    pub fn [<is_ $method>](&self) -> bool {
                        self.is_kind(NodeKind::$kind)
                    }

                    #[doc = concat!("Whether the current node is a `", stringify!($kind), "` matching `pattern`.")]
                    pub fn [<is_ $method _match>](&self, pattern: &NodePattern) -> bool {
                        self.is_kind(NodeKind::$kind) && self.matches(pattern)
                    }
                )*
            }
        }
    };
}

kind_predicates! {
    program: Program,
    identifier: Identifier,
    literal: Literal,
    expression_statement: ExpressionStatement,
    block_statement: BlockStatement,
    variable_declaration: VariableDeclaration,
    variable_declarator: VariableDeclarator,
    function_declaration: FunctionDeclaration,
    function_expression: FunctionExpression,
    arrow_function_expression: ArrowFunctionExpression,
    object_expression: ObjectExpression,
    property: Property,
    array_expression: ArrayExpression,
    member_expression: MemberExpression,
    call_expression: CallExpression,
    assignment_expression: AssignmentExpression,
    binary_expression: BinaryExpression,
    rest_element: RestElement,
    return_statement: ReturnStatement,
    if_statement: IfStatement,
    for_statement: ForStatement,
    while_statement: WhileStatement,
    do_while_statement: DoWhileStatement,
    type_annotation: TypeAnnotation,
    generic_type_annotation: GenericTypeAnnotation,
    type_parameter_instantiation: TypeParameterInstantiation,
    string_type_annotation: StringTypeAnnotation,
    number_type_annotation: NumberTypeAnnotation,
    boolean_type_annotation: BooleanTypeAnnotation,
}

impl std::fmt::Debug for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.node() {
            Some(node) => write!(f, "Path({} at {})", node.kind(), self.key()),
            None => write!(f, "Path(<empty> at {})", self.key()),
        }
    }
}
