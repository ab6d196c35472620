// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Scopes and bindings.
//!
//! A [`Scope`] is the binding table associated with one scope-introducing
//! node (a program or a function). Scopes are created lazily by context
//! binding, at most once per scope-introducing position, and otherwise
//! inherited from the nearest governing ancestor.
//!
//! # Registration
//!
//! The binding index is built by a crawl over the scope node's subtree that
//! does not descend into nested scope-introducing nodes: parameters,
//! variable declarators, and function declarations register under their
//! bound names. A [`Binding`] points back at its declaring position, which
//! is what constant resolution chases through.
//!
//! # Invalidation
//!
//! The mutation protocol calls [`Scope::refresh`] on every structural
//! change, including removals. Refresh only invalidates: the index is
//! rebuilt by the next lookup. The traversal core never edits the index
//! directly.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use graft_ast::{
    get_binding_identifiers, is_block, DeclKind, Field, FieldValue, Key, NodeKind, NodeRef, Slot,
};

use crate::file::File;
use crate::path::{Container, Path, WeakPath};

// ============================================================================
// Bindings
// ============================================================================

/// How a name was bound in its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// `var` declaration.
    Var,
    /// `let` declaration.
    Let,
    /// `const` declaration.
    Const,
    /// Function or arrow parameter.
    Param,
    /// Function declaration.
    Function,
}

impl BindingKind {
    /// Returns the string representation used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingKind::Var => "var",
            BindingKind::Let => "let",
            BindingKind::Const => "const",
            BindingKind::Param => "param",
            BindingKind::Function => "function",
        }
    }

    fn of_decl(kind: Option<DeclKind>) -> BindingKind {
        match kind {
            Some(DeclKind::Let) => BindingKind::Let,
            Some(DeclKind::Const) => BindingKind::Const,
            _ => BindingKind::Var,
        }
    }
}

impl std::fmt::Display for BindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One name bound in a scope: the binding kind, the identifier node that
/// spells the name, and the position that declares it.
#[derive(Clone)]
pub struct Binding {
    kind: BindingKind,
    identifier: NodeRef,
    path: WeakPath,
}

impl Binding {
    pub fn kind(&self) -> BindingKind {
        self.kind
    }

    /// The identifier node that spells the bound name.
    pub fn identifier(&self) -> &NodeRef {
        &self.identifier
    }

    /// The declaring position, if its container is still alive.
    pub fn path(&self) -> Option<Path> {
        self.path.upgrade()
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Binding({} {})",
            self.kind,
            self.identifier.name().unwrap_or_default()
        )
    }
}

// ============================================================================
// Scope
// ============================================================================

/// Where a scope's binding crawl starts from.
enum ScopeAnchor {
    /// A scope created for a bound position during traversal.
    Path(WeakPath),
    /// A scope created directly for a root node (no owning container).
    Node(NodeRef),
    /// A detached scope with no node; never holds bindings of its own.
    None,
}

/// The binding table of one scope-introducing node.
pub struct Scope {
    anchor: ScopeAnchor,
    parent: Option<Rc<Scope>>,
    file: Option<Rc<File>>,
    bindings: RefCell<HashMap<String, Binding>>,
    stale: Cell<bool>,
    weak_self: Weak<Scope>,
}

impl Scope {
    /// Create the scope for a scope-introducing position, parented by the
    /// inherited scope. The file is taken from the argument or inherited
    /// from the parent scope.
    pub fn new(path: &Path, parent: Option<Rc<Scope>>, file: Option<Rc<File>>) -> Rc<Scope> {
        let file = file.or_else(|| parent.as_ref().and_then(|p| p.file()));
        trace!(
            kind = path.node().map(|n| n.kind().as_str()).unwrap_or("<gone>"),
            "creating scope"
        );
        Rc::new_cyclic(|weak_self| Scope {
            anchor: ScopeAnchor::Path(path.downgrade()),
            parent,
            file,
            bindings: RefCell::new(HashMap::new()),
            stale: Cell::new(true),
            weak_self: weak_self.clone(),
        })
    }

    /// Create a scope directly for a root node that has no owning
    /// container (typically a program).
    pub fn for_root(node: &NodeRef, file: Option<Rc<File>>) -> Rc<Scope> {
        Rc::new_cyclic(|weak_self| Scope {
            anchor: ScopeAnchor::Node(node.clone()),
            parent: None,
            file,
            bindings: RefCell::new(HashMap::new()),
            stale: Cell::new(true),
            weak_self: weak_self.clone(),
        })
    }

    /// Create a detached scope with no node and no bindings of its own.
    pub fn root(file: Option<Rc<File>>) -> Rc<Scope> {
        Rc::new_cyclic(|weak_self| Scope {
            anchor: ScopeAnchor::None,
            parent: None,
            file,
            bindings: RefCell::new(HashMap::new()),
            stale: Cell::new(false),
            weak_self: weak_self.clone(),
        })
    }

    /// The enclosing scope.
    pub fn parent(&self) -> Option<Rc<Scope>> {
        self.parent.clone()
    }

    /// The file this scope's tree belongs to, if any.
    pub fn file(&self) -> Option<Rc<File>> {
        self.file.clone()
    }

    /// Look up a binding by name, through the parent chain.
    pub fn get_binding(&self, name: &str) -> Option<Binding> {
        if self.stale.get() {
            self.crawl();
            self.stale.set(false);
        }
        if let Some(binding) = self.bindings.borrow().get(name) {
            return Some(binding.clone());
        }
        self.parent.as_ref().and_then(|p| p.get_binding(name))
    }

    /// Whether this scope (or an ancestor) binds the name.
    pub fn has_binding(&self, name: &str) -> bool {
        self.get_binding(name).is_some()
    }

    /// Invalidate the binding index after a structural change: bindings
    /// declared under `old` are gone, bindings declared by `replacements`
    /// appear. The index is rebuilt lazily by the next lookup.
    pub fn refresh(&self, old: Option<&NodeRef>, replacements: &[NodeRef]) {
        debug!(
            old = old.map(|n| n.kind().as_str()).unwrap_or("<none>"),
            replacements = replacements.len(),
            "scope invalidated"
        );
        self.stale.set(true);
    }

    // ------------------------------------------------------------------
    // Crawl
    // ------------------------------------------------------------------

    fn anchor_node(&self) -> Option<NodeRef> {
        match &self.anchor {
            ScopeAnchor::Path(path) => path.upgrade().and_then(|p| p.node()),
            ScopeAnchor::Node(node) => Some(node.clone()),
            ScopeAnchor::None => None,
        }
    }

    fn crawl(&self) {
        self.bindings.borrow_mut().clear();
        let Some(node) = self.anchor_node() else {
            return;
        };
        trace!(kind = %node.kind(), "crawling scope bindings");
        match node.kind() {
            NodeKind::Program => self.collect_statement_list(&node),
            kind if kind.is_function() => {
                if let FieldValue::List(params) = node.field(Field::Params) {
                    for (i, param) in params.nodes().iter().enumerate() {
                        let path = self.position(&node, Container::List(params.clone()), Key::Index(i));
                        self.register(BindingKind::Param, &path, param);
                    }
                }
                if let Slot::One(body) = node.slot(Field::Body) {
                    if is_block(&body) {
                        self.collect_statement_list(&body);
                    }
                }
            }
            _ => {}
        }
    }

    fn collect_statement_list(&self, owner: &NodeRef) {
        let FieldValue::List(list) = owner.field(Field::Body) else {
            return;
        };
        for index in 0..list.len() {
            let Slot::One(stmt) = list.get(index) else {
                continue;
            };
            match stmt.kind() {
                NodeKind::VariableDeclaration => self.register_declarators(&stmt),
                NodeKind::FunctionDeclaration => {
                    let path =
                        self.position(owner, Container::List(list.clone()), Key::Index(index));
                    self.register(BindingKind::Function, &path, &stmt);
                }
                NodeKind::BlockStatement => self.collect_statement_list(&stmt),
                NodeKind::IfStatement => {
                    self.collect_branch(&stmt, Field::Consequent);
                    self.collect_branch(&stmt, Field::Alternate);
                }
                NodeKind::WhileStatement | NodeKind::DoWhileStatement | NodeKind::ForStatement => {
                    self.collect_branch(&stmt, Field::Body);
                }
                _ => {}
            }
        }
    }

    /// A branch slot holds either a block or a single statement; both can
    /// declare names that land in this scope.
    fn collect_branch(&self, owner: &NodeRef, field: Field) {
        let Slot::One(stmt) = owner.slot(field) else {
            return;
        };
        match stmt.kind() {
            NodeKind::BlockStatement => self.collect_statement_list(&stmt),
            NodeKind::VariableDeclaration => self.register_declarators(&stmt),
            _ => {}
        }
    }

    fn register_declarators(&self, declaration: &NodeRef) {
        let FieldValue::List(declarations) = declaration.field(Field::Declarations) else {
            return;
        };
        let kind = BindingKind::of_decl(declaration.decl_kind());
        for (index, declarator) in declarations.nodes().iter().enumerate() {
            let path = self.position(
                declaration,
                Container::List(declarations.clone()),
                Key::Index(index),
            );
            self.register(kind, &path, declarator);
        }
    }

    /// Obtain the canonical position handle for a declaration without
    /// binding it to any traversal context. The handle is primed with this
    /// scope so that resolution chains passing through it can keep looking
    /// names up.
    fn position(&self, parent: &NodeRef, container: Container, key: Key) -> Path {
        let path = Path::get(None, None, parent, &container, key, self.file.as_ref());
        if let Some(scope) = self.weak_self.upgrade() {
            path.prime_scope(&scope);
        }
        path
    }

    fn register(&self, kind: BindingKind, path: &Path, declaring: &NodeRef) {
        for identifier in get_binding_identifiers(declaring) {
            let Some(name) = identifier.name() else {
                continue;
            };
            trace!(name = %name, kind = %kind, "registering binding");
            self.bindings.borrow_mut().insert(
                name,
                Binding {
                    kind,
                    identifier: identifier.clone(),
                    path: path.downgrade(),
                },
            );
        }
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Scope(bindings={})", self.bindings.borrow().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_ast::build;

    #[test]
    fn test_program_scope_registers_declarations() {
        let program = build::program(vec![
            build::variable_declaration(
                DeclKind::Let,
                vec![build::declarator(
                    build::identifier("x"),
                    Some(build::number(1.0)),
                )],
            ),
            build::function_declaration(Some(build::identifier("f")), vec![], vec![]),
        ]);
        let scope = Scope::for_root(&program, None);

        let x = scope.get_binding("x").expect("x is bound");
        assert_eq!(x.kind(), BindingKind::Let);
        assert_eq!(
            x.path().and_then(|p| p.node()).map(|n| n.kind()),
            Some(NodeKind::VariableDeclarator)
        );

        let f = scope.get_binding("f").expect("f is bound");
        assert_eq!(f.kind(), BindingKind::Function);
        assert!(scope.get_binding("missing").is_none());
    }

    #[test]
    fn test_nested_branch_declarations_register() {
        let program = build::program(vec![build::if_statement(
            build::bool_lit(true),
            build::block(vec![build::variable_declaration(
                DeclKind::Var,
                vec![build::declarator(build::identifier("y"), None)],
            )]),
            None,
        )]);
        let scope = Scope::for_root(&program, None);
        assert_eq!(
            scope.get_binding("y").map(|b| b.kind()),
            Some(BindingKind::Var)
        );
    }

    #[test]
    fn test_refresh_invalidates_and_recrawls() {
        let declaration = build::variable_declaration(
            DeclKind::Let,
            vec![build::declarator(build::identifier("x"), None)],
        );
        let program = build::program(vec![declaration]);
        let scope = Scope::for_root(&program, None);
        assert!(scope.has_binding("x"));

        // out-of-band rewrite of the program body, then refresh
        let replacement = build::variable_declaration(
            DeclKind::Const,
            vec![build::declarator(build::identifier("z"), None)],
        );
        if let FieldValue::List(body) = program.field(Field::Body) {
            body.splice(0, vec![replacement.clone()]);
        }
        scope.refresh(None, std::slice::from_ref(&replacement));

        assert!(!scope.has_binding("x"));
        assert_eq!(
            scope.get_binding("z").map(|b| b.kind()),
            Some(BindingKind::Const)
        );
    }
}
