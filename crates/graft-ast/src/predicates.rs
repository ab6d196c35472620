// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Structural predicates over nodes.
//!
//! These are the queries the traversal layer consumes: scope detection,
//! shallow pattern matching, binding-identifier collection, reference
//! classification, and the block-coercion helper the mutation protocol uses
//! when a sequence replaces a slot that must hold a single statement.
//!
//! All predicates are pure reads except [`coerce_to_block`] and
//! [`inherit_comments`].

use tracing::debug;

use crate::build;
use crate::kind::{Field, NodeKind};
use crate::node::{FieldValue, LiteralValue, NodeCell, NodeRef, Slot};

// ============================================================================
// Shallow pattern matching
// ============================================================================

/// A shallow structural pattern: an optional kind plus optional scalar
/// properties, all of which must match the node itself (children are never
/// inspected).
#[derive(Debug, Clone, Default)]
pub struct NodePattern {
    pub kind: Option<NodeKind>,
    pub name: Option<String>,
    pub value: Option<LiteralValue>,
}

impl NodePattern {
    /// Match any node of the given kind.
    pub fn of_kind(kind: NodeKind) -> NodePattern {
        NodePattern {
            kind: Some(kind),
            ..NodePattern::default()
        }
    }

    /// Match an identifier with the given name.
    pub fn named(name: impl Into<String>) -> NodePattern {
        NodePattern {
            name: Some(name.into()),
            ..NodePattern::default()
        }
    }

    /// Match a literal with the given value.
    pub fn valued(value: LiteralValue) -> NodePattern {
        NodePattern {
            value: Some(value),
            ..NodePattern::default()
        }
    }

    /// Shallow match against a node.
    pub fn matches(&self, node: &NodeRef) -> bool {
        if let Some(kind) = self.kind {
            if node.kind() != kind {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if node.name().as_deref() != Some(name.as_str()) {
                return false;
            }
        }
        if let Some(value) = &self.value {
            if node.literal_value().as_ref() != Some(value) {
                return false;
            }
        }
        true
    }
}

// ============================================================================
// Kind-level predicates
// ============================================================================

/// Whether this node introduces a new scope at its position.
///
/// Programs and functions introduce scope. A block statement does not: the
/// nearest enclosing function or program governs it, so the `parent` is
/// accepted for signature stability but does not currently refine the
/// answer.
pub fn is_scope_introducing(node: &NodeRef, _parent: Option<&NodeRef>) -> bool {
    node.kind() == NodeKind::Program || node.kind().is_function()
}

/// Whether the node is a literal, optionally matching a shallow pattern.
pub fn is_literal(node: &NodeRef, pattern: Option<&NodePattern>) -> bool {
    node.kind() == NodeKind::Literal && pattern.is_none_or(|p| p.matches(node))
}

/// Whether the node is a block statement.
pub fn is_block(node: &NodeRef) -> bool {
    node.kind() == NodeKind::BlockStatement
}

/// Whether the node is a `var` declaration.
pub fn is_var(node: &NodeRef) -> bool {
    node.kind() == NodeKind::VariableDeclaration
        && node.decl_kind().is_some_and(|k| !k.is_block_scoped())
}

/// Whether the node binds names block-scoped: a `let`/`const` declaration or
/// a function declaration.
pub fn is_block_scoped(node: &NodeRef) -> bool {
    match node.kind() {
        NodeKind::FunctionDeclaration => true,
        NodeKind::VariableDeclaration => node.decl_kind().is_some_and(|k| k.is_block_scoped()),
        _ => false,
    }
}

// ============================================================================
// Block-mandated slots
// ============================================================================

/// Slot keys that must syntactically hold exactly one statement or block.
pub const STATEMENT_OR_BLOCK_FIELDS: &[Field] = &[Field::Body, Field::Consequent, Field::Alternate];

/// Whether a field is one of the block-mandated slot keys.
pub fn is_statement_or_block_field(field: Field) -> bool {
    STATEMENT_OR_BLOCK_FIELDS.contains(&field)
}

/// Coerce a sequence-holding field slot into a block statement wrapping the
/// sequence, so no consumer observes a bare statement sequence where a
/// single block is structurally mandated.
///
/// No-op unless the slot currently holds a sequence.
pub fn coerce_to_block(container: &NodeRef, field: Field) {
    if let FieldValue::Seq(nodes) = container.field(field) {
        debug!(
            container = %container.kind(),
            field = %field,
            statements = nodes.len(),
            "coercing statement sequence into block"
        );
        let block = build::block(nodes);
        container.set_field(field, FieldValue::Node(block));
    }
}

// ============================================================================
// Comments
// ============================================================================

/// Transfer leading comments from `from` onto `to`, ahead of any comments
/// `to` already carries.
pub fn inherit_comments(to: &NodeRef, from: &NodeRef) {
    to.prepend_comments(from.leading_comments());
}

// ============================================================================
// Keys
// ============================================================================

/// Normalize the key of a member expression or object property to a node
/// usable as a computed key.
///
/// For a computed access the key expression is returned as-is. For a
/// non-computed access a static identifier key is converted to an equivalent
/// string literal; a literal key passes through.
pub fn to_computed_key(node: &NodeRef) -> Option<NodeRef> {
    let key_field = match node.kind() {
        NodeKind::MemberExpression => Field::Property,
        NodeKind::Property => Field::Key,
        _ => return None,
    };
    let key = node.slot(key_field).as_one()?.clone();
    if node.computed() {
        return Some(key);
    }
    match key.kind() {
        NodeKind::Identifier => {
            let name = key.name()?;
            Some(build::string(name))
        }
        NodeKind::Literal => Some(key),
        _ => None,
    }
}

// ============================================================================
// Binding identifiers
// ============================================================================

/// Collect the identifier nodes a construct binds, shallowly: the
/// declaration's own targets, not bindings introduced by nested statements.
pub fn get_binding_identifiers(node: &NodeRef) -> Vec<NodeRef> {
    let mut out = Vec::new();
    collect_binding_identifiers(node, &mut out);
    out
}

fn collect_binding_identifiers(node: &NodeRef, out: &mut Vec<NodeRef>) {
    match node.kind() {
        NodeKind::Identifier => out.push(node.clone()),
        NodeKind::VariableDeclaration => {
            if let FieldValue::List(declarations) = node.field(Field::Declarations) {
                for declarator in declarations.nodes() {
                    collect_binding_identifiers(&declarator, out);
                }
            }
        }
        NodeKind::VariableDeclarator => {
            if let Slot::One(id) = node.slot(Field::Id) {
                collect_binding_identifiers(&id, out);
            }
        }
        NodeKind::FunctionDeclaration | NodeKind::FunctionExpression => {
            if let Slot::One(id) = node.slot(Field::Id) {
                collect_binding_identifiers(&id, out);
            }
        }
        NodeKind::RestElement => {
            if let Slot::One(argument) = node.slot(Field::Argument) {
                collect_binding_identifiers(&argument, out);
            }
        }
        NodeKind::AssignmentExpression => {
            if let Slot::One(left) = node.slot(Field::Left) {
                collect_binding_identifiers(&left, out);
            }
        }
        _ => {}
    }
}

// ============================================================================
// Reference classification
// ============================================================================

/// Whether `node` appears in `parent` in a position that reads a value, as
/// opposed to a binding or key position.
pub fn is_referenced(node: &NodeRef, parent: &NodeRef) -> bool {
    let in_slot = |field: Field| {
        parent
            .slot(field)
            .as_one()
            .is_some_and(|held| NodeCell::same(held, node))
    };
    match parent.kind() {
        // object is always read; property only when computed
        NodeKind::MemberExpression => in_slot(Field::Object) || (parent.computed() && in_slot(Field::Property)),
        // value is read; a non-computed key is a name, not a reference
        NodeKind::Property => in_slot(Field::Value) || (parent.computed() && in_slot(Field::Key)),
        // the id is a binding, the init is read
        NodeKind::VariableDeclarator => in_slot(Field::Init),
        // function names and parameters are bindings
        NodeKind::FunctionDeclaration | NodeKind::FunctionExpression => {
            !in_slot(Field::Id) && !in_list_slot(parent, Field::Params, node)
        }
        NodeKind::ArrowFunctionExpression => !in_list_slot(parent, Field::Params, node),
        // an assignment target is written, not read
        NodeKind::AssignmentExpression => !in_slot(Field::Left),
        NodeKind::RestElement => false,
        _ => true,
    }
}

fn in_list_slot(parent: &NodeRef, field: Field, node: &NodeRef) -> bool {
    match parent.field(field) {
        FieldValue::List(list) => list.nodes().iter().any(|n| NodeCell::same(n, node)),
        _ => false,
    }
}

/// Whether `node` is an identifier referenced for its value, optionally
/// refined by a shallow pattern.
pub fn is_referenced_identifier(
    node: &NodeRef,
    parent: &NodeRef,
    pattern: Option<&NodePattern>,
) -> bool {
    node.kind() == NodeKind::Identifier
        && pattern.is_none_or(|p| p.matches(node))
        && is_referenced(node, parent)
}
