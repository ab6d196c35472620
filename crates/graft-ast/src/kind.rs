// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Node kind taxonomy and slot addressing.
//!
//! This module defines the closed set of syntax node tags ([`NodeKind`]), the
//! closed set of child-slot names ([`Field`]), and the [`Key`] type that
//! addresses one slot within a container (a named field on a node, or an
//! index into a sibling sequence).
//!
//! Kinds and fields round-trip through their canonical string names, which
//! match the names a source printer or debugger would show (`"Identifier"`,
//! `"returnType"`, ...).

use serde::{Deserialize, Serialize};

// ============================================================================
// Node kinds
// ============================================================================

/// The closed set of syntax node tags.
///
/// Every [`Node`](crate::Node) carries exactly one kind, fixed at
/// construction. Structural predicates, visitor dispatch, and slot layout are
/// all keyed off this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Top-level program: an ordered statement sequence.
    Program,
    /// A name reference or binding occurrence.
    Identifier,
    /// A literal value (string, number, boolean, or null).
    Literal,
    /// A statement wrapping a single expression.
    ExpressionStatement,
    /// A braced statement sequence.
    BlockStatement,
    /// `var` / `let` / `const` declaration holding one or more declarators.
    VariableDeclaration,
    /// One `id = init` pair inside a declaration.
    VariableDeclarator,
    /// A named function declared in statement position.
    FunctionDeclaration,
    /// A function in expression position.
    FunctionExpression,
    /// An arrow function.
    ArrowFunctionExpression,
    /// An object literal.
    ObjectExpression,
    /// One key/value pair inside an object literal.
    Property,
    /// An array literal.
    ArrayExpression,
    /// `object.property` or `object[property]`.
    MemberExpression,
    /// A call with a callee and ordered arguments.
    CallExpression,
    /// `left = right` (and compound assignment operators).
    AssignmentExpression,
    /// A binary operator application.
    BinaryExpression,
    /// A rest element in a parameter or pattern position.
    RestElement,
    /// `return` with an optional argument.
    ReturnStatement,
    /// `if` with a test, consequent, and optional alternate.
    IfStatement,
    /// C-style `for` loop.
    ForStatement,
    /// `while` loop.
    WhileStatement,
    /// `do ... while` loop.
    DoWhileStatement,
    /// Wrapper node carrying one inner type annotation.
    TypeAnnotation,
    /// A named generic type, e.g. `Array<T>`.
    GenericTypeAnnotation,
    /// The ordered type arguments of a generic type.
    TypeParameterInstantiation,
    /// The primitive `string` type.
    StringTypeAnnotation,
    /// The primitive `number` type.
    NumberTypeAnnotation,
    /// The primitive `boolean` type.
    BooleanTypeAnnotation,
}

/// All node kinds, in declaration order.
///
/// This is the closed taxonomy the generated per-kind predicate family on
/// `Path` is built from.
pub const NODE_KINDS: &[NodeKind] = &[
    NodeKind::Program,
    NodeKind::Identifier,
    NodeKind::Literal,
    NodeKind::ExpressionStatement,
    NodeKind::BlockStatement,
    NodeKind::VariableDeclaration,
    NodeKind::VariableDeclarator,
    NodeKind::FunctionDeclaration,
    NodeKind::FunctionExpression,
    NodeKind::ArrowFunctionExpression,
    NodeKind::ObjectExpression,
    NodeKind::Property,
    NodeKind::ArrayExpression,
    NodeKind::MemberExpression,
    NodeKind::CallExpression,
    NodeKind::AssignmentExpression,
    NodeKind::BinaryExpression,
    NodeKind::RestElement,
    NodeKind::ReturnStatement,
    NodeKind::IfStatement,
    NodeKind::ForStatement,
    NodeKind::WhileStatement,
    NodeKind::DoWhileStatement,
    NodeKind::TypeAnnotation,
    NodeKind::GenericTypeAnnotation,
    NodeKind::TypeParameterInstantiation,
    NodeKind::StringTypeAnnotation,
    NodeKind::NumberTypeAnnotation,
    NodeKind::BooleanTypeAnnotation,
];

impl NodeKind {
    /// Returns the canonical string name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Program => "Program",
            NodeKind::Identifier => "Identifier",
            NodeKind::Literal => "Literal",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::BlockStatement => "BlockStatement",
            NodeKind::VariableDeclaration => "VariableDeclaration",
            NodeKind::VariableDeclarator => "VariableDeclarator",
            NodeKind::FunctionDeclaration => "FunctionDeclaration",
            NodeKind::FunctionExpression => "FunctionExpression",
            NodeKind::ArrowFunctionExpression => "ArrowFunctionExpression",
            NodeKind::ObjectExpression => "ObjectExpression",
            NodeKind::Property => "Property",
            NodeKind::ArrayExpression => "ArrayExpression",
            NodeKind::MemberExpression => "MemberExpression",
            NodeKind::CallExpression => "CallExpression",
            NodeKind::AssignmentExpression => "AssignmentExpression",
            NodeKind::BinaryExpression => "BinaryExpression",
            NodeKind::RestElement => "RestElement",
            NodeKind::ReturnStatement => "ReturnStatement",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::ForStatement => "ForStatement",
            NodeKind::WhileStatement => "WhileStatement",
            NodeKind::DoWhileStatement => "DoWhileStatement",
            NodeKind::TypeAnnotation => "TypeAnnotation",
            NodeKind::GenericTypeAnnotation => "GenericTypeAnnotation",
            NodeKind::TypeParameterInstantiation => "TypeParameterInstantiation",
            NodeKind::StringTypeAnnotation => "StringTypeAnnotation",
            NodeKind::NumberTypeAnnotation => "NumberTypeAnnotation",
            NodeKind::BooleanTypeAnnotation => "BooleanTypeAnnotation",
        }
    }

    /// Parse a canonical kind name back into a kind.
    pub fn from_str(name: &str) -> Option<NodeKind> {
        NODE_KINDS.iter().copied().find(|k| k.as_str() == name)
    }

    /// Returns true if this kind is one of the function kinds.
    pub fn is_function(&self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDeclaration
                | NodeKind::FunctionExpression
                | NodeKind::ArrowFunctionExpression
        )
    }

    /// Returns true if this kind is a type annotation node.
    pub fn is_annotation(&self) -> bool {
        matches!(
            self,
            NodeKind::TypeAnnotation
                | NodeKind::GenericTypeAnnotation
                | NodeKind::TypeParameterInstantiation
                | NodeKind::StringTypeAnnotation
                | NodeKind::NumberTypeAnnotation
                | NodeKind::BooleanTypeAnnotation
        )
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Slot addressing
// ============================================================================

/// The closed set of named child slots.
///
/// A field name only has meaning relative to a node kind; [`visit_fields`]
/// lists which fields a given kind carries, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Id,
    Init,
    Body,
    Object,
    Property,
    Key,
    Value,
    Callee,
    Arguments,
    Params,
    Properties,
    Elements,
    Left,
    Right,
    Argument,
    Test,
    Consequent,
    Alternate,
    Update,
    Expression,
    Declarations,
    ReturnType,
    TypeAnnotation,
    TypeParameters,
}

impl Field {
    /// Returns the canonical (camel-case) slot name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Init => "init",
            Field::Body => "body",
            Field::Object => "object",
            Field::Property => "property",
            Field::Key => "key",
            Field::Value => "value",
            Field::Callee => "callee",
            Field::Arguments => "arguments",
            Field::Params => "params",
            Field::Properties => "properties",
            Field::Elements => "elements",
            Field::Left => "left",
            Field::Right => "right",
            Field::Argument => "argument",
            Field::Test => "test",
            Field::Consequent => "consequent",
            Field::Alternate => "alternate",
            Field::Update => "update",
            Field::Expression => "expression",
            Field::Declarations => "declarations",
            Field::ReturnType => "returnType",
            Field::TypeAnnotation => "typeAnnotation",
            Field::TypeParameters => "typeParameters",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Address of one slot within a container: a named field on a node, or an
/// index into a sibling sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A named field slot on a node container.
    Field(Field),
    /// An index slot in a list container.
    Index(usize),
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Field(field) => write!(f, "{field}"),
            Key::Index(i) => write!(f, "[{i}]"),
        }
    }
}

// ============================================================================
// Per-kind slot layout
// ============================================================================

/// The child slots a node of the given kind carries, in source order.
///
/// Visitor dispatch walks exactly these slots; slots a kind does not list are
/// never visited even if present.
pub fn visit_fields(kind: NodeKind) -> &'static [Field] {
    match kind {
        NodeKind::Program => &[Field::Body],
        NodeKind::Identifier => &[Field::TypeAnnotation],
        NodeKind::Literal => &[],
        NodeKind::ExpressionStatement => &[Field::Expression],
        NodeKind::BlockStatement => &[Field::Body],
        NodeKind::VariableDeclaration => &[Field::Declarations],
        NodeKind::VariableDeclarator => &[Field::Id, Field::Init],
        NodeKind::FunctionDeclaration | NodeKind::FunctionExpression => {
            &[Field::Id, Field::Params, Field::Body, Field::ReturnType]
        }
        NodeKind::ArrowFunctionExpression => &[Field::Params, Field::Body, Field::ReturnType],
        NodeKind::ObjectExpression => &[Field::Properties],
        NodeKind::Property => &[Field::Key, Field::Value],
        NodeKind::ArrayExpression => &[Field::Elements],
        NodeKind::MemberExpression => &[Field::Object, Field::Property],
        NodeKind::CallExpression => &[Field::Callee, Field::Arguments],
        NodeKind::AssignmentExpression | NodeKind::BinaryExpression => {
            &[Field::Left, Field::Right]
        }
        NodeKind::RestElement => &[Field::Argument, Field::TypeAnnotation],
        NodeKind::ReturnStatement => &[Field::Argument],
        NodeKind::IfStatement => &[Field::Test, Field::Consequent, Field::Alternate],
        NodeKind::ForStatement => &[Field::Init, Field::Test, Field::Update, Field::Body],
        NodeKind::WhileStatement => &[Field::Test, Field::Body],
        NodeKind::DoWhileStatement => &[Field::Body, Field::Test],
        NodeKind::TypeAnnotation => &[Field::TypeAnnotation],
        NodeKind::GenericTypeAnnotation => &[Field::Id, Field::TypeParameters],
        NodeKind::TypeParameterInstantiation => &[Field::Params],
        NodeKind::StringTypeAnnotation
        | NodeKind::NumberTypeAnnotation
        | NodeKind::BooleanTypeAnnotation => &[],
    }
}

/// Slots that must be present for a node of the given kind to be
/// structurally well formed.
///
/// Used by the post-mutation structural check; kinds not listed here have no
/// mandatory slots.
pub fn required_fields(kind: NodeKind) -> &'static [Field] {
    match kind {
        NodeKind::ExpressionStatement => &[Field::Expression],
        NodeKind::VariableDeclaration => &[Field::Declarations],
        NodeKind::VariableDeclarator => &[Field::Id],
        NodeKind::Property => &[Field::Key, Field::Value],
        NodeKind::MemberExpression => &[Field::Object, Field::Property],
        NodeKind::CallExpression => &[Field::Callee],
        NodeKind::AssignmentExpression | NodeKind::BinaryExpression => {
            &[Field::Left, Field::Right]
        }
        NodeKind::RestElement => &[Field::Argument],
        NodeKind::IfStatement => &[Field::Test, Field::Consequent],
        NodeKind::WhileStatement | NodeKind::DoWhileStatement => &[Field::Test, Field::Body],
        NodeKind::ForStatement => &[Field::Body],
        NodeKind::TypeAnnotation => &[Field::TypeAnnotation],
        NodeKind::GenericTypeAnnotation => &[Field::Id],
        _ => &[],
    }
}
