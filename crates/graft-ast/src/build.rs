// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Node constructors.
//!
//! Thin builders over [`NodeCell::new`] that wire scalars and child slots
//! for each kind. Used by tests, by callers assembling replacement subtrees,
//! and by block coercion.

use crate::kind::{Field, NodeKind};
use crate::node::{DeclKind, FieldValue, ListCell, LiteralValue, NodeCell, NodeRef};

fn with_node(node: &NodeRef, field: Field, child: NodeRef) {
    node.set_field(field, FieldValue::Node(child));
}

fn with_list(node: &NodeRef, field: Field, children: Vec<NodeRef>) {
    node.set_field(field, FieldValue::List(ListCell::new(children)));
}

/// `Identifier` with the given name.
pub fn identifier(name: impl Into<String>) -> NodeRef {
    let node = NodeCell::new(NodeKind::Identifier);
    node.set_name(name);
    node
}

/// `Literal` holding an arbitrary value.
pub fn literal(value: LiteralValue) -> NodeRef {
    let node = NodeCell::new(NodeKind::Literal);
    node.set_literal_value(value);
    node
}

/// String literal.
pub fn string(value: impl Into<String>) -> NodeRef {
    literal(LiteralValue::String(value.into()))
}

/// Number literal.
pub fn number(value: f64) -> NodeRef {
    literal(LiteralValue::Number(value))
}

/// Boolean literal.
pub fn bool_lit(value: bool) -> NodeRef {
    literal(LiteralValue::Bool(value))
}

/// Null literal.
pub fn null() -> NodeRef {
    literal(LiteralValue::Null)
}

/// `Program` with the given statement list.
pub fn program(body: Vec<NodeRef>) -> NodeRef {
    let node = NodeCell::new(NodeKind::Program);
    with_list(&node, Field::Body, body);
    node
}

/// `BlockStatement` with the given statement list.
pub fn block(body: Vec<NodeRef>) -> NodeRef {
    let node = NodeCell::new(NodeKind::BlockStatement);
    with_list(&node, Field::Body, body);
    node
}

/// `ExpressionStatement` wrapping one expression.
pub fn expression_statement(expression: NodeRef) -> NodeRef {
    let node = NodeCell::new(NodeKind::ExpressionStatement);
    with_node(&node, Field::Expression, expression);
    node
}

/// `VariableDeclaration` with the given keyword and declarators.
pub fn variable_declaration(kind: DeclKind, declarators: Vec<NodeRef>) -> NodeRef {
    let node = NodeCell::new(NodeKind::VariableDeclaration);
    node.set_decl_kind(kind);
    with_list(&node, Field::Declarations, declarators);
    node
}

/// `VariableDeclarator` with an optional initializer.
pub fn declarator(id: NodeRef, init: Option<NodeRef>) -> NodeRef {
    let node = NodeCell::new(NodeKind::VariableDeclarator);
    with_node(&node, Field::Id, id);
    if let Some(init) = init {
        with_node(&node, Field::Init, init);
    }
    node
}

/// `FunctionDeclaration` with an optional name.
pub fn function_declaration(id: Option<NodeRef>, params: Vec<NodeRef>, body: Vec<NodeRef>) -> NodeRef {
    function_like(NodeKind::FunctionDeclaration, id, params, body)
}

/// `FunctionExpression` with an optional name.
pub fn function_expression(id: Option<NodeRef>, params: Vec<NodeRef>, body: Vec<NodeRef>) -> NodeRef {
    function_like(NodeKind::FunctionExpression, id, params, body)
}

fn function_like(
    kind: NodeKind,
    id: Option<NodeRef>,
    params: Vec<NodeRef>,
    body: Vec<NodeRef>,
) -> NodeRef {
    let node = NodeCell::new(kind);
    if let Some(id) = id {
        with_node(&node, Field::Id, id);
    }
    with_list(&node, Field::Params, params);
    with_node(&node, Field::Body, block(body));
    node
}

/// `ObjectExpression` with the given properties.
pub fn object_expression(properties: Vec<NodeRef>) -> NodeRef {
    let node = NodeCell::new(NodeKind::ObjectExpression);
    with_list(&node, Field::Properties, properties);
    node
}

/// `Property` with a key and a value.
pub fn property(key: NodeRef, value: NodeRef) -> NodeRef {
    let node = NodeCell::new(NodeKind::Property);
    with_node(&node, Field::Key, key);
    with_node(&node, Field::Value, value);
    node
}

/// `ArrayExpression` with the given elements.
pub fn array_expression(elements: Vec<NodeRef>) -> NodeRef {
    let node = NodeCell::new(NodeKind::ArrayExpression);
    with_list(&node, Field::Elements, elements);
    node
}

/// `MemberExpression`; `computed` selects `object[property]` over
/// `object.property`.
pub fn member_expression(object: NodeRef, property: NodeRef, computed: bool) -> NodeRef {
    let node = NodeCell::new(NodeKind::MemberExpression);
    node.set_computed(computed);
    with_node(&node, Field::Object, object);
    with_node(&node, Field::Property, property);
    node
}

/// `CallExpression` with ordered arguments.
pub fn call(callee: NodeRef, arguments: Vec<NodeRef>) -> NodeRef {
    let node = NodeCell::new(NodeKind::CallExpression);
    with_node(&node, Field::Callee, callee);
    with_list(&node, Field::Arguments, arguments);
    node
}

/// `AssignmentExpression` with the `=` operator.
pub fn assignment(left: NodeRef, right: NodeRef) -> NodeRef {
    let node = NodeCell::new(NodeKind::AssignmentExpression);
    node.set_operator("=");
    with_node(&node, Field::Left, left);
    with_node(&node, Field::Right, right);
    node
}

/// `BinaryExpression` with the given operator.
pub fn binary(operator: impl Into<String>, left: NodeRef, right: NodeRef) -> NodeRef {
    let node = NodeCell::new(NodeKind::BinaryExpression);
    node.set_operator(operator);
    with_node(&node, Field::Left, left);
    with_node(&node, Field::Right, right);
    node
}

/// `RestElement` over an argument pattern.
pub fn rest_element(argument: NodeRef) -> NodeRef {
    let node = NodeCell::new(NodeKind::RestElement);
    with_node(&node, Field::Argument, argument);
    node
}

/// `ReturnStatement` with an optional argument.
pub fn return_statement(argument: Option<NodeRef>) -> NodeRef {
    let node = NodeCell::new(NodeKind::ReturnStatement);
    if let Some(argument) = argument {
        with_node(&node, Field::Argument, argument);
    }
    node
}

/// `IfStatement` with an optional alternate.
pub fn if_statement(test: NodeRef, consequent: NodeRef, alternate: Option<NodeRef>) -> NodeRef {
    let node = NodeCell::new(NodeKind::IfStatement);
    with_node(&node, Field::Test, test);
    with_node(&node, Field::Consequent, consequent);
    if let Some(alternate) = alternate {
        with_node(&node, Field::Alternate, alternate);
    }
    node
}

/// `WhileStatement`.
pub fn while_statement(test: NodeRef, body: NodeRef) -> NodeRef {
    let node = NodeCell::new(NodeKind::WhileStatement);
    with_node(&node, Field::Test, test);
    with_node(&node, Field::Body, body);
    node
}

/// `TypeAnnotation` wrapper around an inner annotation.
pub fn type_annotation(inner: NodeRef) -> NodeRef {
    let node = NodeCell::new(NodeKind::TypeAnnotation);
    with_node(&node, Field::TypeAnnotation, inner);
    node
}

/// `GenericTypeAnnotation` with an optional type-parameter list.
pub fn generic_type_annotation(id: NodeRef, type_parameters: Option<NodeRef>) -> NodeRef {
    let node = NodeCell::new(NodeKind::GenericTypeAnnotation);
    with_node(&node, Field::Id, id);
    if let Some(params) = type_parameters {
        with_node(&node, Field::TypeParameters, params);
    }
    node
}

/// `TypeParameterInstantiation` holding ordered type arguments.
pub fn type_parameter_instantiation(params: Vec<NodeRef>) -> NodeRef {
    let node = NodeCell::new(NodeKind::TypeParameterInstantiation);
    with_list(&node, Field::Params, params);
    node
}

/// The primitive `string` type.
pub fn string_type_annotation() -> NodeRef {
    NodeCell::new(NodeKind::StringTypeAnnotation)
}

/// The primitive `number` type.
pub fn number_type_annotation() -> NodeRef {
    NodeCell::new(NodeKind::NumberTypeAnnotation)
}

/// The primitive `boolean` type.
pub fn boolean_type_annotation() -> NodeRef {
    NodeCell::new(NodeKind::BooleanTypeAnnotation)
}
