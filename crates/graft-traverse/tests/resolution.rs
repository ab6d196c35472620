// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Constant resolution and type inference observed through whole-tree
//! walks: binding fixpoints, object-literal member lookup, and explicit vs
//! inferred annotations.

use std::cell::RefCell;
use std::rc::Rc;

use graft_ast::{build, DeclKind, Field, FieldValue, LiteralValue, NodeCell, NodeKind, NodeRef};
use graft_traverse::{hook, traverse, HookAction, Path, TypeInfo, VisitorOpts};

fn let_decl(name: &str, init: NodeRef) -> NodeRef {
    build::variable_declaration(
        DeclKind::Let,
        vec![build::declarator(build::identifier(name), Some(init))],
    )
}

/// Collect the resolution of every referenced identifier in the program.
fn resolve_references(program: &NodeRef) -> Vec<Option<Path>> {
    let resolutions = Rc::new(RefCell::new(Vec::new()));
    let sink = resolutions.clone();
    let opts = Rc::new(VisitorOpts::new().on_kind_enter(
        NodeKind::Identifier,
        hook(move |path, _| {
            if path.is_referenced_identifier(None) {
                sink.borrow_mut().push(path.resolve());
            }
            Ok(HookAction::Continue)
        }),
    ));
    traverse(program, &opts, None, None).unwrap();
    let resolved = resolutions.borrow().clone();
    resolved
}

// ============================================================================
// Constant resolution
// ============================================================================

#[test]
fn test_self_referential_declaration_resolves_to_its_declarator() {
    // let x = x;
    let declarator = build::declarator(
        build::identifier("x"),
        Some(build::identifier("x")),
    );
    let declarator_node = declarator.clone();
    let program = build::program(vec![build::variable_declaration(
        DeclKind::Let,
        vec![declarator],
    )]);

    let resolutions = resolve_references(&program);
    assert_eq!(resolutions.len(), 1);
    let resolved = resolutions[0].clone().expect("self-reference terminates");
    let resolved_node = resolved.node().expect("declarator is still in place");
    assert!(NodeCell::same(&resolved_node, &declarator_node));
}

#[test]
fn test_member_access_resolves_through_object_literal() {
    // const o = {a: 1, b: 2}; o.a;
    let one = build::number(1.0);
    let object = build::object_expression(vec![
        build::property(build::identifier("a"), one.clone()),
        build::property(build::identifier("b"), build::number(2.0)),
    ]);
    let program = build::program(vec![
        build::variable_declaration(
            DeclKind::Const,
            vec![build::declarator(build::identifier("o"), Some(object))],
        ),
        build::expression_statement(build::member_expression(
            build::identifier("o"),
            build::identifier("a"),
            false,
        )),
    ]);

    let resolved = Rc::new(RefCell::new(None));
    let sink = resolved.clone();
    let opts = Rc::new(VisitorOpts::new().on_kind_enter(
        NodeKind::MemberExpression,
        hook(move |path, _| {
            *sink.borrow_mut() = path.resolve();
            Ok(HookAction::Continue)
        }),
    ));
    traverse(&program, &opts, None, None).unwrap();

    let value = resolved
        .borrow()
        .clone()
        .and_then(|p| p.node())
        .expect("member access resolves");
    assert!(NodeCell::same(&value, &one));
    assert_eq!(value.literal_value(), Some(LiteralValue::Number(1.0)));
}

#[test]
fn test_duplicate_object_keys_first_match_wins() {
    // const o = {a: 1, a: 2}; o.a;
    let first = build::number(1.0);
    let object = build::object_expression(vec![
        build::property(build::identifier("a"), first.clone()),
        build::property(build::identifier("a"), build::number(2.0)),
    ]);
    let program = build::program(vec![
        build::variable_declaration(
            DeclKind::Const,
            vec![build::declarator(build::identifier("o"), Some(object))],
        ),
        build::expression_statement(build::member_expression(
            build::identifier("o"),
            build::string("a"),
            true,
        )),
    ]);

    let resolved = Rc::new(RefCell::new(None));
    let sink = resolved.clone();
    let opts = Rc::new(VisitorOpts::new().on_kind_enter(
        NodeKind::MemberExpression,
        hook(move |path, _| {
            *sink.borrow_mut() = path.resolve();
            Ok(HookAction::Continue)
        }),
    ));
    traverse(&program, &opts, None, None).unwrap();

    let value = resolved
        .borrow()
        .clone()
        .and_then(|p| p.node())
        .expect("computed literal key resolves");
    assert!(NodeCell::same(&value, &first));
}

#[test]
fn test_member_access_on_non_object_target_fails_quietly() {
    // let n = 3; n.a;
    let program = build::program(vec![
        let_decl("n", build::number(3.0)),
        build::expression_statement(build::member_expression(
            build::identifier("n"),
            build::identifier("a"),
            false,
        )),
    ]);

    // outer None = hook never ran; Some(None) = resolution found nothing
    let outcome: Rc<RefCell<Option<Option<Path>>>> = Rc::new(RefCell::new(None));
    let sink = outcome.clone();
    let opts = Rc::new(VisitorOpts::new().on_kind_enter(
        NodeKind::MemberExpression,
        hook(move |path, _| {
            *sink.borrow_mut() = Some(path.resolve());
            Ok(HookAction::Continue)
        }),
    ));
    traverse(&program, &opts, None, None).unwrap();
    assert_eq!(*outcome.borrow(), Some(None));
}

// ============================================================================
// Type inference
// ============================================================================

#[test]
fn test_explicit_annotation_is_not_inferred() {
    // function f(p: string) {}
    let param = build::identifier("p");
    param.set_field(
        Field::TypeAnnotation,
        FieldValue::Node(build::type_annotation(build::string_type_annotation())),
    );
    let program = build::program(vec![build::function_declaration(
        Some(build::identifier("f")),
        vec![param],
        vec![],
    )]);

    let info: Rc<RefCell<Option<TypeInfo>>> = Rc::new(RefCell::new(None));
    let sink = info.clone();
    let opts = Rc::new(VisitorOpts::new().on_kind_enter(
        NodeKind::FunctionDeclaration,
        hook(move |path, _| {
            let params = path.children(Field::Params);
            *sink.borrow_mut() = params.first().map(|p| p.get_type_annotation());
            Ok(HookAction::Continue)
        }),
    ));
    traverse(&program, &opts, None, None).unwrap();

    let info = info.borrow().clone().expect("parameter was inspected");
    assert!(!info.inferred);
    assert_eq!(
        info.annotation.map(|a| a.kind()),
        Some(NodeKind::StringTypeAnnotation)
    );
}

#[test]
fn test_string_initializer_infers_string_type() {
    // let s = "hi"; s;
    let program = build::program(vec![
        let_decl("s", build::string("hi")),
        build::expression_statement(build::identifier("s")),
    ]);

    let info: Rc<RefCell<Option<TypeInfo>>> = Rc::new(RefCell::new(None));
    let sink = info.clone();
    let opts = Rc::new(VisitorOpts::new().on_kind_enter(
        NodeKind::Identifier,
        hook(move |path, _| {
            if path.is_referenced_identifier(None) {
                *sink.borrow_mut() = Some(path.get_type_annotation());
            }
            Ok(HookAction::Continue)
        }),
    ));
    traverse(&program, &opts, None, None).unwrap();

    let info = info.borrow().clone().expect("reference was inspected");
    assert!(info.inferred);
    assert_eq!(
        info.annotation.map(|a| a.kind()),
        Some(NodeKind::StringTypeAnnotation)
    );
}

#[test]
fn test_object_initializer_infers_object_generic() {
    // let o = {}; o;
    let program = build::program(vec![
        let_decl("o", build::object_expression(vec![])),
        build::expression_statement(build::identifier("o")),
    ]);

    let is_object = Rc::new(RefCell::new(false));
    let sink = is_object.clone();
    let opts = Rc::new(VisitorOpts::new().on_kind_enter(
        NodeKind::Identifier,
        hook(move |path, _| {
            if path.is_referenced_identifier(None) {
                *sink.borrow_mut() = path.is_type_generic("Object", false);
            }
            Ok(HookAction::Continue)
        }),
    ));
    traverse(&program, &opts, None, None).unwrap();
    assert!(*is_object.borrow());
}
