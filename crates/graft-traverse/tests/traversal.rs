// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Traversal behavior: position identity, hook dispatch, skip/stop, and the
//! mutation protocol observed through whole-tree walks.

use std::cell::RefCell;
use std::rc::Rc;

use graft_ast::{build, Field, FieldValue, LiteralValue, NodeCell, NodeKind, NodeRef};
use graft_traverse::{hook, traverse, File, HookAction, VisitorOpts};

fn name_of(path: &graft_traverse::Path) -> String {
    path.node().and_then(|n| n.name()).unwrap_or_default()
}

fn statement_name(path: &graft_traverse::Path) -> String {
    path.child(Field::Expression)
        .and_then(|p| p.node())
        .and_then(|n| n.name())
        .unwrap_or_default()
}

// ============================================================================
// Identity stability
// ============================================================================

#[test]
fn test_position_data_survives_across_passes() {
    let program = build::program(vec![build::variable_declaration(
        graft_ast::DeclKind::Let,
        vec![build::declarator(
            build::identifier("x"),
            Some(build::number(1.0)),
        )],
    )]);

    let first_pass = Rc::new(VisitorOpts::new().on_kind_enter(
        NodeKind::VariableDeclarator,
        hook(|path, _| {
            path.set_data("pass_one", serde_json::json!({"visits": 1}));
            Ok(HookAction::Continue)
        }),
    ));
    traverse(&program, &first_pass, None, None).unwrap();

    let recovered = Rc::new(RefCell::new(None));
    let sink = recovered.clone();
    let second_pass = Rc::new(VisitorOpts::new().on_kind_enter(
        NodeKind::VariableDeclarator,
        hook(move |path, _| {
            *sink.borrow_mut() = path.get_data("pass_one");
            Ok(HookAction::Continue)
        }),
    ));
    traverse(&program, &second_pass, None, None).unwrap();

    assert_eq!(
        recovered.borrow().clone(),
        Some(serde_json::json!({"visits": 1}))
    );
}

// ============================================================================
// Skip vs stop
// ============================================================================

#[test]
fn test_skip_aborts_subtree_but_not_siblings() {
    let program = build::program(vec![
        build::expression_statement(build::identifier("a")),
        build::expression_statement(build::identifier("b")),
        build::expression_statement(build::identifier("c")),
    ]);

    let statements = Rc::new(RefCell::new(Vec::new()));
    let identifiers = Rc::new(RefCell::new(Vec::new()));
    let stmt_log = statements.clone();
    let ident_log = identifiers.clone();

    let opts = Rc::new(
        VisitorOpts::new()
            .on_kind_enter(
                NodeKind::ExpressionStatement,
                hook(move |path, _| {
                    let name = statement_name(path);
                    stmt_log.borrow_mut().push(name.clone());
                    if name == "a" {
                        path.skip();
                    }
                    Ok(HookAction::Continue)
                }),
            )
            .on_kind_enter(
                NodeKind::Identifier,
                hook(move |path, _| {
                    ident_log.borrow_mut().push(name_of(path));
                    Ok(HookAction::Continue)
                }),
            ),
    );

    let stopped = traverse(&program, &opts, None, None).unwrap();
    assert!(!stopped);
    assert_eq!(*statements.borrow(), vec!["a", "b", "c"]);
    assert_eq!(*identifiers.borrow(), vec!["b", "c"]);
}

#[test]
fn test_stop_terminates_sibling_loop_and_propagates() {
    let program = build::program(vec![
        build::expression_statement(build::identifier("a")),
        build::expression_statement(build::identifier("b")),
        build::expression_statement(build::identifier("c")),
    ]);

    let statements = Rc::new(RefCell::new(Vec::new()));
    let stmt_log = statements.clone();

    let opts = Rc::new(VisitorOpts::new().on_kind_enter(
        NodeKind::ExpressionStatement,
        hook(move |path, _| {
            let name = statement_name(path);
            stmt_log.borrow_mut().push(name.clone());
            if name == "b" {
                path.stop();
            }
            Ok(HookAction::Continue)
        }),
    ));

    let stopped = traverse(&program, &opts, None, None).unwrap();
    assert!(stopped);
    assert_eq!(*statements.borrow(), vec!["a", "b"]);
}

// ============================================================================
// Hook precedence and blacklist
// ============================================================================

#[test]
fn test_kind_scoped_hook_wins_over_global() {
    let program = build::program(vec![build::expression_statement(build::identifier("x"))]);

    let events = Rc::new(RefCell::new(Vec::new()));
    let global_log = events.clone();
    let scoped_log = events.clone();

    let opts = Rc::new(
        VisitorOpts::new()
            .on_enter(hook(move |path, _| {
                if let Some(node) = path.node() {
                    global_log.borrow_mut().push(format!("global:{}", node.kind()));
                }
                Ok(HookAction::Continue)
            }))
            .on_kind_enter(
                NodeKind::Identifier,
                hook(move |path, _| {
                    scoped_log.borrow_mut().push(format!("scoped:{}", name_of(path)));
                    Ok(HookAction::Continue)
                }),
            ),
    );

    traverse(&program, &opts, None, None).unwrap();

    let events = events.borrow();
    assert!(events.contains(&"global:ExpressionStatement".to_string()));
    assert!(events.contains(&"scoped:x".to_string()));
    assert!(!events.iter().any(|e| e == "global:Identifier"));
}

#[test]
fn test_blacklisted_kind_gets_no_hooks_and_no_descent() {
    let program = build::program(vec![build::expression_statement(build::identifier("x"))]);

    let events = Rc::new(RefCell::new(Vec::new()));
    let log = events.clone();

    let opts = Rc::new(
        VisitorOpts::new()
            .on_enter(hook(move |path, _| {
                if let Some(node) = path.node() {
                    log.borrow_mut().push(node.kind().as_str());
                }
                Ok(HookAction::Continue)
            }))
            .with_blacklist([NodeKind::ExpressionStatement]),
    );

    traverse(&program, &opts, None, None).unwrap();
    assert!(events.borrow().is_empty());
}

// ============================================================================
// Mutation protocol
// ============================================================================

#[test]
fn test_loop_body_sequence_replacement_coerces_to_block() {
    let marker = build::expression_statement(build::identifier("marker"));
    marker.set_leading_comments(vec!["keep me".into()]);
    let loop_node = build::while_statement(build::bool_lit(true), marker);
    let program = build::program(vec![loop_node.clone()]);

    let first = build::expression_statement(build::identifier("first"));
    let second = build::expression_statement(build::identifier("second"));
    let replacements = RefCell::new(Some(vec![first.clone(), second.clone()]));

    let opts = Rc::new(VisitorOpts::new().on_kind_enter(
        NodeKind::ExpressionStatement,
        hook(move |path, _| {
            if statement_name(path) == "marker" {
                if let Some(nodes) = replacements.borrow_mut().take() {
                    return Ok(HookAction::ReplaceMany(nodes));
                }
            }
            Ok(HookAction::Continue)
        }),
    ));

    traverse(&program, &opts, None, None).unwrap();

    let body = loop_node
        .slot(Field::Body)
        .as_one()
        .cloned()
        .expect("loop body holds one node");
    assert_eq!(body.kind(), NodeKind::BlockStatement);

    let statements = match body.field(Field::Body) {
        FieldValue::List(list) => list.nodes(),
        other => panic!("expected block body list, got {other:?}"),
    };
    assert_eq!(statements.len(), 2);
    assert!(NodeCell::same(&statements[0], &first));
    assert!(NodeCell::same(&statements[1], &second));

    // the original node's leading comments moved onto the first replacement
    assert_eq!(first.leading_comments(), vec!["keep me"]);
}

#[test]
fn test_sequence_replacement_splices_into_sibling_list() {
    let program = build::program(vec![
        build::expression_statement(build::identifier("a")),
        build::expression_statement(build::identifier("b")),
    ]);

    let statements = Rc::new(RefCell::new(Vec::new()));
    let identifiers = Rc::new(RefCell::new(Vec::new()));
    let stmt_log = statements.clone();
    let ident_log = identifiers.clone();

    let replacement_c = build::expression_statement(build::identifier("c"));
    let replacement_d = build::expression_statement(build::identifier("d"));
    let pending = RefCell::new(Some(vec![replacement_c.clone(), replacement_d.clone()]));

    let opts = Rc::new(
        VisitorOpts::new()
            .on_kind_enter(
                NodeKind::ExpressionStatement,
                hook(move |path, _| {
                    let name = statement_name(path);
                    stmt_log.borrow_mut().push(name.clone());
                    if name == "a" {
                        if let Some(nodes) = pending.borrow_mut().take() {
                            return Ok(HookAction::ReplaceMany(nodes));
                        }
                    }
                    Ok(HookAction::Continue)
                }),
            )
            .on_kind_enter(
                NodeKind::Identifier,
                hook(move |path, _| {
                    ident_log.borrow_mut().push(name_of(path));
                    Ok(HookAction::Continue)
                }),
            ),
    );

    traverse(&program, &opts, None, None).unwrap();

    // the spliced-in statements were dispatched (their children visited)
    // without re-entering their own statement hooks
    assert_eq!(*statements.borrow(), vec!["a", "b"]);
    assert_eq!(*identifiers.borrow(), vec!["c", "d", "b"]);

    let body: Vec<NodeRef> = match program.field(Field::Body) {
        FieldValue::List(list) => list.nodes(),
        other => panic!("expected body list, got {other:?}"),
    };
    assert_eq!(body.len(), 3);
    assert!(NodeCell::same(&body[0], &replacement_c));
    assert!(NodeCell::same(&body[1], &replacement_d));
}

#[test]
fn test_removal_flattens_owning_sequence() {
    let program = build::program(vec![
        build::expression_statement(build::identifier("keep_front")),
        build::expression_statement(build::identifier("drop_me")),
        build::expression_statement(build::identifier("keep_back")),
    ]);

    let opts = Rc::new(VisitorOpts::new().on_kind_enter(
        NodeKind::ExpressionStatement,
        hook(|path, _| {
            if statement_name(path) == "drop_me" {
                path.remove()?;
            }
            Ok(HookAction::Continue)
        }),
    ));

    traverse(&program, &opts, None, None).unwrap();

    let names: Vec<String> = match program.field(Field::Body) {
        FieldValue::List(list) => list
            .nodes()
            .iter()
            .filter_map(|s| s.slot(Field::Expression).as_one().and_then(|n| n.name()))
            .collect(),
        other => panic!("expected body list, got {other:?}"),
    };
    assert_eq!(names, vec!["keep_front", "keep_back"]);
}

#[test]
fn test_single_replacement_preserves_following_visits() {
    let program = build::program(vec![
        build::expression_statement(build::identifier("old")),
        build::expression_statement(build::identifier("tail")),
    ]);

    let identifiers = Rc::new(RefCell::new(Vec::new()));
    let ident_log = identifiers.clone();

    let opts = Rc::new(
        VisitorOpts::new()
            .on_kind_enter(
                NodeKind::ExpressionStatement,
                hook(|path, _| {
                    if statement_name(path) == "old" {
                        return Ok(HookAction::Replace(build::expression_statement(
                            build::string("fresh"),
                        )));
                    }
                    Ok(HookAction::Continue)
                }),
            )
            .on_kind_enter(
                NodeKind::Identifier,
                hook(move |path, _| {
                    ident_log.borrow_mut().push(name_of(path));
                    Ok(HookAction::Continue)
                }),
            ),
    );

    traverse(&program, &opts, None, None).unwrap();

    // the replacement statement's subtree was visited in place of the old
    // one, and the following sibling still ran
    assert_eq!(*identifiers.borrow(), vec!["tail"]);
    let first = match program.field(Field::Body) {
        FieldValue::List(list) => list.nodes().remove(0),
        other => panic!("expected body list, got {other:?}"),
    };
    assert_eq!(
        first
            .slot(Field::Expression)
            .as_one()
            .and_then(|n| n.literal_value()),
        Some(LiteralValue::String("fresh".into()))
    );
}

#[test]
fn test_mutation_runs_file_check_on_replacements() {
    let program = build::program(vec![build::expression_statement(build::identifier("x"))]);
    let file = File::new();

    // a member expression missing both of its mandatory slots
    let malformed = NodeCell::new(NodeKind::MemberExpression);
    let opts = Rc::new(VisitorOpts::new().on_kind_enter(
        NodeKind::Identifier,
        hook(move |path, _| {
            if name_of(path) == "x" {
                return Ok(HookAction::Replace(malformed.clone()));
            }
            Ok(HookAction::Continue)
        }),
    ));

    traverse(&program, &opts, None, Some(file.clone())).unwrap();

    let diagnostics = file.diagnostics();
    assert!(!diagnostics.is_empty());
    assert!(diagnostics
        .iter()
        .all(|d| d.kind == NodeKind::MemberExpression));
}

// ============================================================================
// Out-of-band refresh
// ============================================================================

#[test]
fn test_refresh_reprimes_bindings_after_out_of_band_edit() {
    let program = build::program(vec![
        build::variable_declaration(
            graft_ast::DeclKind::Let,
            vec![build::declarator(
                build::identifier("x"),
                Some(build::number(1.0)),
            )],
        ),
        build::expression_statement(build::identifier("x")),
    ]);

    let resolved_kinds = Rc::new(RefCell::new(Vec::new()));
    let sink = resolved_kinds.clone();

    let opts = Rc::new(VisitorOpts::new().on_kind_enter(
        NodeKind::Identifier,
        hook(move |path, _| {
            if path.is_referenced_identifier(None) {
                // mimic an out-of-band edit elsewhere followed by refresh
                path.refresh();
                let resolved = path.resolve();
                sink.borrow_mut()
                    .push(resolved.and_then(|p| p.node()).map(|n| n.kind()));
            }
            Ok(HookAction::Continue)
        }),
    ));

    traverse(&program, &opts, None, None).unwrap();
    assert_eq!(*resolved_kinds.borrow(), vec![Some(NodeKind::Literal)]);
}
