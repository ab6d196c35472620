// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Constant resolution and structural type inference.
//!
//! [`Path::resolve`] chases a reference to its originating value:
//! declarators resolve through their initializer, identifiers through their
//! scope binding, member accesses with a statically known key through an
//! object-literal-shaped target. Everything else is already a terminal
//! value and resolves to itself.
//!
//! Resolution is best-effort and structural: failure is expressed as
//! `None` ("could not determine"), never as an error. The chain is bounded
//! by a visited set, so direct self-reference and mutual cross-references
//! both terminate: the chain closes over at a declaration.
//!
//! [`Path::get_type_annotation`] is memoized per position. An explicit
//! annotation on the node wins and is marked as such; otherwise the
//! resolved value's shape is classified structurally.

use graft_ast::{build, is_literal, to_computed_key, Field, LiteralValue, NodeKind, NodePattern, NodeRef};

use crate::path::Path;

/// The outcome of [`Path::get_type_annotation`].
///
/// `annotation: None` is a valid, distinct outcome ("no type could be
/// determined"), not a default.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// False when the annotation was written in the source; true when it
    /// was inferred from the resolved value (or when inference failed).
    pub inferred: bool,
    /// The annotation node, unwrapped from any wrapper annotation shape.
    pub annotation: Option<NodeRef>,
}

impl Path {
    // ------------------------------------------------------------------
    // Constant resolution
    // ------------------------------------------------------------------

    /// Chase this position to the position of its originating value.
    pub fn resolve(&self) -> Option<Path> {
        self.resolve_bounded(&mut Vec::new())
    }

    fn resolve_bounded(&self, seen: &mut Vec<Path>) -> Option<Path> {
        let node = self.node()?;
        match node.kind() {
            NodeKind::VariableDeclarator => {
                seen.push(self.clone());
                self.child(Field::Init)?.resolve_bounded(seen)
            }
            NodeKind::Identifier => {
                let name = node.name()?;
                let binding = self.scope()?.get_binding(&name)?;
                let binding_path = binding.path()?;
                if binding_path == *self {
                    // a binding that declares itself is its own terminal
                    return Some(self.clone());
                }
                if seen.contains(&binding_path) {
                    // the chain has come back around; the declaration is
                    // the best terminal for a cyclic reference
                    return Some(binding_path);
                }
                seen.push(self.clone());
                binding_path.resolve_bounded(seen)
            }
            NodeKind::MemberExpression => {
                let key = to_computed_key(&node)?;
                if !is_literal(&key, None) {
                    return None;
                }
                let target = key.literal_value()?;
                let object = self.child(Field::Object)?.resolve_bounded(seen)?;
                if !object.is_object_expression() {
                    return None;
                }
                // declaration order; the first matching key wins and later
                // duplicates are unreachable
                for prop in object.children(Field::Properties) {
                    if !prop.is_property() {
                        continue;
                    }
                    let Some(key_path) = prop.child(Field::Key) else {
                        continue;
                    };
                    let by_name = match &target {
                        LiteralValue::String(name) => {
                            key_path.is_identifier_match(&NodePattern::named(name.clone()))
                        }
                        _ => false,
                    };
                    if by_name || key_path.is_literal_match(&NodePattern::valued(target.clone())) {
                        return prop.child(Field::Value);
                    }
                }
                None
            }
            _ => Some(self.clone()),
        }
    }

    // ------------------------------------------------------------------
    // Type inference
    // ------------------------------------------------------------------

    /// The type at this position: the explicit annotation if the node
    /// carries one, otherwise a structural inference from the resolved
    /// value. Memoized per position.
    pub fn get_type_annotation(&self) -> TypeInfo {
        if let Some(info) = self.cached_type_info() {
            return info;
        }

        let mut info = TypeInfo {
            inferred: false,
            annotation: None,
        };

        let explicit = self
            .node()
            .and_then(|node| node.slot(Field::TypeAnnotation).as_one().cloned());
        let annotation = match explicit {
            Some(annotation) => Some(annotation),
            None => {
                info.inferred = true;
                self.infer_type()
            }
        };

        if let Some(annotation) = annotation {
            // unwrap the wrapper annotation shape
            let annotation = if annotation.kind() == NodeKind::TypeAnnotation {
                annotation
                    .slot(Field::TypeAnnotation)
                    .as_one()
                    .cloned()
                    .unwrap_or(annotation)
            } else {
                annotation
            };
            info.annotation = Some(annotation);
        }

        self.store_type_info(info.clone());
        info
    }

    fn infer_type(&self) -> Option<NodeRef> {
        let resolved = self.resolve()?;
        let node = resolved.node()?;
        match node.kind() {
            NodeKind::RestElement | NodeKind::ArrayExpression => Some(
                build::generic_type_annotation(build::identifier("Array"), None),
            ),
            NodeKind::ObjectExpression => Some(build::generic_type_annotation(
                build::identifier("Object"),
                None,
            )),
            NodeKind::Literal => match node.literal_value()? {
                LiteralValue::String(_) => Some(build::string_type_annotation()),
                LiteralValue::Number(_) => Some(build::number_type_annotation()),
                LiteralValue::Bool(_) => Some(build::boolean_type_annotation()),
                LiteralValue::Null => None,
            },
            NodeKind::CallExpression => {
                let callee = resolved.child(Field::Callee)?.resolve()?;
                if callee.is_function() {
                    callee.node()?.slot(Field::ReturnType).as_one().cloned()
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Whether the type at this position is a generic named `name`,
    /// optionally requiring type parameters to be present.
    pub fn is_type_generic(&self, name: &str, require_type_params: bool) -> bool {
        let Some(annotation) = self.get_type_annotation().annotation else {
            return false;
        };
        if annotation.kind() != NodeKind::GenericTypeAnnotation {
            return false;
        }
        let named = annotation.slot(Field::Id).as_one().is_some_and(|id| {
            id.kind() == NodeKind::Identifier && id.name().as_deref() == Some(name)
        });
        if !named {
            return false;
        }
        !(require_type_params && !annotation.has_field(Field::TypeParameters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::hooks::VisitorOpts;
    use crate::path::Container;
    use crate::scope::Scope;
    use graft_ast::{DeclKind, FieldValue, Key, NodeCell};
    use std::rc::Rc;

    /// Position of the statement at `index`, bound to a context carrying
    /// the program's scope.
    fn stmt_path(program: &NodeRef, index: usize) -> Path {
        let scope = Scope::for_root(program, None);
        let context = Context::new(Rc::new(VisitorOpts::new()), None, Some(scope), None);
        let FieldValue::List(body) = program.field(Field::Body) else {
            panic!("program body is a list");
        };
        Path::get(
            None,
            Some(&context),
            program,
            &Container::List(body),
            Key::Index(index),
            None,
        )
    }

    fn let_decl(name: &str, init: NodeRef) -> NodeRef {
        build::variable_declaration(
            DeclKind::Let,
            vec![build::declarator(build::identifier(name), Some(init))],
        )
    }

    #[test]
    fn test_terminal_value_resolves_to_itself() {
        let program = build::program(vec![build::expression_statement(build::number(3.0))]);
        let literal = stmt_path(&program, 0).child(Field::Expression).unwrap();
        let resolved = literal.resolve().unwrap();
        assert_eq!(resolved, literal);
    }

    #[test]
    fn test_unbound_identifier_does_not_resolve() {
        let program = build::program(vec![build::expression_statement(build::identifier("ghost"))]);
        let reference = stmt_path(&program, 0).child(Field::Expression).unwrap();
        assert!(reference.resolve().is_none());
    }

    #[test]
    fn test_mutual_cycle_terminates_at_a_declaration() {
        // let a = b; let b = a;
        let program = build::program(vec![
            let_decl("a", build::identifier("b")),
            let_decl("b", build::identifier("a")),
        ]);
        let init_of_a = stmt_path(&program, 0)
            .children(Field::Declarations)
            .remove(0)
            .child(Field::Init)
            .unwrap();
        let resolved = init_of_a.resolve().expect("cycle must terminate");
        assert!(resolved.is_variable_declarator());
    }

    #[test]
    fn test_type_annotation_is_memoized() {
        let program = build::program(vec![build::expression_statement(build::string("hi"))]);
        let literal = stmt_path(&program, 0).child(Field::Expression).unwrap();
        let first = literal.get_type_annotation();
        let second = literal.get_type_annotation();
        let (a, b) = (first.annotation.unwrap(), second.annotation.unwrap());
        assert!(NodeCell::same(&a, &b));
        assert!(first.inferred);
    }

    #[test]
    fn test_call_infers_declared_return_type() {
        // function f() {}  (with declared return type string)  f()
        let func = build::function_declaration(Some(build::identifier("f")), vec![], vec![]);
        func.set_field(
            Field::ReturnType,
            FieldValue::Node(build::string_type_annotation()),
        );
        let program = build::program(vec![
            func,
            build::expression_statement(build::call(build::identifier("f"), vec![])),
        ]);
        let call = stmt_path(&program, 1).child(Field::Expression).unwrap();
        let info = call.get_type_annotation();
        assert!(info.inferred);
        assert_eq!(
            info.annotation.map(|a| a.kind()),
            Some(NodeKind::StringTypeAnnotation)
        );
    }

    #[test]
    fn test_is_type_generic() {
        let program = build::program(vec![
            let_decl("arr", build::array_expression(vec![build::number(1.0)])),
            build::expression_statement(build::identifier("arr")),
        ]);
        let reference = stmt_path(&program, 1).child(Field::Expression).unwrap();
        assert!(reference.is_type_generic("Array", false));
        assert!(!reference.is_type_generic("Object", false));
        // inferred Array carries no type parameters
        assert!(!reference.is_type_generic("Array", true));
    }
}
