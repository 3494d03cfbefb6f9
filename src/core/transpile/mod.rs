//! TypeScript to JavaScript conversion by type erasure.
//!
//! Templates are parsed with tree-sitter and every TypeScript-only construct
//! is cut out of the original text, so comments, JSX and layout survive
//! untouched. Constructs that carry runtime semantics (enums, namespaces,
//! decorators, parameter properties) are rejected instead of lowered.

mod edits;
mod imports;

use tree_sitter::{Node, Parser, Tree};

use crate::error::{Error, Result, SourcePosition};

use edits::{Edits, Trim};

/// Grammar used to parse a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    TypeScript,
    Tsx,
}

impl Dialect {
    pub fn for_jsx(uses_jsx: bool) -> Self {
        if uses_jsx {
            Dialect::Tsx
        } else {
            Dialect::TypeScript
        }
    }

    fn language(&self) -> tree_sitter::Language {
        match self {
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Strip TypeScript syntax from `source`, returning plain JavaScript (or JSX).
///
/// `name` identifies the template in error messages.
pub fn transpile(source: &str, dialect: Dialect, name: &str) -> Result<String> {
    let tree = parse(source, dialect, name)?;
    let root = tree.root_node();

    let mut stripper = Stripper {
        name,
        edits: Edits::new(source),
    };
    stripper.visit(root)?;

    let mut edits = stripper.edits;
    imports::elide_unused(root, source, &mut edits);

    crate::log_status!(
        "transpile",
        "{}: removed {} TypeScript span(s)",
        name,
        edits.len()
    );

    Ok(edits.apply())
}

fn parse(source: &str, dialect: Dialect, name: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&dialect.language())
        .map_err(|e| Error::internal_unexpected(format!("Failed to load grammar: {}", e)))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::internal_unexpected(format!("Parser returned no tree for {}", name)))?;

    if tree.root_node().has_error() {
        let position = first_error(tree.root_node())
            .map(|node| position_of(&node))
            .unwrap_or(SourcePosition { line: 1, column: 1 });
        return Err(Error::template_parse_failed(name, position));
    }

    Ok(tree)
}

fn first_error<'tree>(node: Node<'tree>) -> Option<Node<'tree>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let children: Vec<Node<'tree>> = node.children(&mut node.walk()).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error)
}

fn position_of(node: &Node) -> SourcePosition {
    let point = node.start_position();
    SourcePosition {
        line: point.row + 1,
        column: point.column + 1,
    }
}

struct Stripper<'a> {
    name: &'a str,
    edits: Edits<'a>,
}

impl<'a> Stripper<'a> {
    fn visit(&mut self, node: Node) -> Result<()> {
        match node.kind() {
            // Whole declarations with no runtime counterpart.
            "interface_declaration"
            | "type_alias_declaration"
            | "function_signature"
            | "method_signature"
            | "abstract_method_signature"
            | "index_signature" => {
                self.edits.remove_statement(node);
                Ok(())
            }
            "export_statement" if exports_only_types(&node) => {
                self.edits.remove_statement(node);
                Ok(())
            }
            "export_statement" => self.visit_export(node),

            // Import elision needs the full picture of value usage; see `imports`.
            "import_statement" => self.check_import(node),

            "type_annotation"
            | "asserts_annotation"
            | "type_predicate_annotation"
            | "type_parameters"
            | "type_arguments"
            | "implements_clause" => {
                self.edits.remove(node.byte_range(), Trim::Before);
                Ok(())
            }

            "as_expression" | "satisfies_expression" | "non_null_expression" => {
                let inner = node
                    .named_child(0)
                    .ok_or_else(|| self.unsupported(&node, "empty expression"))?;
                self.edits.remove(inner.end_byte()..node.end_byte(), Trim::None);
                self.visit(inner)
            }

            "type_assertion" => {
                for child in children(node) {
                    if child.kind() == "type_arguments" {
                        self.edits.remove(child.byte_range(), Trim::After);
                    } else {
                        self.visit(child)?;
                    }
                }
                Ok(())
            }

            // `this` parameters only type the receiver.
            "formal_parameters" => {
                let entries: Vec<(Node, bool)> = children(node)
                    .into_iter()
                    .filter(|child| child.is_named() && child.kind() != "comment")
                    .map(|param| (param, !is_this_parameter(&param)))
                    .collect();
                self.edits.remove_list_entries(&entries);

                for (param, kept) in entries {
                    if kept {
                        self.visit(param)?;
                    }
                }
                Ok(())
            }

            "required_parameter" | "optional_parameter" => {
                for child in children(node) {
                    match child.kind() {
                        "accessibility_modifier" | "override_modifier" | "readonly" => {
                            return Err(self.unsupported(&child, "parameter property"));
                        }
                        "?" => self.edits.remove(child.byte_range(), Trim::None),
                        _ => self.visit(child)?,
                    }
                }
                Ok(())
            }

            "public_field_definition" | "method_definition" => {
                for child in children(node) {
                    match child.kind() {
                        "accessibility_modifier" | "override_modifier" | "readonly"
                        | "declare" | "abstract" => {
                            self.edits.remove(child.byte_range(), Trim::After)
                        }
                        "?" | "!" if !child.is_named() => {
                            self.edits.remove(child.byte_range(), Trim::None)
                        }
                        _ => self.visit(child)?,
                    }
                }
                Ok(())
            }

            "enum_declaration" => Err(self.unsupported(&node, "enum declaration")),
            "internal_module" | "module" => Err(self.unsupported(&node, "namespace declaration")),
            "ambient_declaration" => Err(self.unsupported(&node, "declare statement")),
            "abstract_class_declaration" => Err(self.unsupported(&node, "abstract class")),
            "decorator" => Err(self.unsupported(&node, "decorator")),
            "import_alias" => Err(self.unsupported(&node, "import alias")),

            _ => {
                for child in children(node) {
                    self.visit(child)?;
                }
                Ok(())
            }
        }
    }

    /// Drop inline `type` specifiers from `export {...}`, and the whole
    /// statement when only those were listed.
    fn visit_export(&mut self, node: Node) -> Result<()> {
        for child in children(node) {
            if child.kind() != "export_clause" {
                self.visit(child)?;
                continue;
            }

            let entries: Vec<(Node, bool)> = children(child)
                .into_iter()
                .filter(|spec| spec.kind() == "export_specifier")
                .map(|spec| (spec, !has_type_keyword(&spec)))
                .collect();

            if !entries.is_empty() && entries.iter().all(|(_, kept)| !kept) {
                self.edits.remove_statement(node);
                return Ok(());
            }
            self.edits.remove_list_entries(&entries);
        }
        Ok(())
    }

    fn check_import(&self, node: Node) -> Result<()> {
        for child in children(node) {
            if child.kind() == "import_require_clause" {
                return Err(self.unsupported(&child, "import = require()"));
            }
        }
        Ok(())
    }

    fn unsupported(&self, node: &Node, construct: &str) -> Error {
        crate::log_status!(
            "transpile",
            "{}: unsupported {} at byte {}",
            self.name,
            construct,
            node.start_byte()
        );
        Error::template_unsupported_syntax(self.name, construct, position_of(node))
    }
}

fn children<'tree>(node: Node<'tree>) -> Vec<Node<'tree>> {
    node.children(&mut node.walk()).collect()
}

/// `export type {...}`, `export interface ...` and friends.
fn exports_only_types(node: &Node) -> bool {
    if let Some(declaration) = node.child_by_field_name("declaration") {
        return matches!(
            declaration.kind(),
            "interface_declaration" | "type_alias_declaration" | "function_signature"
        );
    }
    has_type_keyword(node)
}

/// `import type ...`, `export type ...` or an inline `type` specifier.
fn has_type_keyword(node: &Node) -> bool {
    children(*node)
        .iter()
        .any(|child| !child.is_named() && child.kind() == "type")
}

fn is_this_parameter(param: &Node) -> bool {
    param.kind() == "required_parameter"
        && param
            .child_by_field_name("pattern")
            .is_some_and(|pattern| pattern.kind() == "this")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(source: &str) -> String {
        transpile(source, Dialect::TypeScript, "test.ts").unwrap()
    }

    fn strip_tsx(source: &str) -> String {
        transpile(source, Dialect::Tsx, "test.tsx").unwrap()
    }

    #[test]
    fn removes_variable_and_parameter_annotations() {
        let out = strip("const total: number = add(1, 2);\nfunction add(a: number, b: number): number {\n  return a + b;\n}\n");
        assert_eq!(
            out,
            "const total = add(1, 2);\nfunction add(a, b) {\n  return a + b;\n}\n"
        );
    }

    #[test]
    fn removes_spaced_return_type() {
        let out = strip("async function load() : Promise<State> {\n  return {};\n}\n");
        assert_eq!(out, "async function load() {\n  return {};\n}\n");
    }

    #[test]
    fn removes_interface_with_its_doc_comment() {
        let out = strip(
            "import {extend} from 'x';\n\n/** Shape of the data */\ninterface Payload {\n  a: 'b';\n}\n\nextend('p', () => {});\n",
        );
        assert!(!out.contains("interface"));
        assert!(!out.contains("Shape of the data"));
        assert!(out.contains("extend('p', () => {});"));
    }

    #[test]
    fn keeps_inner_expression_of_assertions() {
        let out = strip("const state = storage.initialData as State;\nconst el = find()!;\n");
        assert_eq!(out, "const state = storage.initialData;\nconst el = find();\n");
    }

    #[test]
    fn removes_type_arguments_from_calls() {
        let out = strip("const input = useInput<\n  'Checkout::Render'\n>();\n");
        assert_eq!(out, "const input = useInput();\n");
    }

    #[test]
    fn removes_optional_markers() {
        let out = strip("function f(a?: string) {\n  return a;\n}\n");
        assert_eq!(out, "function f(a) {\n  return a;\n}\n");
    }

    #[test]
    fn elides_type_only_imports() {
        let out = strip_tsx(
            "import React from 'react';\nimport {\n  render,\n  Text,\n  InputProps,\n} from 'ui';\n\nrender('x', (props: InputProps) => <Text>hi</Text>);\n",
        );
        assert!(out.contains("import React from 'react';"));
        assert!(out.contains("  render,\n  Text,\n} from 'ui';"));
        assert!(!out.contains("InputProps"));
    }

    #[test]
    fn removes_import_type_statements() {
        let out = strip("import type {Props} from 'ui';\nimport {run} from 'ui';\nrun();\n");
        assert_eq!(out, "import {run} from 'ui';\nrun();\n");
    }

    #[test]
    fn keeps_side_effect_imports() {
        let out = strip("import './polyfill';\n");
        assert_eq!(out, "import './polyfill';\n");
    }

    #[test]
    fn destructured_parameter_type_is_removed() {
        let out = strip_tsx(
            "function App({extensionPoint}: {extensionPoint: string}) {\n  return <Text>{extensionPoint}</Text>;\n}\n",
        );
        assert_eq!(
            out,
            "function App({extensionPoint}) {\n  return <Text>{extensionPoint}</Text>;\n}\n"
        );
    }

    #[test]
    fn rejects_enums() {
        let err = transpile("enum Color { Red }\n", Dialect::TypeScript, "test.ts").unwrap_err();
        assert_eq!(err.code.as_str(), "template.unsupported_syntax");
        assert_eq!(err.details["position"]["line"], 1);
    }

    #[test]
    fn rejects_parameter_properties() {
        let err = transpile(
            "class A {\n  constructor(private x: number) {}\n}\n",
            Dialect::TypeScript,
            "test.ts",
        )
        .unwrap_err();
        assert_eq!(err.details["construct"], "parameter property");
    }

    #[test]
    fn reports_parse_errors_with_position() {
        let err = transpile("const = ;\n", Dialect::TypeScript, "broken.ts").unwrap_err();
        assert_eq!(err.code.as_str(), "template.parse_failed");
        assert_eq!(err.details["source"], "broken.ts");
    }

    #[test]
    fn removes_this_parameter_with_its_comma() {
        assert_eq!(
            strip("function f(this: Window, a: number) {}\n"),
            "function f(a) {}\n"
        );
        assert_eq!(
            strip("function g(this: Window) {\n  return this;\n}\n"),
            "function g() {\n  return this;\n}\n"
        );
    }

    #[test]
    fn drops_inline_type_export_specifiers() {
        let out = strip("import {A, b} from 'm';\nexport {type A, b};\n");
        assert_eq!(out, "import {b} from 'm';\nexport {b};\n");
    }

    #[test]
    fn removes_export_listing_only_types() {
        let out = strip("import {A} from 'm';\nexport {type A};\nexport const x = 1;\n");
        assert_eq!(out, "export const x = 1;\n");
    }

    #[test]
    fn strips_class_member_modifiers() {
        let out = strip("class Store {\n  private readonly items: string[] = [];\n  public size(): number {\n    return this.items.length;\n  }\n}\n");
        assert_eq!(
            out,
            "class Store {\n  items = [];\n  size() {\n    return this.items.length;\n  }\n}\n"
        );
    }
}
