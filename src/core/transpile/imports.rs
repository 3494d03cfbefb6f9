//! Import elision.
//!
//! Once types are erased, an imported binding that is no longer referenced
//! as a value must go too, otherwise the module would import names that
//! only exist at the type level.

use std::collections::HashSet;

use tree_sitter::Node;

use super::{children, has_type_keyword};
use super::edits::Edits;

/// Default import kept alive by JSX even when never named in the source.
const JSX_FACTORY: &str = "React";

pub(super) fn elide_unused(root: Node, source: &str, edits: &mut Edits) {
    let mut usage = Usage::default();
    usage.collect(root, source, edits);

    for statement in children(root) {
        if statement.kind() == "import_statement" {
            elide_statement(statement, source, &usage, edits);
        }
    }
}

#[derive(Default)]
struct Usage {
    names: HashSet<String>,
    has_jsx: bool,
}

impl Usage {
    fn collect(&mut self, node: Node, source: &str, edits: &Edits) {
        if node.kind() == "import_statement" || edits.covers(&node) {
            return;
        }

        match node.kind() {
            "identifier" | "shorthand_property_identifier" => {
                if let Ok(text) = node.utf8_text(source.as_bytes()) {
                    self.names.insert(text.to_string());
                }
            }
            "jsx_element" | "jsx_self_closing_element" => self.has_jsx = true,
            _ => {}
        }

        for child in children(node) {
            self.collect(child, source, edits);
        }
    }

    fn is_used(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

fn elide_statement(statement: Node, source: &str, usage: &Usage, edits: &mut Edits) {
    if has_type_keyword(&statement) {
        edits.remove_statement(statement);
        return;
    }

    // Side-effect imports (`import './x'`) have no clause.
    let Some(clause) = children(statement)
        .into_iter()
        .find(|child| child.kind() == "import_clause")
    else {
        return;
    };

    let text = |node: &Node| node.utf8_text(source.as_bytes()).unwrap_or_default().to_string();

    let mut default_import = None;
    let mut namespace = None;
    let mut named = None;
    for child in children(clause) {
        match child.kind() {
            "identifier" => default_import = Some(child),
            "namespace_import" => namespace = Some(child),
            "named_imports" => named = Some(child),
            _ => {}
        }
    }

    let default_kept = default_import.map(|node| {
        let name = text(&node);
        usage.is_used(&name) || (usage.has_jsx && name == JSX_FACTORY)
    });
    let namespace_kept = namespace.map(|node| {
        node.named_child(0)
            .map(|alias| usage.is_used(&text(&alias)))
            .unwrap_or(false)
    });

    let specifiers: Vec<(Node, bool)> = named
        .map(|list| {
            children(list)
                .into_iter()
                .filter(|child| child.kind() == "import_specifier")
                .map(|spec| {
                    let kept = !has_type_keyword(&spec) && usage.is_used(&text(&local_name(&spec)));
                    (spec, kept)
                })
                .collect()
        })
        .unwrap_or_default();

    let any_binding = default_import.is_some() || namespace.is_some() || !specifiers.is_empty();
    let named_kept = specifiers.iter().any(|(_, kept)| *kept);
    let anything_kept =
        default_kept.unwrap_or(false) || namespace_kept.unwrap_or(false) || named_kept;

    if any_binding && !anything_kept {
        edits.remove_statement(statement);
        return;
    }

    // Default binding dropped: cut it along with the comma that follows.
    if let (Some(default_node), Some(false)) = (default_import, default_kept) {
        if let Some(next) = named.or(namespace) {
            edits.remove_span(default_node.start_byte()..next.start_byte());
        }
    }

    if let (Some(ns), Some(false)) = (namespace, namespace_kept) {
        if let Some(default_node) = default_import {
            edits.remove_span(default_node.end_byte()..ns.end_byte());
        }
    }

    let Some(list) = named else {
        return;
    };

    if !named_kept {
        if let Some(default_node) = default_import {
            edits.remove_span(default_node.end_byte()..list.end_byte());
        }
        return;
    }

    edits.remove_list_entries(&specifiers);
}

fn local_name<'tree>(spec: &Node<'tree>) -> Node<'tree> {
    spec.child_by_field_name("alias")
        .or_else(|| spec.child_by_field_name("name"))
        .unwrap_or(*spec)
}
