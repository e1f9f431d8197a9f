//! Go extractor using native tree-sitter.
//!
//! Extracts grouped `const` declarations (with their attached comments),
//! bare integer literals, top-level functions and package-level variables.

use std::path::Path;

use constgov_core::errors::ParseError;
use tree_sitter::{Node, Parser, Tree};

use super::error_tolerant::{count_errors, first_error};
use super::literals::{comment_lines, parse_go_int, see_tag};
use super::traits::DeclarationExtractor;
use super::types::{
    AttachedComment, ConstantDefinition, ConstantValue, FileFacts, FunctionDecl, NumericLiteral,
    VariableDecl,
};

/// Literal kinds that make a constant non-integer; such constants are skipped.
const NON_INTEGER_KINDS: &[&str] = &[
    "interpreted_string_literal",
    "raw_string_literal",
    "rune_literal",
    "float_literal",
    "imaginary_literal",
    "true",
    "false",
    "nil",
];

/// Go extractor. Stateless: a fresh tree-sitter parser is built per file.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoExtractor;

impl GoExtractor {
    pub fn new() -> Self {
        Self
    }

    fn parse_tree(&self, source: &str, path: &Path) -> Result<Tree, ParseError> {
        let language: tree_sitter::Language = tree_sitter_go::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| ParseError::GrammarNotFound {
                language: "go".to_string(),
                message: e.to_string(),
            })?;
        parser.parse(source, None).ok_or_else(|| ParseError::NoTree {
            path: path.to_path_buf(),
        })
    }
}

impl DeclarationExtractor for GoExtractor {
    fn language(&self) -> &'static str {
        "go"
    }

    fn extensions(&self) -> &[&str] {
        &["go"]
    }

    fn extract(&self, source: &str, path: &Path, display_path: &str) -> Result<FileFacts, ParseError> {
        let tree = self.parse_tree(source, path)?;
        let root = tree.root_node();

        if let Some(error) = first_error(root) {
            tracing::debug!(
                path = %path.display(),
                errors = count_errors(root),
                "syntax errors in file"
            );
            return Err(ParseError::Syntax {
                path: path.to_path_buf(),
                line: error.start_position().row as u32 + 1,
                column: error.start_position().column as u32 + 1,
            });
        }

        let src = source.as_bytes();
        let lines: Vec<&str> = source.lines().collect();
        let mut facts = FileFacts {
            path: display_path.to_string(),
            package: package_name(root, src),
            ..Default::default()
        };

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "function_declaration" | "method_declaration" => {
                    extract_function(child, src, &mut facts)
                }
                "var_declaration" => extract_variables(child, src, &mut facts),
                _ => {}
            }
        }

        walk(root, src, &lines, false, &mut facts);
        facts.literals.sort_by_key(|l| (l.line, l.column));

        Ok(facts)
    }
}

fn node_text<'a>(node: Node, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

fn package_name(root: Node, src: &[u8]) -> String {
    let mut cursor = root.walk();
    let clause = root
        .named_children(&mut cursor)
        .find(|n| n.kind() == "package_clause");
    let Some(clause) = clause else {
        return String::new();
    };
    let mut inner = clause.walk();
    let ident = clause
        .named_children(&mut inner)
        .find(|n| n.kind() == "package_identifier");
    ident.map(|n| node_text(n, src).to_string()).unwrap_or_default()
}

/// Depth-first walk collecting const groups (at any depth) and integer
/// literals outside const declarations.
fn walk(node: Node, src: &[u8], lines: &[&str], in_const: bool, facts: &mut FileFacts) {
    let in_const = in_const || node.kind() == "const_declaration";
    if node.kind() == "const_declaration" {
        extract_const_group(node, src, facts);
    }
    if node.kind() == "int_literal" && !in_const {
        if let Some(literal) = literal_fact(node, src, lines, &facts.path) {
            facts.literals.push(literal);
        }
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        walk(child, src, lines, in_const, facts);
    }
}

fn literal_fact(node: Node, src: &[u8], lines: &[&str], file: &str) -> Option<NumericLiteral> {
    let mut value = parse_go_int(node_text(node, src))?;
    let mut anchor = node;

    if let Some(parent) = node.parent() {
        match parent.kind() {
            "index_expression" => {
                if parent.child_by_field_name("index") == Some(node) {
                    return None;
                }
            }
            "unary_expression" => {
                let operator = parent
                    .child_by_field_name("operator")
                    .map(|op| node_text(op, src));
                if operator == Some("-") {
                    value = value.checked_neg()?;
                    anchor = parent;
                }
            }
            _ => {}
        }
    }

    let position = anchor.start_position();
    Some(NumericLiteral {
        value,
        file: file.to_string(),
        line: position.row as u32 + 1,
        column: position.column as u32 + 1,
        context: lines
            .get(position.row)
            .map(|l| l.trim().to_string())
            .unwrap_or_default(),
    })
}

enum ValueClass {
    Int(i64),
    NonInteger,
    Unparsed(String),
}

fn classify_value(expr: Node, src: &[u8]) -> ValueClass {
    let text = node_text(expr, src).trim();
    match expr.kind() {
        "int_literal" => match parse_go_int(text) {
            Some(v) => ValueClass::Int(v),
            None => ValueClass::Unparsed(text.to_string()),
        },
        "parenthesized_expression" => {
            let mut cursor = expr.walk();
            let inner = expr
                .named_children(&mut cursor)
                .find(|n| n.kind() != "comment");
            match inner {
                Some(inner) => classify_value(inner, src),
                None => ValueClass::Unparsed(text.to_string()),
            }
        }
        "unary_expression" => {
            let operator = expr
                .child_by_field_name("operator")
                .map(|op| node_text(op, src));
            let operand = expr.child_by_field_name("operand");
            match (operator, operand) {
                (Some(op @ ("-" | "+")), Some(operand)) => match classify_value(operand, src) {
                    ValueClass::Int(v) if op == "-" => v
                        .checked_neg()
                        .map(ValueClass::Int)
                        .unwrap_or_else(|| ValueClass::Unparsed(text.to_string())),
                    ValueClass::Int(v) => ValueClass::Int(v),
                    ValueClass::NonInteger => ValueClass::NonInteger,
                    ValueClass::Unparsed(_) => ValueClass::Unparsed(text.to_string()),
                },
                _ => ValueClass::Unparsed(text.to_string()),
            }
        }
        kind if NON_INTEGER_KINDS.contains(&kind) => ValueClass::NonInteger,
        _ if text.contains('"') || text.contains('`') || text.contains('\'') => {
            ValueClass::NonInteger
        }
        _ => ValueClass::Unparsed(text.to_string()),
    }
}

fn extract_const_group(decl: Node, src: &[u8], facts: &mut FileFacts) {
    let open_row = open_paren_row(decl);
    let mut group_doc = leading_comments(decl, src, None);
    let decl_trailing = trailing_comment(decl, src);

    let mut cursor = decl.walk();
    group_doc.extend(
        decl.named_children(&mut cursor)
            .filter(|n| n.kind() == "comment" && Some(n.start_position().row) == open_row)
            .flat_map(|c| comment_lines(node_text(c, src))),
    );

    let specs: Vec<Node> = decl
        .named_children(&mut cursor)
        .filter(|n| n.kind() == "const_spec")
        .collect();

    // Go repeats the previous expression list for specs without values.
    let mut last_values: Vec<Node> = Vec::new();

    for spec in specs {
        let mut name_cursor = spec.walk();
        let names: Vec<Node> = spec
            .children_by_field_name("name", &mut name_cursor)
            .filter(|n| n.kind() == "identifier")
            .collect();

        let values = spec_values(spec);
        let explicit = !values.is_empty();
        if explicit {
            last_values = values.clone();
        }
        let source_values = if explicit { &values } else { &last_values };

        let doc = leading_comments(spec, src, open_row);
        let trailing = trailing_comment(spec, src).or_else(|| {
            (spec.end_position().row == decl.end_position().row)
                .then(|| decl_trailing.clone())
                .flatten()
        });
        let comment = AttachedComment {
            group_doc: group_doc.clone(),
            doc,
            trailing,
        };
        let reference_tag = see_tag(&comment.lines());

        for (index, name_node) in names.iter().enumerate() {
            let name = node_text(*name_node, src);
            if name == "_" || name.is_empty() {
                continue;
            }
            let value = match source_values.get(index) {
                Some(expr) => match classify_value(*expr, src) {
                    ValueClass::Int(v) => ConstantValue::Int(v),
                    ValueClass::Unparsed(text) => ConstantValue::Unparsed(text),
                    ValueClass::NonInteger => continue,
                },
                None => ConstantValue::Unparsed("<implicit>".to_string()),
            };
            facts.constants.push(ConstantDefinition {
                name: name.to_string(),
                value,
                file: facts.path.clone(),
                line: name_node.start_position().row as u32 + 1,
                package: facts.package.clone(),
                comment: comment.clone(),
                reference_tag: reference_tag.clone(),
            });
        }
    }
}

fn spec_values(spec: Node) -> Vec<Node> {
    let Some(value) = spec.child_by_field_name("value") else {
        return Vec::new();
    };
    if value.kind() == "expression_list" {
        let mut cursor = value.walk();
        value
            .named_children(&mut cursor)
            .filter(|n| n.kind() != "comment")
            .collect()
    } else {
        vec![value]
    }
}

/// Comment lines directly above `node`, stopping at blank lines, code, a
/// comment that trails an earlier statement on its own line, or `stop_row`.
fn leading_comments(node: Node, src: &[u8], stop_row: Option<usize>) -> Vec<String> {
    let mut blocks: Vec<Vec<String>> = Vec::new();
    let mut anchor_row = node.start_position().row;
    let mut current = node.prev_named_sibling();

    while let Some(prev) = current {
        if prev.kind() != "comment"
            || prev.end_position().row + 1 != anchor_row
            || Some(prev.start_position().row) == stop_row
        {
            break;
        }
        if let Some(before) = prev.prev_named_sibling() {
            if before.kind() != "comment" && before.end_position().row == prev.start_position().row {
                break;
            }
        }
        blocks.push(comment_lines(node_text(prev, src)));
        anchor_row = prev.start_position().row;
        current = prev.prev_named_sibling();
    }

    blocks.into_iter().rev().flatten().collect()
}

/// Row of the `(` opening a grouped declaration.
fn open_paren_row(decl: Node) -> Option<usize> {
    let mut cursor = decl.walk();
    let paren = decl.children(&mut cursor).find(|n| n.kind() == "(");
    paren.map(|n| n.start_position().row)
}

/// Comment starting on the row where `node` ends.
fn trailing_comment(node: Node, src: &[u8]) -> Option<String> {
    let end_row = node.end_position().row;

    if let Some(next) = node.next_named_sibling() {
        if next.kind() == "comment" && next.start_position().row == end_row {
            return Some(comment_lines(node_text(next, src)).join(" "));
        }
    }

    let mut cursor = node.walk();
    let inner = node
        .named_children(&mut cursor)
        .filter(|n| n.kind() == "comment" && n.start_position().row == end_row)
        .last();
    inner.map(|c| comment_lines(node_text(c, src)).join(" "))
}

fn extract_function(node: Node, src: &[u8], facts: &mut FileFacts) {
    let Some(name) = node.child_by_field_name("name") else {
        return;
    };
    let result = node
        .child_by_field_name("result")
        .map(|r| node_text(r, src).trim().to_string());
    facts.functions.push(FunctionDecl {
        name: node_text(name, src).to_string(),
        file: facts.path.clone(),
        line: name.start_position().row as u32 + 1,
        result,
    });
}

fn extract_variables(decl: Node, src: &[u8], facts: &mut FileFacts) {
    let mut specs = Vec::new();
    collect_var_specs(decl, &mut specs);
    for spec in specs {
        let mut cursor = spec.walk();
        let names = spec
            .children_by_field_name("name", &mut cursor)
            .filter(|n| n.kind() == "identifier");
        for name in names {
            let text = node_text(name, src);
            if text == "_" {
                continue;
            }
            facts.variables.push(VariableDecl {
                name: text.to_string(),
                file: facts.path.clone(),
                line: name.start_position().row as u32 + 1,
            });
        }
    }
}

fn collect_var_specs<'tree>(node: Node<'tree>, out: &mut Vec<Node<'tree>>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "var_spec" => out.push(child),
            "var_spec_list" => collect_var_specs(child, out),
            _ => {}
        }
    }
}
