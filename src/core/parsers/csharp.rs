//! C# declaration parser using tree-sitter.
//!
//! Enumerates the named type declarations of a source file together with
//! their namespace, containing type and byte span, and finds the type
//! declaration enclosing a reported location.

use std::ops::Range;

use anyhow::{Context, Result, anyhow};
use tree_sitter::{Node, Parser, Tree};

use super::preprocessor::active_source;
use crate::core::{SourceContext, SourceLocation, TypeKind};

/// A type declaration found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclarationSyntax {
    pub kind: TypeKind,
    /// Identifier text without a leading `@`.
    pub identifier: String,
    /// Location of the identifier token.
    pub identifier_context: SourceContext,
    /// Enclosing namespace (`""` for the global namespace).
    pub namespace: String,
    /// Index of the containing type declaration, for nested types.
    pub parent: Option<usize>,
    /// Byte span of the declaration node, attributes and modifiers included.
    pub span: Range<usize>,
}

/// Parsed source file and its type declarations.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub file_path: String,
    pub declarations: Vec<TypeDeclarationSyntax>,
    source: String,
    line_starts: Vec<usize>,
    tree: Tree,
}

impl SyntaxTree {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Namespace, containing types and identifier joined with `.`.
    pub fn qualified_name(&self, index: usize) -> String {
        let mut parts = Vec::new();
        let mut current = Some(index);
        while let Some(i) = current {
            let decl = &self.declarations[i];
            parts.push(decl.identifier.as_str());
            current = decl.parent;
        }
        let namespace = &self.declarations[index].namespace;
        if !namespace.is_empty() {
            parts.push(namespace.as_str());
        }
        parts.reverse();
        parts.join(".")
    }

    /// Innermost class/struct/interface/record declaration containing the
    /// given 1-based line and column.
    pub fn find_enclosing_type_declaration(
        &self,
        line: usize,
        col: usize,
    ) -> Option<&TypeDeclarationSyntax> {
        let offset = self.offset_of(line, col)?;
        let mut node = self
            .tree
            .root_node()
            .descendant_for_byte_range(offset, offset)?;

        loop {
            if type_kind(node.kind()).is_some_and(TypeKind::is_type_declaration) {
                let span = node.byte_range();
                return self.declarations.iter().find(|d| d.span == span);
            }
            node = node.parent()?;
        }
    }

    fn offset_of(&self, line: usize, col: usize) -> Option<usize> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(line)
            .copied()
            .unwrap_or(self.source.len());
        let text = &self.source[start..end];
        let within = text
            .char_indices()
            .nth(col.saturating_sub(1))
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        Some(start + within)
    }

    fn context_at(&self, offset: usize) -> SourceContext {
        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let start = self.line_starts[line_index];
        let end = self
            .line_starts
            .get(line_index + 1)
            .copied()
            .unwrap_or(self.source.len());
        let col = self.source[start..offset].chars().count() + 1;
        let source_line = self.source[start..end].trim_end_matches(['\n', '\r']);
        SourceContext::new(
            SourceLocation::new(&self.file_path, line_index + 1, col),
            source_line,
        )
    }

    /// Walk `node`'s children, recording type declarations in source order.
    fn collect_declarations(
        &self,
        node: Node<'_>,
        namespace: &str,
        parent: Option<usize>,
        out: &mut Vec<TypeDeclarationSyntax>,
    ) {
        // A file-scoped namespace applies to the declarations after it.
        let mut namespace = namespace.to_string();
        let mut cursor = node.walk();

        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "namespace_declaration" => {
                    let nested = self.join_namespace(&namespace, child);
                    self.collect_declarations(child, &nested, parent, out);
                }
                "file_scoped_namespace_declaration" => {
                    namespace = self.join_namespace(&namespace, child);
                    self.collect_declarations(child, &namespace, parent, out);
                }
                kind => match (type_kind(kind), child.child_by_field_name("name")) {
                    (Some(kind), Some(name)) => {
                        let identifier = self.source[name.byte_range()].trim_start_matches('@');
                        out.push(TypeDeclarationSyntax {
                            kind,
                            identifier: identifier.to_string(),
                            identifier_context: self.context_at(name.start_byte()),
                            namespace: namespace.clone(),
                            parent,
                            span: child.byte_range(),
                        });
                        let index = out.len() - 1;
                        self.collect_declarations(child, &namespace, Some(index), out);
                    }
                    _ => self.collect_declarations(child, &namespace, parent, out),
                },
            }
        }
    }

    fn join_namespace(&self, outer: &str, declaration: Node<'_>) -> String {
        let name = declaration
            .child_by_field_name("name")
            .map(|n| &self.source[n.byte_range()])
            .unwrap_or_default();
        let name: String = name.split_whitespace().collect();
        match (outer.is_empty(), name.is_empty()) {
            (_, true) => outer.to_string(),
            (true, false) => name,
            (false, false) => format!("{}.{}", outer, name),
        }
    }
}

fn type_kind(node_kind: &str) -> Option<TypeKind> {
    match node_kind {
        "class_declaration" => Some(TypeKind::Class),
        "struct_declaration" => Some(TypeKind::Struct),
        "interface_declaration" => Some(TypeKind::Interface),
        "record_declaration" | "record_struct_declaration" => Some(TypeKind::Record),
        "enum_declaration" => Some(TypeKind::Enum),
        "delegate_declaration" => Some(TypeKind::Delegate),
        _ => None,
    }
}

/// Parse C# source text with no conditional compilation symbols defined.
pub fn parse_csharp_source(code: String, file_path: &str) -> Result<SyntaxTree> {
    parse_csharp_source_with_symbols(code, file_path, &[])
}

/// Parse C# source text and collect its type declarations.
///
/// Conditional sections are resolved with `symbols` first, so only the
/// active branch of an `#if` is parsed. Syntax errors do not fail the parse;
/// declarations tree-sitter recovers are still reported.
pub fn parse_csharp_source_with_symbols(
    code: String,
    file_path: &str,
    symbols: &[String],
) -> Result<SyntaxTree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
        .context("Failed to load the C# grammar")?;

    let active = active_source(&code, symbols);
    let tree = parser
        .parse(&active, None)
        .ok_or_else(|| anyhow!("Failed to parse {}", file_path))?;

    let line_starts = std::iter::once(0)
        .chain(code.match_indices('\n').map(|(i, _)| i + 1))
        .collect();

    let mut syntax_tree = SyntaxTree {
        file_path: file_path.to_string(),
        declarations: Vec::new(),
        source: code,
        line_starts,
        tree,
    };

    let mut declarations = Vec::new();
    syntax_tree.collect_declarations(syntax_tree.tree.root_node(), "", None, &mut declarations);
    syntax_tree.declarations = declarations;

    Ok(syntax_tree)
}
