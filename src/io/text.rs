//! # Text notation
//!
//! Each non-comment line holds a single declaration terminated by `;`:
//! - `u <id> [<weight>];` declares a node. The identifier `*` declares a placeholder.
//! - `h <id1> <op> <id2> [<weight>] [:<label>];` declares an edge. Weight and label are
//!   optional and may appear in any order.
//!
//! Operators are matched in the order of [`EDGE_OPERATORS`]; the first operator contained
//! in the line splits it into both endpoints.

use std::io::BufRead;

use smallvec::SmallVec;
use tracing::debug;

use super::*;
use crate::{diagnostics::DiagnosticKind, edge::*, node::*};

/// Directive starting a node line
const NODE_DIRECTIVE: &str = "u";

/// Directive starting an edge line
const EDGE_DIRECTIVE: &str = "h";

/// Declaration terminator
const TERMINATOR: char = ';';

/// A GraphReader for the text notation
#[derive(Debug, Clone)]
pub struct TextReader {
    /// Lines starting with `comment_identifier` are skipped when reading;
    /// an empty identifier disables comments
    comment_identifier: String,
}

impl Default for TextReader {
    fn default() -> Self {
        Self {
            comment_identifier: "#".to_string(),
        }
    }
}

impl TextReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the comment identifier. An empty identifier disables comments.
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> TextReader {
        self.comment_identifier = c.into();
        self
    }

    fn is_comment(&self, line: &str) -> bool {
        !self.comment_identifier.is_empty() && line.starts_with(&self.comment_identifier)
    }
}

impl GraphReader for TextReader {
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<ParsedGraph, ParseError> {
        let mut parser = LineParser::default();
        let mut edge_lines = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            let line_num = index + 1;

            if line.is_empty() || self.is_comment(line) {
                continue;
            }

            let (directive, rest) = line
                .split_once(char::is_whitespace)
                .unwrap_or((line, ""));

            match directive {
                NODE_DIRECTIVE => parser.parse_node(line_num, rest),
                EDGE_DIRECTIVE => {
                    edge_lines += 1;
                    parser.parse_edge(line_num, rest)?;
                }
                _ => parser.diagnostics.push(
                    DiagnosticKind::UnknownDirective,
                    Some(line_num),
                    format!("unknown directive `{directive}` in `{line}`"),
                ),
            }
        }

        debug!(
            nodes = parser.nodes.len(),
            edges = parser.edges.len(),
            warnings = parser.diagnostics.len(),
            "parsed graph declarations"
        );

        Ok(ParsedGraph {
            nodes: parser.nodes,
            edges: parser.edges,
            is_binary_tree: edge_lines == 0,
            diagnostics: parser.diagnostics,
        })
    }
}

/// Accumulates declarations line by line
#[derive(Default)]
struct LineParser {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    diagnostics: Diagnostics,
}

impl LineParser {
    /// Strips the terminator, recording a warning if it is missing
    fn strip_terminator<'a>(&mut self, line_num: usize, content: &'a str) -> &'a str {
        let content = content.trim();
        match content.strip_suffix(TERMINATOR) {
            Some(stripped) => stripped.trim(),
            None => {
                self.diagnostics.push(
                    DiagnosticKind::MissingTerminator,
                    Some(line_num),
                    format!("declaration `{content}` is not terminated by `{TERMINATOR}`"),
                );
                content
            }
        }
    }

    /// Parses a weight token, recording a warning if it is not a number
    fn parse_weight(&mut self, line_num: usize, token: &str) -> Option<Weight> {
        match token.parse::<Weight>() {
            Ok(weight) => Some(weight),
            Err(_) => {
                self.diagnostics.push(
                    DiagnosticKind::InvalidWeight,
                    Some(line_num),
                    format!("cannot parse weight `{token}`"),
                );
                None
            }
        }
    }

    /// `<id> [<weight>]`
    fn parse_node(&mut self, line_num: usize, content: &str) {
        let content = self.strip_terminator(line_num, content);

        let (identifier, weight) = content
            .split_once(char::is_whitespace)
            .map_or((content, ""), |(id, w)| (id, w.trim()));

        if identifier.is_empty() {
            self.diagnostics.push(
                DiagnosticKind::MalformedLine,
                Some(line_num),
                "node declaration without identifier",
            );
            return;
        }

        let weight = if weight.is_empty() {
            None
        } else {
            self.parse_weight(line_num, weight)
        };

        self.nodes.push(Node::new(identifier).with_weight(weight));
    }

    /// `<id1> <op> <id2> [<weight>] [:<label>]`
    fn parse_edge(&mut self, line_num: usize, content: &str) -> Result<(), ParseError> {
        let content = self.strip_terminator(line_num, content);

        let Some((direction, node1, rest)) = EDGE_OPERATORS.iter().find_map(|&op| {
            let (left, right) = content.split_once(op)?;
            Some((EdgeDirection::from_operator(op)?, left.trim(), right.trim()))
        }) else {
            return Err(ParseError::MissingOperator {
                line: line_num,
                content: content.to_string(),
            });
        };

        let tokens: SmallVec<[&str; 4]> = rest.split_whitespace().collect();
        let Some((&node2, attributes)) = tokens.split_first().filter(|_| !node1.is_empty())
        else {
            self.diagnostics.push(
                DiagnosticKind::MalformedLine,
                Some(line_num),
                format!("edge declaration `{content}` is missing an endpoint"),
            );
            return Ok(());
        };

        let mut weight = None;
        let mut label = None;
        for &token in attributes {
            if let Some(l) = token.strip_prefix(':') {
                label = (!l.is_empty()).then(|| l.to_string());
            } else if let Some(w) = self.parse_weight(line_num, token) {
                weight = Some(w);
            }
        }

        self.edges.push(
            Edge::new(node1, node2, direction)
                .with_weight(weight)
                .with_label(label),
        );

        Ok(())
    }
}
