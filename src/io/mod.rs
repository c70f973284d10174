/*!
# IO

Utilities for reading graphs in the line-oriented text notation.

```text
u <id> [<weight>];
h <id1> <op> <id2> [<weight>] [:<label>];    op is one of  <-  ->  <  >  -
# comment
```

Reading never builds a [`Graph`](crate::repr::Graph) itself: it produces a [`ParsedGraph`]
holding the raw declarations, the binary-tree flag, and all recoverable [`Diagnostics`].
Only an edge line without any operator aborts reading with a [`ParseError`].

## Traits

[`GraphReader`] is implemented by readers for a specific format; [`TextReader`] is the
only one provided and can be configured using the *Builder* pattern.
*/

pub mod text;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use thiserror::Error;

use crate::{diagnostics::Diagnostics, edge::Edge, node::Node};

pub use text::*;

/// Fatal errors aborting the parse of a whole input
#[derive(Debug, Error)]
pub enum ParseError {
    /// An edge line contains none of the edge operators
    #[error("line {line}: no edge operator (<-, ->, <, >, -) found in `{content}`")]
    MissingOperator { line: usize, content: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Raw declarations read from an input
#[derive(Debug, Clone, Default)]
pub struct ParsedGraph {
    /// All node declarations in input order, placeholders included
    pub nodes: Vec<Node>,
    /// All edge declarations in input order
    pub edges: Vec<Edge>,
    /// *true* iff the input contains no edge lines
    pub is_binary_tree: bool,
    /// Recoverable problems encountered while reading
    pub diagnostics: Diagnostics,
}

/// Trait for types that can read graph declarations in a specific format.
///
/// This trait provides a low-level method to read from any [`BufRead`] instance
/// and convenience wrappers to read directly from files or strings.
pub trait GraphReader {
    /// Reads declarations from the given reader according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if reading fails or the input contains a fatal format error.
    fn try_read_graph<R>(&self, reader: R) -> Result<ParsedGraph, ParseError>
    where
        R: BufRead;

    /// Reads declarations from a file according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its contents are invalid.
    fn try_read_graph_file<P>(&self, path: P) -> Result<ParsedGraph, ParseError>
    where
        P: AsRef<Path>,
    {
        self.try_read_graph(BufReader::new(File::open(path)?))
    }

    /// Reads declarations from an in-memory string.
    ///
    /// # Errors
    /// Returns an error if the contents are invalid.
    fn try_read_graph_str(&self, content: &str) -> Result<ParsedGraph, ParseError> {
        self.try_read_graph(content.as_bytes())
    }
}
