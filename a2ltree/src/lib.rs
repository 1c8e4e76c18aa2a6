//! a2ltree is a grammar-driven parser for a2l files.
//!
//! Every block and keyword of the ASAP2 standard is described by a static [`grammar::NodeSchema`].
//! The parser reads a file into a generic tree of nodes following these schemas; there is no
//! dedicated type per a2l element.
//!
//! The content of `IF_DATA` blocks is interpreted with the declarations of the `A2ML` block of the
//! enclosing `MODULE`, or with a built-in A2ML specification that is passed to the parser.
//! Vendor data that is not declared anywhere is kept unparsed, and is written back unchanged.

mod a2ml;
mod behavior;
mod blockparser;
pub mod grammar;
mod ifdata;
mod index;
mod loader;
mod node;
mod parser;
mod specification;
mod tokenizer;
mod writer;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use parser::ParserState;

// re-export for the crate user
pub use a2ml::{A2mlEnumItem, A2mlError, A2mlKind, A2mlMember, A2mlRegistry, A2mlTagged, A2mlType, parse_a2ml};
pub use behavior::{DefaultBehavior, NodeBehavior, NodeConstructor, NodeOverrides};
pub use ifdata::{A2mlTaggedValue, A2mlValue, IfDataContent};
pub use index::NodeIndex;
pub use node::{A2lTree, A2mlSource, Dump, IntValue, NodeId, NodeRef, Value};
pub use parser::ParserError;
pub use tokenizer::{A2lToken, A2lTokenType, TokenizerError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum A2lError {
    /// `FileOpenError`: An `IoError` that occurred while loading a file
    #[error("Failed to load {filename}: {ioerror}")]
    FileOpenError {
        filename: PathBuf,
        ioerror: std::io::Error,
    },

    /// `FileReadError`: An `IoError` that occurred while reading from a file
    #[error("Could not read from {filename}: {ioerror}")]
    FileReadError {
        filename: PathBuf,
        ioerror: std::io::Error,
    },

    /// `FileWriteError`: An `IoError` that occurred while writing to a file
    #[error("Could not write to {filename}: {ioerror}")]
    FileWriteError {
        filename: PathBuf,
        ioerror: std::io::Error,
    },

    /// `EmptyFileError`: No `A2lTokens` found in the file
    #[error("File \"{filename}\" contains no a2l data")]
    EmptyFileError { filename: PathBuf },

    /// `InvalidBuiltinA2mlSpec`: Parse error while processing a built-in a2ml specification
    #[error("Failed to load built-in a2ml specification: {a2ml_error}")]
    InvalidBuiltinA2mlSpec { a2ml_error: A2mlError },

    /// `TokenizerError`: Failed to tokenize the input
    #[error("Tokenizer error: {tokenizer_error}")]
    TokenizerError { tokenizer_error: TokenizerError },

    /// `ParserError`: Invalid data, the file could not be parsed.
    /// In the list of log messages this variant wraps the non-fatal warnings of the parser
    #[error("Parser error: {parser_error}")]
    ParserError { parser_error: ParserError },

    /// `UnknownExtension`: warning, there is no A2ML declaration for the tag of an `IF_DATA` block.
    /// The content of the block is kept unparsed
    #[error("{filename}:{line}: no A2ML declaration for IF_DATA {tag}, the content is kept unparsed")]
    UnknownExtension {
        filename: String,
        line: u32,
        tag: String,
    },
}

/// The result of a successful parse: the tree and an index of all its nodes by tag
#[derive(Debug)]
pub struct ParsedA2l {
    pub tree: A2lTree,
    pub lookup: NodeIndex,
}

/// Configurable a2l parser
///
/// ```
/// # use std::sync::Arc;
/// # use a2ltree::{A2lParser, NodeBehavior, NodeRef};
/// #[derive(Debug)]
/// struct MeasurementBehavior;
///
/// impl NodeBehavior for MeasurementBehavior {
///     fn node_name(&self, node: NodeRef<'_>) -> String {
///         format!("measurement {}", node.field("name").and_then(|v| v.as_str()).unwrap_or_default())
///     }
/// }
///
/// let text = r#"
/// /begin PROJECT p ""
///   /begin MODULE m ""
///     /begin MEASUREMENT speed "" UWORD NO_COMPU_METHOD 1 0 0 65535 /end MEASUREMENT
///   /end MODULE
/// /end PROJECT"#;
/// let parser = A2lParser::new()
///     .filename("speed.a2l")
///     .override_node("MEASUREMENT", || Arc::new(MeasurementBehavior));
/// let (a2l, _log_msgs) = parser.parse(text).unwrap();
/// assert_eq!(a2l.get_nodes_by_tag("MEASUREMENT")[0].node_name(), "measurement speed");
/// ```
#[derive(Debug, Default)]
pub struct A2lParser {
    a2ml_spec: Option<String>,
    overrides: NodeOverrides,
    filename: Option<String>,
}

/**
load a2l data stored in a string

`a2ml_spec` is optional and contains a String that is valid A2ML that can be used while parsing the file in addition to the A2ML that might be contained inside the A2ML block in the file.
If a definition is provided here and there is also an A2ML block in the file, then the definition provided here will be tried first during parsing.

The returned `Vec<A2lError>` contains all warnings generated during parsing.

# Example

```rust
# use a2ltree::A2lError;
# fn main() -> Result<(), A2lError> {
let text = r#"
ASAP2_VERSION 1 71
/begin PROJECT new_project ""
  /begin MODULE new_module ""
  /end MODULE
/end PROJECT
"#;
let (a2l, log_msgs) = a2ltree::load_from_string(text, None)?;
let module = a2l.get_nodes_by_tag("MODULE")[0];
assert_eq!(module.field("name").and_then(|v| v.as_str()), Some("new_module"));
assert!(log_msgs.is_empty());
# Ok(())
# }
```

# Errors

An `A2lError` provides details information if loading the data fails.
 */
pub fn load_from_string(
    a2ldata: &str,
    a2ml_spec: Option<String>,
) -> Result<(ParsedA2l, Vec<A2lError>), A2lError> {
    let mut parser = A2lParser::new();
    parser.a2ml_spec = a2ml_spec;
    parser.parse(a2ldata)
}

/**
Load an a2l file

`a2ml_spec` is optional and contains a String that is valid A2ML that can be used while parsing the file in addition to the A2ML that might be contained inside the A2ML block in the file.

# Errors

An `A2lError` provides details information if loading the file fails.
 */
pub fn load<P: AsRef<Path>>(
    path: P,
    a2ml_spec: Option<String>,
) -> Result<(ParsedA2l, Vec<A2lError>), A2lError> {
    let mut parser = A2lParser::new();
    parser.a2ml_spec = a2ml_spec;
    parser.load(path)
}

impl A2lParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A2ML declarations that are used in addition to the A2ML block of the file. They are tried first
    #[must_use]
    pub fn a2ml_spec(mut self, spec: impl Into<String>) -> Self {
        self.a2ml_spec = Some(spec.into());
        self
    }

    /// Attach a custom behavior to every node with the given tag
    #[must_use]
    pub fn override_node<F>(mut self, tag: &str, constructor: F) -> Self
    where
        F: Fn() -> Arc<dyn NodeBehavior> + Send + Sync + 'static,
    {
        self.overrides.insert(tag, constructor);
        self
    }

    /// The name of the input that is shown in error messages
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Parse a2l data stored in a string
    ///
    /// # Errors
    ///
    /// The first error that is encountered ends the parse. The `Vec<A2lError>` in the result contains the warnings.
    pub fn parse(&self, a2ldata: &str) -> Result<(ParsedA2l, Vec<A2lError>), A2lError> {
        let filename = self.filename.clone().unwrap_or_default();
        self.parse_impl(filename, a2ldata)
    }

    /// Load and parse an a2l file
    ///
    /// # Errors
    ///
    /// An `A2lError` if the file cannot be read or its content cannot be parsed.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<(ParsedA2l, Vec<A2lError>), A2lError> {
        let pathref = path.as_ref();
        let filedata = loader::load(pathref)?;
        let filename = self
            .filename
            .clone()
            .unwrap_or_else(|| pathref.to_string_lossy().to_string());
        self.parse_impl(filename, &filedata)
    }

    fn parse_impl(
        &self,
        filename: String,
        filedata: &str,
    ) -> Result<(ParsedA2l, Vec<A2lError>), A2lError> {
        let mut log_msgs = Vec::<A2lError>::new();
        // tokenize the input data
        let tokenresult = tokenizer::tokenize(filename, filedata)
            .map_err(|tokenizer_error| A2lError::TokenizerError { tokenizer_error })?;

        if tokenresult.tokens.is_empty() {
            return Err(A2lError::EmptyFileError {
                filename: PathBuf::from(&tokenresult.filename),
            });
        }

        // create the parser state object
        let mut parser = ParserState::new(&tokenresult, &mut log_msgs, &self.overrides);

        // if a built-in A2ml specification was passed as a string, then it is parsed here
        if let Some(spec) = &self.a2ml_spec {
            let registry = a2ml::parse_a2ml(spec, 1)
                .map_err(|a2ml_error| A2lError::InvalidBuiltinA2mlSpec { a2ml_error })?;
            parser.builtin_a2ml = Some(Arc::new(registry));
        }

        // build the tree from the tokens
        let root = blockparser::parse_file(&mut parser)
            .map_err(|parser_error| A2lError::ParserError { parser_error })?;
        let tree = A2lTree::from_arena(std::mem::take(&mut parser.arena), root);
        let lookup = NodeIndex::build(&tree);

        Ok((ParsedA2l { tree, lookup }, log_msgs))
    }
}

impl ParsedA2l {
    /// All nodes with the given tag, at any depth
    #[must_use]
    pub fn get_nodes_by_tag(&self, tag: &str) -> Vec<NodeRef<'_>> {
        self.lookup
            .get(tag)
            .iter()
            .map(|id| self.tree.node(*id))
            .collect()
    }

    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        self.tree.root()
    }

    /// construct a string containing the whole a2l data
    #[must_use]
    pub fn write_to_string(&self) -> String {
        self.tree.write_to_string()
    }

    /// write the a2l data to the given file
    /// the banner will be placed inside a comment at the beginning of the file; `/*` and `*/` should not be part of the banner string
    ///
    /// # Errors
    ///
    /// [`A2lError::FileWriteError`] if writing the file fails.
    pub fn write<P: AsRef<Path>>(&self, path: P, banner: Option<&str>) -> Result<(), A2lError> {
        let mut outstr = String::new();
        if let Some(banner_text) = banner {
            outstr = format!("/* {banner_text} */\n");
        }
        outstr.push_str(&self.write_to_string());

        std::fs::write(&path, outstr).map_err(|ioerror| A2lError::FileWriteError {
            filename: path.as_ref().to_path_buf(),
            ioerror,
        })
    }
}
