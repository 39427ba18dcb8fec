//! XML engine interface used by the converters
//!
//! The conversion core only needs two capabilities from an XML library:
//! read text into an element tree and render an element tree back to text.
//! [`NativeEngine`] provides both with the bundled reader and writer; other
//! engines can be plugged in through [`crate::parse_with`] and
//! [`crate::unparse_with`].

use crate::error::Result;
use crate::xml::{Element, ParseConfig, Parser, UnparseOptions, Writer};

/// Reads and renders XML element trees
pub trait XmlEngine {
    /// Parse a document, returning its root element.
    ///
    /// Malformed attributes and mismatched tags must be reported as errors,
    /// never repaired.
    fn parse(&self, input: &str) -> Result<Element>;

    /// Render an element tree as a document
    fn render(&self, root: &Element) -> Result<String>;
}

/// The bundled XML reader and writer
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NativeEngine {
    config: ParseConfig,
    options: UnparseOptions,
}

impl NativeEngine {
    pub fn new(config: ParseConfig, options: UnparseOptions) -> Self {
        Self { config, options }
    }

    pub fn with_config(config: ParseConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_options(options: UnparseOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn config(&self) -> ParseConfig {
        self.config
    }

    pub fn options(&self) -> &UnparseOptions {
        &self.options
    }
}

impl XmlEngine for NativeEngine {
    fn parse(&self, input: &str) -> Result<Element> {
        let mut parser = Parser::with_config(input.as_bytes(), self.config);
        parser.parse().map(|doc| doc.root)
    }

    fn render(&self, root: &Element) -> Result<String> {
        Writer::new(&self.options).write_document(root)
    }
}
