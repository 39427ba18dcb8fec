//! xmldict - XML documents as ordered nested mappings, and back
//!
//! An element becomes `Null` when empty, a `Scalar` when it only holds text,
//! or a `Mapping` with `@`-prefixed attribute keys, one key per child tag
//! (repeated tags collect into a `List`) and a `#text` key for text mixed in
//! with attributes or children.
//!
//! # Quick Start
//!
//! ```
//! use xmldict::{parse, unparse, Value};
//! # fn main() -> Result<(), xmldict::Error> {
//! let value = parse(r#"<a href="xyz"><b>1</b><b>2</b></a>"#)?;
//! let a = value.as_mapping().and_then(|doc| doc.get("a"));
//! let href = a
//!     .and_then(Value::as_mapping)
//!     .and_then(|a| a.get("@href"))
//!     .and_then(Value::as_str);
//! assert_eq!(href, Some("xyz"));
//!
//! assert_eq!(unparse(&value)?, r#"<a href="xyz"><b>1</b><b>2</b></a>"#);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

use tracing::{debug, instrument, warn};

pub mod engine;
pub use engine::{NativeEngine, XmlEngine};

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod keys;
pub use keys::{attribute_key, is_attribute_key, is_text_key, ATTRIBUTE_PREFIX, TEXT_KEY};

pub mod value;
pub use value::{List, Mapping, Value};

pub mod to_value;
pub mod to_xml;
pub mod xml;
pub use xml::{
    Content as XmlContent, Element as XmlElement, ParseConfig, Parser as XmlParser,
    UnparseOptions,
};

/// Parse an XML document into `{root_tag: value}`
pub fn parse(input: &str) -> Result<Value> {
    parse_with(&NativeEngine::default(), input)
}

/// Parse with custom reader limits
pub fn parse_with_config(input: &str, config: ParseConfig) -> Result<Value> {
    parse_with(&NativeEngine::with_config(config), input)
}

/// Parse using a caller-supplied XML engine
#[instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn parse_with<E: XmlEngine + ?Sized>(engine: &E, input: &str) -> Result<Value> {
    let root = engine
        .parse(input)
        .inspect_err(|err| debug!(%err, "xml parse failed"))?;
    debug!(root = %root.name, "converting element tree");
    Ok(to_value::document_to_value(&root))
}

/// Render a `{root_tag: value}` mapping as compact XML
pub fn unparse(value: &Value) -> Result<String> {
    unparse_with(&NativeEngine::default(), value)
}

/// Render with output options (declaration, indentation)
pub fn unparse_with_options(value: &Value, options: UnparseOptions) -> Result<String> {
    unparse_with(&NativeEngine::with_options(options), value)
}

/// Render using a caller-supplied XML engine
#[instrument(level = "debug", skip_all)]
pub fn unparse_with<E: XmlEngine + ?Sized>(engine: &E, value: &Value) -> Result<String> {
    let root = to_xml::value_to_document(value)
        .inspect_err(|err| warn!(%err, "mapping cannot be rendered as xml"))?;
    debug!(root = %root.name, children = root.children.len(), "rendering element tree");
    engine.render(&root)
}
