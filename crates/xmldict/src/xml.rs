//! Bundled XML engine: tree model, reader and writer

mod cursor;
pub mod model;
pub mod parser;
pub mod writer;

pub use model::{Content, Document, Element};
pub use parser::{ParseConfig, Parser};
pub use writer::{UnparseOptions, Writer};
