//! XML writer rendering an element tree to text

use crate::error::{Error, ErrorKind, Result};
use crate::xml::model::{is_xml_char, is_xml_whitespace, Content, Element};

const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

/// Output options for rendering a document
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnparseOptions {
    /// Emit an XML declaration line before the root element
    pub declaration: bool,
    /// Indentation unit for pretty output; `None` writes everything on one line.
    /// Must be XML whitespace, anything else would read back as text.
    pub indent: Option<String>,
}

impl UnparseOptions {
    /// Two-space pretty output
    pub fn pretty() -> Self {
        Self::default().with_indent("  ")
    }

    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = Some(indent.into());
        self
    }
}

/// Renders elements into an output buffer.
///
/// Pretty output only breaks lines inside elements whose content is made of
/// child elements alone; anything carrying text is written inline so that
/// reading the output back yields the same text.
#[derive(Debug)]
pub struct Writer<'o> {
    options: &'o UnparseOptions,
    output: String,
}

impl<'o> Writer<'o> {
    pub fn new(options: &'o UnparseOptions) -> Self {
        Self {
            options,
            output: String::new(),
        }
    }

    /// Render `root` as a complete document
    pub fn write_document(mut self, root: &Element) -> Result<String> {
        if let Some(indent) = &self.options.indent {
            if !indent.chars().all(is_xml_whitespace) {
                return Err(Error::unparse(ErrorKind::InvalidIndent {
                    indent: indent.clone(),
                }));
            }
        }
        if self.options.declaration {
            self.output.push_str(DECLARATION);
            self.output.push('\n');
        }
        self.write_element(root, 0, false)?;
        Ok(self.output)
    }

    fn write_element(&mut self, element: &Element, level: usize, inline: bool) -> Result<()> {
        check_name(&element.name)?;
        self.output.push('<');
        self.output.push_str(&element.name);

        for (key, value) in &element.attributes {
            check_name(key)?;
            self.output.push(' ');
            self.output.push_str(key);
            self.output.push_str("=\"");
            escape_attribute(value, &mut self.output)?;
            self.output.push('"');
        }

        if element.children.is_empty() {
            self.output.push_str("/>");
            return Ok(());
        }
        self.output.push('>');

        let inline = inline || self.options.indent.is_none() || element.has_text();
        for child in &element.children {
            match child {
                Content::Element(child) => {
                    if !inline {
                        self.newline(level + 1);
                    }
                    self.write_element(child, level + 1, inline)?;
                }
                Content::Text(text) if inline => escape_text(text, &mut self.output)?,
                Content::Text(_) => {}
            }
        }
        if !inline {
            self.newline(level);
        }

        self.output.push_str("</");
        self.output.push_str(&element.name);
        self.output.push('>');
        Ok(())
    }

    fn newline(&mut self, level: usize) {
        if let Some(indent) = &self.options.indent {
            self.output.push('\n');
            for _ in 0..level {
                self.output.push_str(indent);
            }
        }
    }
}

/// Returns true if `name` can be written as an element or attribute name
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_name_start(first) && chars.all(|ch| is_name_start(ch) || matches!(ch, '0'..='9' | '-' | '.'))
}

fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || matches!(ch, '_' | ':') || (!ch.is_ascii() && is_xml_char(ch))
}

fn check_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(Error::unparse(ErrorKind::InvalidName {
            name: name.to_string(),
        }))
    }
}

fn check_char(ch: char) -> Result<()> {
    if is_xml_char(ch) {
        Ok(())
    } else {
        Err(Error::unparse(ErrorKind::InvalidCharacter { ch }))
    }
}

fn escape_text(input: &str, output: &mut String) -> Result<()> {
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\r' => output.push_str("&#13;"),
            _ => {
                check_char(ch)?;
                output.push(ch);
            }
        }
    }
    Ok(())
}

fn escape_attribute(input: &str, output: &mut String) -> Result<()> {
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\t' => output.push_str("&#9;"),
            '\n' => output.push_str("&#10;"),
            '\r' => output.push_str("&#13;"),
            _ => {
                check_char(ch)?;
                output.push(ch);
            }
        }
    }
    Ok(())
}
