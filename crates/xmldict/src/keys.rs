//! Key naming rules shared by both conversion directions
//!
//! Attributes become `@name` keys and element text that sits next to
//! attributes or child elements goes under the reserved `#text` key. The
//! reserved key carries no `@`, so an attribute called `text` (`@text`) or a
//! child element called `text` never collides with it.

/// Prefix marking a mapping key as an XML attribute
pub const ATTRIBUTE_PREFIX: char = '@';

/// Reserved key holding the text of a mixed-content element
pub const TEXT_KEY: &str = "#text";

/// Build the mapping key for an attribute name
pub fn attribute_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len() + 1);
    key.push(ATTRIBUTE_PREFIX);
    key.push_str(name);
    key
}

/// Returns true if `key` names an attribute
pub fn is_attribute_key(key: &str) -> bool {
    key.starts_with(ATTRIBUTE_PREFIX)
}

/// Returns true if `key` is the reserved text key
pub fn is_text_key(key: &str) -> bool {
    key == TEXT_KEY
}

/// Strip the attribute prefix, returning the XML attribute name
pub fn attribute_name(key: &str) -> Option<&str> {
    key.strip_prefix(ATTRIBUTE_PREFIX)
}
