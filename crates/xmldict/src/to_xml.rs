//! Nested mapping to element tree conversion

use crate::error::{Error, ErrorKind, Result};
use crate::keys::{attribute_name, is_text_key, TEXT_KEY};
use crate::value::{Mapping, Value};
use crate::xml::model::{Content, Element};
use crate::xml::writer::is_valid_name;

/// Convert a single-entry mapping `{root_name: value}` into its root element
pub fn value_to_document(value: &Value) -> Result<Element> {
    let root = value
        .as_mapping()
        .and_then(Mapping::single_entry)
        .filter(|(_, root)| !root.is_list());
    match root {
        Some((name, root)) => value_to_element(name, root),
        None => Err(Error::unparse(ErrorKind::InvalidRoot)),
    }
}

/// Build the element `name` from `value`.
///
/// The `#text` entry of a mapping is written before its child elements.
pub fn value_to_element(name: &str, value: &Value) -> Result<Element> {
    check_name(name)?;
    let mut element = Element::new(name);

    match value {
        Value::Null => {}
        Value::Scalar(text) => push_text(&mut element, text),
        Value::Mapping(map) => fill_from_mapping(&mut element, map)?,
        Value::List(_) => {
            return Err(Error::unparse(ErrorKind::NestedList {
                name: name.to_string(),
            }))
        }
    }

    Ok(element)
}

fn fill_from_mapping(element: &mut Element, map: &Mapping) -> Result<()> {
    match map.get(TEXT_KEY) {
        None | Some(Value::Null) => {}
        Some(Value::Scalar(text)) => push_text(element, text),
        Some(_) => return Err(Error::unparse(ErrorKind::InvalidText)),
    }

    for (key, value) in map {
        if is_text_key(key) {
            continue;
        }

        if let Some(attr) = attribute_name(key) {
            check_name(attr)?;
            let text = match value {
                Value::Scalar(text) => text.clone(),
                Value::Null => String::new(),
                _ => {
                    return Err(Error::unparse(ErrorKind::InvalidAttributeValue {
                        name: attr.to_string(),
                    }))
                }
            };
            element.attributes.insert(attr.to_string(), text);
            continue;
        }

        match value {
            Value::List(items) => {
                for item in items {
                    let child = value_to_element(key, item)?;
                    element.children.push(Content::Element(child));
                }
            }
            _ => {
                let child = value_to_element(key, value)?;
                element.children.push(Content::Element(child));
            }
        }
    }

    Ok(())
}

fn push_text(element: &mut Element, text: &str) {
    if !text.is_empty() {
        element.children.push(Content::Text(text.to_string()));
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::List;

    fn kind(result: Result<Element>) -> Option<ErrorKind> {
        result.err().map(|e| e.kind().clone())
    }

    #[test]
    fn test_scalar_becomes_text() -> Result<()> {
        let element = value_to_element("a", &Value::from("data"))?;
        assert_eq!(element.children, vec![Content::Text("data".to_string())]);
        assert!(element.attributes.is_empty());
        Ok(())
    }

    #[test]
    fn test_mapping_splits_attributes_text_and_children() -> Result<()> {
        let map: Mapping = [
            ("b", Value::from(vec![Value::from("1"), Value::Null])),
            ("@href", Value::from("x")),
            ("#text", Value::from("t")),
        ]
        .into_iter()
        .collect();
        let element = value_to_element("a", &Value::Mapping(map))?;

        assert_eq!(element.attributes.get("href").map(String::as_str), Some("x"));
        let mut first = Element::new("b");
        first.children.push(Content::Text("1".to_string()));
        assert_eq!(
            element.children,
            vec![
                Content::Text("t".to_string()),
                Content::Element(first),
                Content::Element(Element::new("b")),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_root_must_be_single_entry() {
        let two: Mapping = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(kind(value_to_document(&Value::Mapping(two))), Some(ErrorKind::InvalidRoot));
        assert_eq!(kind(value_to_document(&Value::from("x"))), Some(ErrorKind::InvalidRoot));

        let list_root: Mapping = [("a", List::from(vec![Value::Null]))].into_iter().collect();
        assert_eq!(
            kind(value_to_document(&Value::Mapping(list_root))),
            Some(ErrorKind::InvalidRoot)
        );
    }

    #[test]
    fn test_contract_violations() {
        let nested = Value::from(vec![Value::from(vec![Value::Null])]);
        let map: Mapping = [("b", nested)].into_iter().collect();
        assert_eq!(
            kind(value_to_element("a", &Value::Mapping(map))),
            Some(ErrorKind::NestedList {
                name: "b".to_string()
            })
        );

        let map: Mapping = [("@id", Value::from(vec![Value::Null]))].into_iter().collect();
        assert_eq!(
            kind(value_to_element("a", &Value::Mapping(map))),
            Some(ErrorKind::InvalidAttributeValue {
                name: "id".to_string()
            })
        );

        let text: Mapping = [("x", "1")].into_iter().collect();
        let map: Mapping = [("#text", Value::Mapping(text))].into_iter().collect();
        assert_eq!(kind(value_to_element("a", &Value::Mapping(map))), Some(ErrorKind::InvalidText));

        assert_eq!(
            kind(value_to_element("bad name", &Value::Null)),
            Some(ErrorKind::InvalidName {
                name: "bad name".to_string()
            })
        );
    }
}
