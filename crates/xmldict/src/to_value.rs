//! Element tree to nested mapping conversion

use indexmap::IndexMap;

use crate::keys::{attribute_key, TEXT_KEY};
use crate::value::{List, Mapping, Value};
use crate::xml::model::{is_blank, is_xml_whitespace, Element};

/// Convert a root element into the single-entry mapping `{root_name: value}`
pub fn document_to_value(root: &Element) -> Value {
    let mut doc = Mapping::with_capacity(1);
    doc.insert(root.name.clone(), element_to_value(root));
    Value::Mapping(doc)
}

/// Convert one element.
///
/// - no attributes, no child elements, blank text: `Null`
/// - no attributes, no child elements, some text: `Scalar` of the trimmed text
/// - otherwise a `Mapping` of `@`-prefixed attributes, the untrimmed text under
///   `#text` when it is not blank, then one entry per distinct child tag, with
///   repeated tags collected into a `List` in document order
pub fn element_to_value(element: &Element) -> Value {
    let text: String = element.texts().collect();
    let groups = group_children(element);

    if element.attributes.is_empty() && groups.is_empty() {
        return if is_blank(&text) {
            Value::Null
        } else {
            Value::Scalar(text.trim_matches(is_xml_whitespace).to_string())
        };
    }

    let text_entry = usize::from(!is_blank(&text));
    let mut map = Mapping::with_capacity(element.attributes.len() + text_entry + groups.len());
    for (name, value) in &element.attributes {
        map.insert(attribute_key(name), value.as_str());
    }
    if text_entry > 0 {
        map.insert(TEXT_KEY, text);
    }
    for (name, group) in groups {
        let value = match group.as_slice() {
            [only] => element_to_value(only),
            many => Value::List(many.iter().copied().map(element_to_value).collect::<List>()),
        };
        map.insert(name, value);
    }

    Value::Mapping(map)
}

/// Child elements grouped by tag, in order of first occurrence
fn group_children(element: &Element) -> IndexMap<&str, Vec<&Element>> {
    let mut groups: IndexMap<&str, Vec<&Element>> = IndexMap::new();
    for child in element.elements() {
        groups.entry(child.name.as_str()).or_default().push(child);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::model::Content;

    fn leaf(name: &str, text: &str) -> Element {
        let mut element = Element::new(name);
        element.children.push(Content::Text(text.to_string()));
        element
    }

    #[test]
    fn test_empty_element_is_null() {
        assert_eq!(element_to_value(&Element::new("a")), Value::Null);
        assert_eq!(element_to_value(&leaf("a", " \n\t ")), Value::Null);
    }

    #[test]
    fn test_leaf_text_is_trimmed() {
        assert_eq!(element_to_value(&leaf("a", "\n  data \n")), Value::from("data"));
    }

    #[test]
    fn test_root_wrapping() {
        let expected: Mapping = [("a", Value::Null)].into_iter().collect();
        assert_eq!(document_to_value(&Element::new("a")), Value::Mapping(expected));
    }

    #[test]
    fn test_groups_keep_first_occurrence_order() {
        let mut root = Element::new("r");
        for (name, text) in [("x", "1"), ("y", "2"), ("x", "3")] {
            root.children.push(Content::Element(leaf(name, text)));
        }

        let value = element_to_value(&root);
        let map = value.as_mapping();
        let keys: Vec<&str> = map
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["x", "y"]);
        assert_eq!(
            map.and_then(|m| m.get("x")),
            Some(&Value::from(vec![Value::from("1"), Value::from("3")]))
        );
    }

    #[test]
    fn test_mixed_text_is_concatenated_untrimmed() {
        let mut root = Element::new("a");
        root.attributes.insert("id".to_string(), "7".to_string());
        root.children.push(Content::Text(" abc ".to_string()));
        root.children.push(Content::Element(Element::new("b")));
        root.children.push(Content::Text("def".to_string()));

        let expected: Mapping = [
            ("@id", Value::from("7")),
            ("#text", Value::from(" abc def")),
            ("b", Value::Null),
        ]
        .into_iter()
        .collect();
        assert_eq!(element_to_value(&root), Value::Mapping(expected));
    }

    #[test]
    fn test_blank_text_beside_attribute_is_dropped() {
        let mut element = leaf("emptyb", "\n   ");
        element.attributes.insert("attr".to_string(), "v".to_string());
        let expected: Mapping = [("@attr", "v")].into_iter().collect();
        assert_eq!(element_to_value(&element), Value::Mapping(expected));
    }
}
