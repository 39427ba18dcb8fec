//! Property-based tests for the xml <-> mapping conversion
//!
//! Values are generated in the shape `parse` produces, then checked for:
//! 1. Roundtrip: parse(unparse(value)) == value
//! 2. Stability: unparse(value) == unparse(parse(unparse(value)))
//! 3. Arbitrary input never panics the reader

use proptest::prelude::*;
use xmldict::{attribute_key, parse, unparse, unparse_with_options, Mapping, UnparseOptions, Value, TEXT_KEY};

/// XML names, optionally carrying a namespace prefix
fn arb_name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_.-]{0,4}(:[a-z][a-z0-9]{0,3})?"
}

/// Leaf text as `parse` returns it: no surrounding whitespace
fn arb_scalar() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9<>&;\"'][a-zA-Z0-9<>&;\"' ]{0,6}[a-zA-Z0-9<>&;\"']|[a-zA-Z0-9<>&]"
}

/// Mixed-content text: untrimmed but never blank
fn arb_mixed_text() -> impl Strategy<Value = String> {
    "[a-z<>& \n]{0,4}[a-z<>&][a-z<>& \n]{0,4}"
}

fn arb_attribute_value() -> impl Strategy<Value = String> {
    "[a-z0-9 <>&\"'\t\r\n]{0,8}"
}

/// Element values in canonical form: a mapping always has attributes or children
fn arb_element() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        arb_scalar().prop_map(Value::Scalar),
    ];

    leaf.prop_recursive(4, 48, 4, |inner| {
        let child = prop_oneof![
            3 => inner.clone(),
            1 => prop::collection::vec(inner, 2..4).prop_map(Value::from),
        ];
        (
            prop::collection::btree_map(arb_name(), arb_attribute_value(), 0..3),
            prop::option::of(arb_mixed_text()),
            prop::collection::btree_map(arb_name(), child, 0..3),
        )
            .prop_filter("mapping needs attributes or children", |(attrs, _, children)| {
                !attrs.is_empty() || !children.is_empty()
            })
            .prop_map(|(attrs, text, children)| {
                let mut map = Mapping::new();
                for (name, value) in attrs {
                    map.insert(attribute_key(&name), value);
                }
                if let Some(text) = text {
                    map.insert(TEXT_KEY, text);
                }
                for (name, value) in children {
                    map.insert(name, value);
                }
                Value::Mapping(map)
            })
    })
}

fn arb_document() -> impl Strategy<Value = Value> {
    (arb_name(), arb_element()).prop_map(|(name, root)| {
        let mut doc = Mapping::new();
        doc.insert(name, root);
        Value::Mapping(doc)
    })
}

fn fail(err: xmldict::Error) -> TestCaseError {
    TestCaseError::fail(err.to_string())
}

proptest! {
    #[test]
    fn mapping_roundtrip(value in arb_document()) {
        let xml = unparse(&value).map_err(fail)?;
        let reparsed = parse(&xml).map_err(fail)?;
        prop_assert_eq!(&reparsed, &value, "xml: {}", xml);
    }

    #[test]
    fn unparse_is_stable(value in arb_document()) {
        let first = unparse(&value).map_err(fail)?;
        let second = unparse(&parse(&first).map_err(fail)?).map_err(fail)?;
        prop_assert_eq!(first, second);
    }

    #[test]
    fn pretty_output_roundtrip(value in arb_document()) {
        let xml = unparse_with_options(&value, UnparseOptions::pretty()).map_err(fail)?;
        let reparsed = parse(&xml).map_err(fail)?;
        prop_assert_eq!(&reparsed, &value, "xml: {}", xml);
    }

    #[test]
    fn arbitrary_input_never_panics(input in "[<>/a-z=\"' &;!?\\[\\]-]{0,40}") {
        let _result = parse(&input);
    }
}
