#![no_main]

use libfuzzer_sys::fuzz_target;

// Whatever parses must survive one unparse/parse cycle unchanged.
fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(value) = xmldict::parse(input) else {
        return;
    };
    if let Ok(xml) = xmldict::unparse(&value) {
        assert_eq!(xmldict::parse(&xml).ok(), Some(value));
    }
});
