#![no_main]
use libfuzzer_sys::fuzz_target;
use kvconf::{Options, encode, parse_str};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let opts = Options::default();
        if let Ok(first) = parse_str(input, &opts) {
            if let Ok(encoded) = encode::to_string(&first, &opts) {
                let second = parse_str(&encoded, &opts).unwrap_or_else(|e| {
                    panic!("re-encoded config failed to parse: {e}\ninput: {input:?}\nencoded: {encoded:?}")
                });
                assert_eq!(first, second, "input: {input:?}\nencoded: {encoded:?}");
            }
        }
    }
});
