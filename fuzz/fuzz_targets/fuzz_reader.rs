#![no_main]
use libfuzzer_sys::fuzz_target;
use kvconf::{Options, parse_reader, parse_str};

// The byte-stream path must agree with the &str path on valid UTF-8.
fuzz_target!(|data: &[u8]| {
    let opts = Options::default();
    let from_reader = parse_reader(data, &opts);
    match std::str::from_utf8(data) {
        Ok(s) => {
            let from_str = parse_str(s, &opts);
            match (&from_reader, &from_str) {
                (Ok(a), Ok(b)) => assert_eq!(a, b),
                (Err(a), Err(b)) => assert_eq!(a.parse_kind(), b.parse_kind()),
                _ => panic!("reader/str mismatch: {from_reader:?} vs {from_str:?}"),
            }
        }
        Err(_) => assert!(from_reader.is_err(), "invalid UTF-8 accepted: {data:?}"),
    }
});
