use kvconf::{Map, Options, encode, parse_str};
use proptest::prelude::*;

#[test]
fn encode_writes_canonical_lines() -> Result<(), Box<dyn std::error::Error>> {
    let mut m = Map::new();
    m.insert("b".into(), "two words ".into());
    m.insert("a".into(), "1".into());
    m.insert("empty".into(), String::new());
    let s = encode::to_string(&m, &Options::default())?;
    assert_eq!(s, "a = 1\nb = two words \nempty =\n");
    assert_eq!(parse_str(&s, &Options::default())?, m);
    Ok(())
}

#[test]
fn encode_rejects_bad_keys_and_values() {
    let opts = Options::default();
    for (k, v) in [("1a", "x"), ("a-b", "x"), ("", "x"), ("a", "x\ny"), ("a", "\tx"), ("a", "x\r")] {
        let mut m = Map::new();
        m.insert(k.into(), v.into());
        assert!(encode::to_string(&m, &opts).is_err(), "{k:?} = {v:?}");
    }
    let mut m = Map::new();
    m.insert("größe".into(), "x".into());
    assert!(encode::to_string(&m, &opts).is_err());
    assert!(encode::to_string(&m, &Options { unicode_keys: true }).is_ok());
}

#[test]
fn encode_to_writer() -> Result<(), Box<dyn std::error::Error>> {
    let mut m = Map::new();
    m.insert("k".into(), "v".into());
    let mut out = Vec::new();
    encode::to_writer(&mut out, &m, &Options::default())?;
    assert_eq!(out, b"k = v\n");
    Ok(())
}

fn entry() -> impl Strategy<Value = (String, String)> {
    (
        "[A-Za-z_][A-Za-z0-9_]{0,12}",
        "([^\\s]([^\n\r]{0,20}[^\n\r])?)?",
    )
}

proptest! {
    #[test]
    fn parse_of_encoded_map_is_identity(entries in proptest::collection::vec(entry(), 0..16)) {
        let m: Map = entries.into_iter().collect();
        let opts = Options::default();
        let text = encode::to_string(&m, &opts).unwrap();
        prop_assert_eq!(parse_str(&text, &opts).unwrap(), m);
    }
}
