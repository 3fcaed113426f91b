//! Properties of the parenthesis and conditional codecs.

use proptest::prelude::*;
use viewstate_query::conditional::{
    ENTRY_UNSAFE, SEARCH_FIELD_UNSAFE, SEARCH_QUERY_UNSAFE, maybe_decode, maybe_encode,
};
use viewstate_query::paren;

#[test]
fn test_literal_examples() {
    let cases = [
        ("cats", "(cats)"),
        ("cats()", "((cats()))"),
        ("cats(())", "(((cats(()))))"),
        ("(cats)", "((*(cats)))"),
        ("*cats", "(**cats)"),
        ("cats#%", "(cats%23%25)"),
    ];
    for (value, expected) in cases {
        assert_eq!(paren::encode(value), expected, "encoding {value:?}");
        assert_eq!(
            paren::decode(expected).unwrap(),
            (value.to_string(), expected.len()),
            "decoding {expected:?}"
        );
    }
}

#[test]
fn test_unicode_is_percent_encoded() {
    let encoded = paren::encode("naïve (café)");
    assert!(encoded.is_ascii());
    assert_eq!(paren::decode(&encoded).unwrap().0, "naïve (café)");
}

#[test]
fn test_conditional_falls_back_to_parens() {
    for unsafe_chars in [SEARCH_FIELD_UNSAFE, SEARCH_QUERY_UNSAFE, ENTRY_UNSAFE] {
        assert_eq!(maybe_encode("a)b", unsafe_chars), paren::encode("a)b"));
        assert_eq!(maybe_encode("(ab", unsafe_chars), paren::encode("(ab"));
    }
    assert_eq!(maybe_encode("a:b", ENTRY_UNSAFE), "(a%3Ab)");
    assert_eq!(maybe_encode("a:b", SEARCH_QUERY_UNSAFE), "a%3Ab");
}

fn unsafe_set() -> impl Strategy<Value = &'static [char]> {
    prop_oneof![
        Just(SEARCH_FIELD_UNSAFE),
        Just(SEARCH_QUERY_UNSAFE),
        Just(ENTRY_UNSAFE),
    ]
}

proptest! {
    #[test]
    fn paren_round_trips_any_string(value in any::<String>()) {
        let encoded = paren::encode(&value);
        prop_assert_eq!(paren::decode(&encoded).unwrap(), (value, encoded.len()));
    }

    #[test]
    fn paren_round_trips_delimiter_heavy_strings(value in "[()*a-z,:%é]{0,16}") {
        let encoded = paren::encode(&value);
        let (decoded, used) = paren::decode(&format!("{encoded})tail(")).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(used, encoded.len());
    }

    #[test]
    fn conditional_round_trips_in_context(
        value in "[()*a-z,:% ]{0,16}",
        unsafe_chars in unsafe_set(),
    ) {
        let encoded = maybe_encode(&value, unsafe_chars);
        let (decoded, used) = maybe_decode(&format!("{encoded})rest"), unsafe_chars).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(used, encoded.len());
    }

    #[test]
    fn safe_values_are_never_bracketed(value in "[a-z0-9 ._~-]{1,16}") {
        let encoded = maybe_encode(&value, ENTRY_UNSAFE);
        prop_assert!(!encoded.starts_with('('));
    }
}
