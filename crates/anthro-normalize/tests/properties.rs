//! Property tests for the value parser.

use proptest::prelude::*;

use anthro_normalize::{Measurement, ValueParser};

/// Renders `whole.frac` with a fixed number of fractional digits, or just the
/// integer part.
fn render(whole: u32, frac: Option<u8>) -> String {
    match frac {
        Some(frac) => format!("{whole}.{frac:02}"),
        None => whole.to_string(),
    }
}

fn spaces() -> impl Strategy<Value = String> {
    "[ \t]{0,3}"
}

proptest! {
    #[test]
    fn hyphen_range_is_midpoint(
        a in 0u32..10_000,
        af in proptest::option::of(0u8..100),
        b in 0u32..10_000,
        bf in proptest::option::of(0u8..100),
        left in spaces(),
        right in spaces(),
    ) {
        let parser = ValueParser::new().unwrap();
        let (low, high) = (render(a, af), render(b, bf));
        let raw = format!("{low}{left}-{right}{high}");
        let expected = (low.parse::<f64>().unwrap() + high.parse::<f64>().unwrap()) / 2.0;
        prop_assert_eq!(parser.parse(Some(&raw)), Some(expected));
    }

    #[test]
    fn comma_pair_is_midpoint(
        a in 0u32..10_000,
        b in 0u32..10_000,
        left in spaces(),
        right in spaces(),
    ) {
        let parser = ValueParser::new().unwrap();
        let raw = format!("{a}{left},{right}{b}");
        let expected = (f64::from(a) + f64::from(b)) / 2.0;
        prop_assert_eq!(parser.parse(Some(&raw)), Some(expected));
    }

    #[test]
    fn padded_single_number_parses(
        whole in 0u32..100_000,
        frac in proptest::option::of(0u8..100),
        lead in spaces(),
        trail in spaces(),
    ) {
        let parser = ValueParser::new().unwrap();
        let number = render(whole, frac);
        let raw = format!("{lead}{number}{trail}");
        prop_assert_eq!(parser.parse(Some(&raw)), Some(number.parse::<f64>().unwrap()));
    }

    #[test]
    fn arbitrary_text_is_null_or_finite_non_negative(raw in "\\PC{0,24}") {
        let parser = ValueParser::new().unwrap();
        if let Some(value) = parser.parse(Some(&raw)) {
            prop_assert!(value.is_finite());
            prop_assert!(value >= 0.0);
        }
    }

    #[test]
    fn text_with_letters_is_unrecognized(
        number in 0u32..1000,
        suffix in "[a-zA-Z]{1,4}",
    ) {
        let parser = ValueParser::new().unwrap();
        let raw = format!("{number}{suffix}");
        prop_assert_eq!(parser.classify(&raw), Measurement::Unrecognized);
    }
}
