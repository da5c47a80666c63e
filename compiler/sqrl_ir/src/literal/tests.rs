use super::*;
use pretty_assertions::assert_eq;

fn scan(text: &str) -> Option<(Number, usize)> {
    scan_number(text.as_bytes())
}

#[test]
fn decimal_integers() {
    assert_eq!(scan("42"), Some((Number::Int(42), 2)));
    assert_eq!(scan("-17 rest"), Some((Number::Int(-17), 3)));
    assert_eq!(scan("+5"), Some((Number::Int(5), 2)));
    assert_eq!(scan("0"), Some((Number::Int(0), 1)));
    assert_eq!(scan("08"), Some((Number::Int(8), 2)));
}

#[test]
fn hex_integers() {
    assert_eq!(scan("0x1F"), Some((Number::Int(31), 4)));
    assert_eq!(scan("0xff}"), Some((Number::Int(255), 4)));
    assert_eq!(scan("0xFFFFFFFF"), Some((Number::Int(-1), 10)));
}

#[test]
fn octal_integers() {
    assert_eq!(scan("0777"), Some((Number::Int(511), 4)));
    assert_eq!(scan("017x"), Some((Number::Int(15), 3)));
}

#[test]
fn floats() {
    assert_eq!(scan("3.5"), Some((Number::Float(3.5), 3)));
    assert_eq!(scan(".25"), Some((Number::Float(0.25), 3)));
    assert_eq!(scan("-0.5"), Some((Number::Float(-0.5), 4)));
    assert_eq!(scan("1e3"), Some((Number::Float(1000.0), 3)));
    assert_eq!(scan("2.5e-2"), Some((Number::Float(0.025), 6)));
    assert_eq!(scan("1E+2"), Some((Number::Float(100.0), 4)));
}

#[test]
fn float_stops_at_second_point() {
    assert_eq!(scan("1.5.2"), Some((Number::Float(1.5), 3)));
}

#[test]
fn exponent_needs_digits() {
    assert_eq!(scan("1e"), Some((Number::Int(1), 1)));
    assert_eq!(scan("2else"), Some((Number::Int(2), 1)));
}

#[test]
fn non_numbers() {
    assert_eq!(scan("-"), None);
    assert_eq!(scan("+"), None);
    assert_eq!(scan("."), None);
    assert_eq!(scan("0x"), None);
    assert_eq!(scan("0xg"), None);
    assert_eq!(scan("abc"), None);
    assert_eq!(scan(""), None);
}

#[test]
fn integer_overflow_wraps() {
    assert_eq!(scan("2147483648"), Some((Number::Int(i32::MIN), 10)));
    assert_eq!(scan("-2147483648"), Some((Number::Int(i32::MIN), 11)));
}

mod proptest_literals {
    use super::super::{scan_number, Number};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn int_display_round_trips(n in any::<i32>()) {
            let text = n.to_string();
            prop_assert_eq!(scan_number(text.as_bytes()), Some((Number::Int(n), text.len())));
        }

        #[test]
        fn float_debug_round_trips(f in -1.0e6f32..1.0e6f32) {
            let text = format!("{f:?}");
            prop_assert_eq!(scan_number(text.as_bytes()), Some((Number::Float(f), text.len())));
        }
    }
}
