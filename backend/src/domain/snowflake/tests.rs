//! Tests for snowflake validation and timestamp decoding.

use super::*;
use rstest::rstest;

#[rstest]
#[case::plain("175928847299117063")]
#[case::small("1")]
#[case::zero("0")]
#[case::leading_zeroes("0042")]
#[case::surrounding_whitespace(" 123 ")]
#[case::tab_and_newline("\t123\n")]
#[case::whitespace_only("   ")]
#[case::scientific("1e5")]
#[case::signed_exponent("2.5E-3")]
#[case::fraction("12.5")]
#[case::leading_dot(".5")]
#[case::trailing_dot("5.")]
#[case::explicit_plus("+17")]
#[case::negative("-17")]
#[case::hex("0x1F")]
#[case::octal("0o17")]
#[case::binary("0b101")]
#[case::infinity("Infinity")]
#[case::negative_infinity("-Infinity")]
fn accepts_values_that_coerce_to_numbers(#[case] raw: &str) {
    assert!(Snowflake::is_valid(raw), "{raw:?} should be accepted");
    assert!(Snowflake::parse(raw).is_ok());
}

#[rstest]
#[case::empty("")]
#[case::letters("abc")]
#[case::trailing_garbage("123abc")]
#[case::inner_whitespace("12 34")]
#[case::nan("NaN")]
#[case::rust_infinity("inf")]
#[case::lowercase_infinity("infinity")]
#[case::lone_dot(".")]
#[case::lone_sign("-")]
#[case::bare_exponent("1e")]
#[case::signed_hex("-0x10")]
#[case::empty_hex("0x")]
#[case::bad_hex_digit("0xZZ")]
#[case::separator("1_000")]
#[case::percent_encoded_space("%20123")]
fn rejects_values_that_are_nan(#[case] raw: &str) {
    assert!(!Snowflake::is_valid(raw), "{raw:?} should be rejected");
    let error = Snowflake::parse(raw).expect_err("parse should fail");
    assert_eq!(
        error,
        SnowflakeError::Invalid {
            value: raw.to_owned()
        }
    );
}

#[test]
fn keeps_raw_text_verbatim() {
    let id = Snowflake::parse(" 0042 ").expect("valid snowflake");
    assert_eq!(id.as_str(), " 0042 ");
    assert_eq!(id.to_string(), " 0042 ");
}

#[test]
fn zero_maps_to_the_discord_epoch() {
    assert_eq!(
        to_timestamp("0").expect("in range"),
        "2015-01-01T00:00:00.000Z"
    );
}

#[test]
fn decodes_known_snowflake_timestamp() {
    assert_eq!(
        to_timestamp("175928847299117063").expect("in range"),
        "2016-04-30T11:18:25.796Z"
    );
}

#[rstest]
#[case("175928847299117063")]
#[case("80351110224678912")]
#[case("1083422398493753416")]
#[case("18446744073709551615")]
fn timestamp_matches_shift_plus_epoch(#[case] raw: &str) {
    let value: u64 = raw.parse().expect("u64 literal");
    let expected = i64::try_from(value >> 22).expect("fits") + DISCORD_EPOCH_MS;

    let id = Snowflake::parse(raw).expect("valid snowflake");
    let instant = id.timestamp().expect("in range");
    assert_eq!(instant.timestamp_millis(), expected);

    let formatted = id.to_iso8601().expect("in range");
    let reparsed = DateTime::parse_from_rfc3339(&formatted).expect("ISO-8601 output");
    assert_eq!(reparsed.timestamp_millis(), expected);
}

#[test]
fn timestamp_is_deterministic() {
    let first = to_timestamp("613425648685547541").expect("in range");
    let second = to_timestamp("613425648685547541").expect("in range");
    assert_eq!(first, second);
}

#[test]
fn whitespace_only_value_decodes_as_zero() {
    assert_eq!(
        to_timestamp("  ").expect("in range"),
        "2015-01-01T00:00:00.000Z"
    );
}

#[test]
fn negative_values_precede_the_epoch() {
    let instant = Snowflake::parse("-4194304000")
        .expect("valid snowflake")
        .timestamp()
        .expect("in range");
    assert_eq!(instant.timestamp_millis(), DISCORD_EPOCH_MS - 1000);
}

#[test]
fn scientific_notation_uses_floating_point_division() {
    let instant = Snowflake::parse("4.194304e9")
        .expect("valid snowflake")
        .timestamp()
        .expect("in range");
    assert_eq!(instant.timestamp_millis(), DISCORD_EPOCH_MS + 1000);
}

#[rstest]
#[case("1e300")]
#[case("Infinity")]
#[case("-Infinity")]
fn out_of_range_timestamps_are_errors(#[case] raw: &str) {
    let error = Snowflake::parse(raw)
        .expect("valid snowflake")
        .timestamp()
        .expect_err("timestamp should overflow");
    assert!(matches!(error, SnowflakeError::TimestampOutOfRange { .. }));
}

#[rstest]
#[case("42", Some(42.0))]
#[case(" 7 ", Some(7.0))]
#[case("", Some(0.0))]
#[case("0x10", Some(16.0))]
#[case("1.5", Some(1.5))]
#[case("-3", Some(-3.0))]
#[case("nope", None)]
fn coerce_number_follows_number_semantics(#[case] raw: &str, #[case] expected: Option<f64>) {
    assert_eq!(coerce_number(raw), expected);
}
