//! Tests for error types

use shipgate::{Error, Variant};

#[test]
fn test_division_by_zero_error() {
    let error = Error::DivisionByZero { variant: Variant::B };
    let error_str = format!("{error}");
    assert!(error_str.contains("Division by zero"));
    assert!(error_str.contains("variant B"));
}

#[test]
fn test_undefined_lift_error() {
    let error_str = format!("{}", Error::UndefinedLift);
    assert!(error_str.contains("Undefined lift"));
    assert!(error_str.contains("control conversion rate is 0"));
}

#[test]
fn test_undefined_sample_size_error() {
    let error_str = format!("{}", Error::UndefinedSampleSize);
    assert!(error_str.contains("Undefined sample size"));
    assert!(error_str.contains("non-zero"));
}

#[test]
fn test_invalid_split_error() {
    let error_str = format!("{}", Error::InvalidSplit(1.5));
    assert!(error_str.contains("Invalid split: 1.5"));
    assert!(error_str.contains("[0, 1]"));
}

#[test]
fn test_malformed_result_error() {
    let error = Error::MalformedResult("missing required field `lift`".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Malformed test result"));
    assert!(error_str.contains("lift"));
}

#[test]
fn test_invalid_sample_error() {
    let error = Error::InvalidSample {
        successes: 11,
        trials: 10,
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("11 successes out of 10 trials"));
}

#[test]
fn test_invalid_parameter_error() {
    let error = Error::InvalidParameter {
        name: "alpha",
        value: 0.0,
        expected: "a value strictly between 0 and 1",
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("`alpha` = 0"));
    assert!(error_str.contains("strictly between 0 and 1"));
}

#[test]
fn test_error_debug() {
    let error = Error::UndefinedLift;
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("UndefinedLift"));
}

#[test]
fn test_error_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
    assert_error(&Error::UndefinedSampleSize);
}
