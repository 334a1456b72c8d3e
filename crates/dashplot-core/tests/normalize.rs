// File: crates/dashplot-core/tests/normalize.rs
// Purpose: Validate input classification and normalization into the canonical series.

use dashplot_core::{normalize, Record, Series, SeriesInput};
use serde_json::json;

fn labels(s: &Series) -> Vec<&str> {
    s.labels().iter().map(String::as_str).collect()
}

#[test]
fn mapping_keeps_insertion_order() {
    let s = normalize(&json!({"b": 2, "a": 1, "c": "3"}));
    assert_eq!(labels(&s), ["b", "a", "c"]);
    assert_eq!(s.data(), &[2.0, 1.0, 3.0]);
}

#[test]
fn mapping_example() {
    let s = normalize(&json!({"a": 1, "b": 2}));
    assert_eq!(labels(&s), ["a", "b"]);
    assert_eq!(s.data(), &[1.0, 2.0]);
}

#[test]
fn records_with_missing_fields() {
    let s = normalize(&json!([{"label": "x", "value": 4}, {"value": 2}, {"label": "z"}, {"label": 7, "value": "1.5"}]));
    assert_eq!(labels(&s), ["x", "", "z", "7"]);
    assert_eq!(s.data(), &[4.0, 2.0, 0.0, 1.5]);
}

#[test]
fn numbers_get_positional_labels() {
    let s = normalize(&json!([3, 1.5, 9]));
    assert_eq!(labels(&s), ["1", "2", "3"]);
    assert_eq!(s.data(), &[3.0, 1.5, 9.0]);
}

#[test]
fn strings_become_histogram_in_first_seen_order() {
    let s = normalize(&json!(["x", "x", "y"]));
    assert_eq!(labels(&s), ["x", "y"]);
    assert_eq!(s.data(), &[2.0, 1.0]);
}

#[test]
fn dispatch_uses_first_element_type() {
    // Later non-numbers are coerced; unparseable text ends up as 0.
    let s = normalize(&json!([1, "2", "abc", null, true]));
    assert_eq!(s.data(), &[1.0, 2.0, 0.0, 0.0, 1.0]);
    assert!(matches!(SeriesInput::classify(&json!(["a", 1])), SeriesInput::Strings(_)));
}

#[test]
fn array_of_pairs() {
    let s = normalize(&json!([["mon", 3], ["tue", "4"], ["wed"]]));
    assert_eq!(labels(&s), ["mon", "tue", "wed"]);
    assert_eq!(s.data(), &[3.0, 4.0, 0.0]);
}

#[test]
fn unrecognized_inputs_give_empty_series() {
    for v in [json!(null), json!([]), json!(42), json!("text"), json!([null, 1]), json!(true)] {
        let s = normalize(&v);
        assert!(s.is_empty(), "expected empty series for {v}");
        assert_eq!(s.labels().len(), s.data().len());
    }
}

#[test]
fn non_finite_values_become_zero() {
    let input = SeriesInput::Records(vec![
        Record { label: Some("nan".into()), value: Some(f64::NAN) },
        Record { label: Some("inf".into()), value: Some(f64::INFINITY) },
    ]);
    assert_eq!(input.normalize().data(), &[0.0, 0.0]);
}

#[test]
fn normalizing_canonical_records_is_idempotent() {
    let input = SeriesInput::classify(&json!([{"label": "a", "value": 1}, {"label": "b", "value": 2.5}]));
    let first = input.normalize();
    let second = input.normalize();
    assert_eq!(first, second);
    assert_eq!(first.to_input().normalize(), first);
}
