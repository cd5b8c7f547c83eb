//! Decision Tests
//!
//! Exhaustive decision-table coverage plus the end-to-end guardrail scenario.

use shipgate::decision::{decide, Decision, DecisionPolicy};
use shipgate::stats::{analyze_proportions, ProportionSample, ProportionTestResult};
use shipgate::Error;

fn result(lift: f64, significant: bool) -> ProportionTestResult {
    let p_a = 0.4;
    let p_b = p_a * (1.0 + lift);
    let diff = p_b - p_a;
    ProportionTestResult::builder()
        .rates(p_a, p_b)
        .lift(lift)
        .p_value(if significant { 0.001 } else { 0.4 })
        .confidence_interval(diff - 0.02, diff + 0.02)
        .build()
        .expect("valid result")
}

/// Reference rule written out as a truth table.
fn expected(
    primary_significant: bool,
    primary_positive: bool,
    guardrail_significant: bool,
    guardrail_below_threshold: bool,
) -> Decision {
    if guardrail_significant && guardrail_below_threshold {
        Decision::Block
    } else if primary_significant && primary_positive {
        Decision::Ship
    } else {
        Decision::Inconclusive
    }
}

#[test]
fn test_decision_table_exhaustive() {
    for primary_significant in [false, true] {
        for primary_positive in [false, true] {
            for guardrail_significant in [false, true] {
                for guardrail_below_threshold in [false, true] {
                    let primary = result(if primary_positive { 0.08 } else { -0.08 }, primary_significant);
                    let guardrail = result(
                        if guardrail_below_threshold { -0.05 } else { -0.01 },
                        guardrail_significant,
                    );

                    let decision = decide(&primary, &[guardrail]).unwrap();
                    assert_eq!(
                        decision,
                        expected(
                            primary_significant,
                            primary_positive,
                            guardrail_significant,
                            guardrail_below_threshold
                        ),
                        "primary sig={primary_significant} pos={primary_positive}, \
                         guardrail sig={guardrail_significant} below={guardrail_below_threshold}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_guardrail_blocks_significant_win() {
    let primary = analyze_proportions(
        ProportionSample::new(600, 5000).unwrap(),
        ProportionSample::new(700, 5000).unwrap(),
        0.05,
    )
    .unwrap();
    assert!(primary.is_significant());
    assert!(primary.lift() > 0.0);

    let guardrail = result(-0.03, true);
    assert_eq!(decide(&primary, &[guardrail]), Ok(Decision::Block));
    assert_eq!(decide(&primary, &[]), Ok(Decision::Ship));
}

#[test]
fn test_any_guardrail_blocks() {
    let primary = result(0.1, true);
    let guardrails = [result(0.01, true), result(-0.5, false), result(-0.04, true), result(-0.06, true)];

    let outcome = DecisionPolicy::default().evaluate(&primary, &guardrails).unwrap();
    assert_eq!(outcome.decision(), Decision::Block);
    assert_eq!(outcome.violated_guardrails(), &[2, 3]);
}

#[test]
fn test_outcome_serializes() {
    let outcome = DecisionPolicy::default()
        .evaluate(&result(0.1, true), &[])
        .unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["decision"], "Ship");
    assert_eq!(json["violated_guardrails"], serde_json::json!([]));
}

#[test]
fn test_missing_field_fails_fast() {
    let err = ProportionTestResult::builder()
        .lift(-0.03)
        .p_value(0.001)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::MalformedResult(msg) if msg.contains("p_a")));
}

#[test]
fn test_inconsistent_significance_rejected() {
    let tampered: ProportionTestResult = serde_json::from_value(serde_json::json!({
        "p_a": 0.4, "p_b": 0.38, "lift": -0.05, "p_value": 0.6,
        "confidence_interval": [-0.05, 0.01], "alpha": 0.05, "significant": true
    }))
    .unwrap();
    assert!(matches!(
        decide(&result(0.1, true), &[tampered]),
        Err(Error::MalformedResult(_))
    ));
}
