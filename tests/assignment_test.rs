//! Assignment Tests
//!
//! Determinism, balance and cross-experiment independence of hash-based
//! variant assignment over large synthetic populations.

use shipgate::assignment::{assign, bucket, Assigner, Variant, DEFAULT_SPLIT};

const POPULATION: usize = 100_000;

fn subjects() -> impl Iterator<Item = String> {
    (0..POPULATION).map(|i| format!("user_{i:06}"))
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_repeated_calls_agree() {
    let first: Vec<Variant> = (0..1_000)
        .map(|i| assign(&format!("user_{i}"), "exp-det", 0.37).unwrap())
        .collect();
    let second: Vec<Variant> = (0..1_000)
        .map(|i| assign(&format!("user_{i}"), "exp-det", 0.37).unwrap())
        .collect();
    assert_eq!(first, second);
}

#[test]
fn test_assignment_independent_of_call_order() {
    let assigner = Assigner::new("exp-order");
    let forward: Vec<Variant> = (0..500).map(|i| assigner.assign(&format!("u{i}"))).collect();
    let mut backward: Vec<Variant> = (0..500)
        .rev()
        .map(|i| assigner.assign(&format!("u{i}")))
        .collect();
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn test_assignment_across_threads() {
    let assigner = Assigner::new("exp-threads");
    let expected: Vec<Variant> = (0..2_000).map(|i| assigner.assign(&format!("u{i}"))).collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let assigner = assigner.clone();
            std::thread::spawn(move || {
                (0..2_000)
                    .map(|i| assigner.assign(&format!("u{i}")))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

// =============================================================================
// Balance
// =============================================================================

fn treatment_fraction(experiment_id: &str, split: f64) -> f64 {
    let assigner = Assigner::with_split(experiment_id, split).unwrap();
    let treated = subjects()
        .filter(|s| assigner.assign(s) == Variant::B)
        .count();
    treated as f64 / POPULATION as f64
}

#[test]
fn test_even_split_balance() {
    let fraction = treatment_fraction("exp-balance", DEFAULT_SPLIT);
    assert!((fraction - 0.5).abs() < 0.02, "fraction in B: {fraction}");
}

#[test]
fn test_uneven_split_balance() {
    let fraction = treatment_fraction("exp-balance-10", 0.1);
    assert!((fraction - 0.1).abs() < 0.02, "fraction in B: {fraction}");
}

#[test]
fn test_buckets_cover_full_range() {
    let mut seen = vec![false; 1000];
    for subject in subjects().take(20_000) {
        seen[bucket(&subject, "exp-coverage") as usize] = true;
    }
    assert!(seen.iter().all(|&hit| hit));
}

// =============================================================================
// Independence across experiments
// =============================================================================

#[test]
fn test_experiments_are_uncorrelated() {
    let first = Assigner::new("exp-alpha");
    let second = Assigner::new("exp-beta");

    let agree = subjects()
        .filter(|s| first.assign(s) == second.assign(s))
        .count();
    let agreement = agree as f64 / POPULATION as f64;

    // Independent 50/50 assignments agree half the time
    assert!((agreement - 0.5).abs() < 0.02, "agreement: {agreement}");
}

#[test]
fn test_treatment_in_one_experiment_does_not_predict_other() {
    let first = Assigner::new("exp-gamma");
    let second = Assigner::new("exp-delta");

    let (mut treated_first, mut treated_both) = (0usize, 0usize);
    for subject in subjects() {
        if first.assign(&subject) == Variant::B {
            treated_first += 1;
            if second.assign(&subject) == Variant::B {
                treated_both += 1;
            }
        }
    }
    let conditional = treated_both as f64 / treated_first as f64;
    assert!((conditional - 0.5).abs() < 0.02, "P(B2 | B1) = {conditional}");
}
