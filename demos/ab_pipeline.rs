//! A/B Pipeline Example
//!
//! End-to-end run: plan the sample size, simulate users, tally conversions,
//! analyze, and decide with a guardrail metric.
//!
//! Run with: RUST_LOG=shipgate=debug cargo run --example ab_pipeline

use anyhow::Context;
use rand::Rng;
use shipgate::assignment::Variant;
use shipgate::decision::DecisionPolicy;
use shipgate::experiment::ConversionTally;
use shipgate::AnalysisConfig;
use tracing_subscriber::EnvFilter;

const EXPERIMENT_ID: &str = "google_ads_conversion_test_2026";
const N_USERS: usize = 5_000;
const TRUE_LIFT: f64 = 0.12;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Shipgate A/B Pipeline ===\n");

    // -------------------------------------------------------------------------
    // 1. Plan the experiment
    // -------------------------------------------------------------------------
    let config = AnalysisConfig::default();
    config.validate().context("invalid experiment config")?;
    println!("1. Planning {EXPERIMENT_ID}...");
    println!("   Baseline:           {:.2}%", config.baseline * 100.0);
    println!("   Relative MDE:       {:.2}%", config.mde * 100.0);
    println!("   Needed per variant: {}", config.required_sample_size()?);
    println!("   Needed in total:    {}", config.total_sample_size()?);

    // -------------------------------------------------------------------------
    // 2. Simulate users (primary metric: conversion, guardrail: retention)
    // -------------------------------------------------------------------------
    println!("\n2. Simulating {N_USERS} users...");
    let assigner = config.assigner(EXPERIMENT_ID)?;
    let mut rng = rand::thread_rng();
    let mut conversions = ConversionTally::new();
    let mut retention = ConversionTally::new();

    for i in 0..N_USERS {
        let assignment = assigner.assignment(format!("user_{i}"));
        let conversion_rate = match assignment.variant() {
            Variant::A => config.baseline,
            Variant::B => config.baseline * (1.0 + TRUE_LIFT),
        };
        let retention_rate = match assignment.variant() {
            Variant::A => 0.80,
            Variant::B => 0.79,
        };
        conversions.record_assignment(&assignment, rng.gen_bool(conversion_rate));
        retention.record_assignment(&assignment, rng.gen_bool(retention_rate));
    }
    println!(
        "   Group sizes: A = {}, B = {}",
        conversions.trials(Variant::A),
        conversions.trials(Variant::B)
    );

    // -------------------------------------------------------------------------
    // 3. Analyze
    // -------------------------------------------------------------------------
    let primary = conversions.analyze(config.alpha)?;
    let guardrail = retention.analyze(config.alpha)?;
    let report = primary.report();

    println!("\n3. Results");
    println!("   Group A (Control):   {:.2}% conversion", report.p_a * 100.0);
    println!("   Group B (Treatment): {:.2}% conversion", report.p_b * 100.0);
    println!("   Relative Lift:       {:.2}%", report.lift * 100.0);
    println!("   P-Value:             {}", report.p_value);
    println!(
        "   95% CI (B - A):      [{}, {}]",
        report.confidence_interval.0, report.confidence_interval.1
    );
    println!("   Statistical Sig:     {}", report.significant);
    println!("   Retention lift:      {:.2}%", guardrail.lift() * 100.0);

    // -------------------------------------------------------------------------
    // 4. Decide
    // -------------------------------------------------------------------------
    let outcome = DecisionPolicy::default().evaluate(&primary, &[guardrail])?;
    println!("\n4. Decision: {}", outcome.decision());

    println!("\n   Report JSON:");
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
