//! Scenario fixtures priced end to end.
//!
//! Each file under `fixtures/scenarios` describes a cart, the rules held by
//! the store and the rounded breakdown the engine must produce.

use testresult::TestResult;

use rebate::fixtures::{Expected, Scenario};

fn assert_scenario(name: &str) -> TestResult {
    let scenario = Scenario::from_set(name)?;
    let breakdown = scenario.price()?.rounded();

    assert_eq!(
        Expected::from_breakdown(&breakdown),
        scenario.expected,
        "scenario {name}"
    );

    Ok(())
}

#[test]
fn stacking() -> TestResult {
    assert_scenario("stacking")
}

#[test]
fn coupon_below_minimum() -> TestResult {
    assert_scenario("coupon_below_minimum")
}

#[test]
fn free_shipping_threshold() -> TestResult {
    assert_scenario("free_shipping_threshold")
}

#[test]
fn max_uses_exhausted() -> TestResult {
    assert_scenario("max_uses_exhausted")
}

#[test]
fn bogo_parity() -> TestResult {
    assert_scenario("bogo_parity")
}

#[test]
fn window_exclusion() -> TestResult {
    assert_scenario("window_exclusion")
}

#[test]
fn whole_cart_fallback() -> TestResult {
    assert_scenario("whole_cart_fallback")
}

#[test]
fn flat_cap() -> TestResult {
    assert_scenario("flat_cap")
}

#[test]
fn mixed_cart() -> TestResult {
    assert_scenario("mixed_cart")
}
