use fintoolbox_core::interest::{
    compute_compound_interest, compute_interest_series, compute_simple_interest, project_interest,
    projection::InterestInput,
};
use fintoolbox_core::FinToolboxError;
use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixed scenarios
// ===========================================================================

fn million_at_three_percent() -> InterestInput {
    InterestInput {
        principal: dec!(1_000_000),
        simple_rate: dec!(0.03),
        compound_rate: dec!(0.03),
        years: 10,
    }
}

#[test]
fn test_ten_year_projection_final_amounts() {
    let out = project_interest(&million_at_three_percent()).unwrap();
    let series = &out.result;

    // 1.03^10 = 1.3439163793...
    assert_eq!(series.final_compound_amount, dec!(1_343_916.38));
    assert_eq!(series.final_simple_amount, dec!(1_300_000.00));
    assert_eq!(series.difference, dec!(43_916.38));
    assert_eq!(series.simple.len(), 11);
    assert_eq!(series.compound.len(), 11);
    assert!(out.warnings.is_empty());
}

#[test]
fn test_series_starts_at_principal_and_ends_at_final() {
    let series = compute_interest_series(dec!(25_000), dec!(0.04), dec!(0.05), 7).unwrap();
    assert_eq!(series.simple[0].year, 0);
    assert_eq!(series.simple[0].amount, dec!(25_000));
    assert_eq!(series.compound[0].amount, dec!(25_000));
    assert_eq!(series.simple.last().unwrap().amount, series.final_simple_amount);
    assert_eq!(series.compound.last().unwrap().amount, series.final_compound_amount);
    assert!(series
        .compound
        .windows(2)
        .all(|w| w[1].year == w[0].year + 1 && w[1].amount > w[0].amount));
}

#[test]
fn test_zero_years_series_is_principal_only() {
    let series = compute_interest_series(dec!(5_000), dec!(0.05), dec!(0.05), 0).unwrap();
    assert_eq!(series.simple.len(), 1);
    assert_eq!(series.final_simple_amount, dec!(5_000));
    assert_eq!(series.final_compound_amount, dec!(5_000));
    assert_eq!(series.difference, Decimal::ZERO);
}

#[test]
fn test_formulas_are_unrounded() {
    assert_eq!(
        compute_simple_interest(dec!(1000), dec!(0.035), 3).unwrap(),
        dec!(1105.000)
    );
    assert_eq!(
        compute_compound_interest(dec!(1000), dec!(0.05), 2).unwrap(),
        dec!(1102.5000)
    );
}

#[test]
fn test_higher_simple_rate_produces_warning() {
    let input = InterestInput {
        principal: dec!(10_000),
        simple_rate: dec!(0.10),
        compound_rate: dec!(0.02),
        years: 5,
    };
    let out = project_interest(&input).unwrap();
    assert!(out.result.difference < Decimal::ZERO);
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_projection_rejects_first_bad_field() {
    let mut input = million_at_three_percent();
    input.principal = dec!(500);
    input.years = 0;
    match project_interest(&input) {
        Err(FinToolboxError::InvalidInput { field, .. }) => assert_eq!(field, "principal"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }

    let mut input = million_at_three_percent();
    input.years = 51;
    match project_interest(&input) {
        Err(FinToolboxError::InvalidInput { field, .. }) => assert_eq!(field, "years"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn compound_never_trails_simple_at_equal_rates(
        principal in 1_000u64..=100_000_000,
        rate_bps in 1i64..=5_000,
        years in 1u32..=50,
    ) {
        let rate = Decimal::new(rate_bps, 4);
        let series = compute_interest_series(Decimal::from(principal), rate, rate, years).unwrap();
        prop_assert!(series.final_compound_amount >= series.final_simple_amount - dec!(0.01));
        prop_assert!(series.difference >= dec!(-0.01));
        prop_assert_eq!(series.simple.len(), years as usize + 1);
    }

    #[test]
    fn year_zero_is_always_principal(
        principal in 1_000u64..=100_000_000,
        rate_bps in 1i64..=5_000,
    ) {
        let p = Decimal::from(principal);
        let rate = Decimal::new(rate_bps, 4);
        prop_assert_eq!(compute_simple_interest(p, rate, 0).unwrap(), p);
        prop_assert_eq!(compute_compound_interest(p, rate, 0).unwrap(), p);
    }

    #[test]
    fn methods_agree_after_one_year_then_compound_pulls_ahead(
        principal in 1_000u64..=100_000_000,
        rate_bps in 1i64..=5_000,
        years in 2u32..=50,
    ) {
        let p = Decimal::from(principal);
        let rate = Decimal::new(rate_bps, 4);
        let series = compute_interest_series(p, rate, rate, years).unwrap();
        prop_assert!((series.compound[1].amount - series.simple[1].amount).abs() <= dec!(0.01));
        prop_assert!(
            compute_compound_interest(p, rate, years).unwrap()
                > compute_simple_interest(p, rate, years).unwrap()
        );
    }
}
