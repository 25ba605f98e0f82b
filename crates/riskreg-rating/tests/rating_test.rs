use riskreg_core::config::RatingConfig;
use riskreg_core::errors::RiskRegError;
use riskreg_core::models::{Rating, RatingDomain, RatingThreshold};
use riskreg_rating::{compute_rating, RatingCalculator, ThresholdTable};

#[test]
fn five_by_five_is_top_bucket_for_risk_domain() {
    let calc = RatingCalculator::default();
    let rated = calc.rate(RatingDomain::Risk, 5, 5).unwrap();
    assert_eq!(rated.score, 25);
    assert_eq!(rated.rating, Rating::Critical);
}

#[test]
fn same_score_rates_differently_per_domain() {
    let calc = RatingCalculator::default();
    // Score 16: critical for compliance, high elsewhere.
    assert_eq!(calc.rate_score(RatingDomain::Compliance, 16), Rating::Critical);
    assert_eq!(calc.rate_score(RatingDomain::Risk, 16), Rating::High);
    assert_eq!(calc.rate_score(RatingDomain::ResidualRequest, 16), Rating::High);
    // Score 12: high for risk, medium for residual requests.
    assert_eq!(calc.rate_score(RatingDomain::Risk, 12), Rating::High);
    assert_eq!(calc.rate_score(RatingDomain::ResidualRequest, 12), Rating::Medium);
}

#[test]
fn out_of_range_factors_fail_validation() {
    let calc = RatingCalculator::default();
    for (l, i) in [(0, 1), (1, 0), (6, 3), (3, 6)] {
        let err = calc.rate(RatingDomain::Risk, l, i).unwrap_err();
        assert!(matches!(err, RiskRegError::OutOfRange { .. }), "({l}, {i})");
    }
}

#[test]
fn calculator_uses_configured_tables() {
    let mut config = RatingConfig::default();
    config.risk = vec![
        RatingThreshold::new(10, Rating::High),
        RatingThreshold::new(1, Rating::Low),
    ];
    let calc = RatingCalculator::from_config(&config).unwrap();
    assert_eq!(calc.rate(RatingDomain::Risk, 2, 5).unwrap().rating, Rating::High);
    assert_eq!(calc.rate(RatingDomain::Risk, 3, 3).unwrap().rating, Rating::Low);
}

#[test]
fn invalid_configured_table_is_rejected() {
    let mut config = RatingConfig::default();
    config.residual_request = vec![RatingThreshold::new(10, Rating::High)];
    assert!(RatingCalculator::from_config(&config).is_err());
}

#[test]
fn assess_carries_factors() {
    let calc = RatingCalculator::default();
    let a = calc.assess(RatingDomain::Risk, 2, 4).unwrap();
    assert_eq!((a.likelihood, a.impact, a.score, a.rating), (2, 4, 8, Rating::Medium));
}

#[test]
fn free_function_matches_calculator() {
    let table = ThresholdTable::new(
        RatingDomain::Compliance,
        RatingConfig::default().compliance,
    )
    .unwrap();
    let calc = RatingCalculator::default();
    for l in 1..=5 {
        for i in 1..=5 {
            assert_eq!(
                compute_rating(&table, l, i).unwrap(),
                calc.rate(RatingDomain::Compliance, l, i).unwrap()
            );
        }
    }
}

#[test]
fn golden_default_tables() {
    let calc = RatingCalculator::default();
    for case in test_fixtures::rating_cases() {
        let rated = calc
            .rate(case.domain, case.likelihood, case.impact)
            .unwrap();
        assert_eq!(
            (rated.score, rated.rating),
            (case.expected_score, case.expected_rating),
            "{} {}x{}",
            case.domain,
            case.likelihood,
            case.impact
        );
    }
}
