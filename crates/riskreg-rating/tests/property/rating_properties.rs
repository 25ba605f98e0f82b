use proptest::prelude::*;
use riskreg_core::models::{Rating, RatingDomain, RatingThreshold};
use riskreg_rating::{RatingCalculator, ThresholdTable};

fn arb_domain() -> impl Strategy<Value = RatingDomain> {
    prop_oneof![
        Just(RatingDomain::Risk),
        Just(RatingDomain::Compliance),
        Just(RatingDomain::ResidualRequest),
    ]
}

/// Strictly descending minimums ending at 1, severities non-increasing.
fn arb_table() -> impl Strategy<Value = Vec<RatingThreshold>> {
    proptest::collection::btree_set(2u8..=25, 0..3).prop_map(|mins| {
        let ratings = [Rating::Critical, Rating::High, Rating::Medium];
        let mut table: Vec<RatingThreshold> = mins
            .into_iter()
            .rev()
            .zip(ratings)
            .map(|(min, rating)| RatingThreshold::new(min, rating))
            .collect();
        table.push(RatingThreshold::new(1, Rating::Low));
        table
    })
}

proptest! {
    #[test]
    fn score_is_product_of_factors(
        domain in arb_domain(),
        likelihood in 1u8..=5,
        impact in 1u8..=5,
    ) {
        let rated = RatingCalculator::default().rate(domain, likelihood, impact).unwrap();
        prop_assert_eq!(rated.score, likelihood * impact);
    }

    #[test]
    fn rating_is_monotonic_in_score(
        domain in arb_domain(),
        a in 1u8..=25,
        b in 1u8..=25,
    ) {
        let calc = RatingCalculator::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(calc.rate_score(domain, lo) <= calc.rate_score(domain, hi));
    }

    #[test]
    fn any_valid_table_is_monotonic(thresholds in arb_table(), a in 1u8..=25, b in 1u8..=25) {
        let table = ThresholdTable::new(RatingDomain::Compliance, thresholds).unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(table.rate(lo) <= table.rate(hi));
    }

    #[test]
    fn out_of_range_always_rejected(likelihood in 6u8..=255, impact in 1u8..=5) {
        let calc = RatingCalculator::default();
        prop_assert!(calc.rate(RatingDomain::Risk, likelihood, impact).is_err());
        prop_assert!(calc.rate(RatingDomain::Risk, impact, likelihood).is_err());
    }
}
