// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

use super::*;
use serde_json::json;

#[test]
fn default_date_features_have_nothing_enabled() {
    assert!(!DateFeatures::default().any_enabled());
}

#[test]
fn single_flag_counts_as_enabled() {
    let features = DateFeatures {
        quarter_cos: true,
        ..DateFeatures::default()
    };
    assert!(features.any_enabled());
}

#[test]
fn numerical_features_empty_without_periods() {
    // Toggles alone do not make the configuration non-empty.
    let features = NumericalFeatures {
        include_statistics: true,
        include_trend_features: true,
        ..NumericalFeatures::default()
    };
    assert!(features.is_empty());
}

#[test]
fn numerical_features_non_empty_with_any_period_set() {
    let features = NumericalFeatures {
        change_periods: BTreeSet::from([1, 12]),
        ..NumericalFeatures::default()
    };
    assert!(!features.is_empty());
    assert_eq!(features.periods().collect::<Vec<_>>(), vec![1, 12]);
}

#[test]
fn plan_is_empty_only_when_both_halves_are() {
    assert!(FeaturePlan::default().is_empty());

    let plan = FeaturePlan {
        date_features: DateFeatures {
            month: true,
            ..DateFeatures::default()
        },
        numerical_features: NumericalFeatures::default(),
    };
    assert!(!plan.is_empty());
}

#[test]
fn plan_serializes_with_wire_names() {
    let plan = FeaturePlan {
        date_features: DateFeatures {
            month: true,
            ..DateFeatures::default()
        },
        numerical_features: NumericalFeatures {
            lag_periods: BTreeSet::from([1, 7]),
            ..NumericalFeatures::default()
        },
    };

    let body = serde_json::to_value(&plan).unwrap();
    assert_eq!(body["date_features"]["month"], json!(true));
    assert_eq!(body["numerical_features"]["lag_periods"], json!([1, 7]));
}

#[test]
fn aggregation_config_round_trips_snake_case() {
    let config = AggregationConfig {
        period: AggregationPeriod::DailyToMonthly,
        main_value_aggregation: AggregationFunction::Mean,
    };

    let body = serde_json::to_value(config).unwrap();
    assert_eq!(body["period"], json!("daily_to_monthly"));
    assert_eq!(body["main_value_aggregation"], json!("mean"));

    let back: AggregationConfig = serde_json::from_value(body).unwrap();
    assert_eq!(back, config);
}

#[test]
fn unknown_feature_flags_are_ignored() {
    // Older backends may send extra keys; decoding stays tolerant.
    let features: DateFeatures = serde_json::from_value(json!({
        "month": true,
        "day_of_week": true
    }))
    .unwrap();
    assert!(features.month);
}
