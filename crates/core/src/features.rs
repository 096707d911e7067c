// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Feature generation configuration
//!
//! Closed structures for the feature settings stored on a project. The
//! backend accepts open-ended dictionaries here; keeping the fields named
//! and exhaustive makes the "features configured" predicate checkable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Date-derived feature toggles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFeatures {
    pub month: bool,
    pub year: bool,
    pub quarter: bool,
    pub month_sin: bool,
    pub month_cos: bool,
    pub quarter_sin: bool,
    pub quarter_cos: bool,
    pub number_of_holidays_governmental: bool,
    pub number_of_holidays_religious: bool,
    pub periods_until_next_governmental_holiday: bool,
    pub periods_until_next_religious_holiday: bool,
    pub number_of_ramadan_days_in_month: bool,
}

impl DateFeatures {
    /// True when at least one date feature is enabled.
    ///
    /// Destructured so adding a flag without counting it here fails to
    /// compile.
    pub fn any_enabled(&self) -> bool {
        let Self {
            month,
            year,
            quarter,
            month_sin,
            month_cos,
            quarter_sin,
            quarter_cos,
            number_of_holidays_governmental,
            number_of_holidays_religious,
            periods_until_next_governmental_holiday,
            periods_until_next_religious_holiday,
            number_of_ramadan_days_in_month,
        } = self;
        *month
            || *year
            || *quarter
            || *month_sin
            || *month_cos
            || *quarter_sin
            || *quarter_cos
            || *number_of_holidays_governmental
            || *number_of_holidays_religious
            || *periods_until_next_governmental_holiday
            || *periods_until_next_religious_holiday
            || *number_of_ramadan_days_in_month
    }
}

/// Numerical feature configuration: period sets plus toggles
///
/// The toggles qualify how rolling and trend features are generated; only
/// the period sets decide whether the configuration counts as non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericalFeatures {
    pub lag_periods: BTreeSet<u32>,
    pub rolling_windows: BTreeSet<u32>,
    pub trend_periods: BTreeSet<u32>,
    pub change_periods: BTreeSet<u32>,
    pub include_statistics: bool,
    pub include_trend_features: bool,
}

impl NumericalFeatures {
    /// True when no periods are configured
    pub fn is_empty(&self) -> bool {
        self.lag_periods.is_empty()
            && self.rolling_windows.is_empty()
            && self.trend_periods.is_empty()
            && self.change_periods.is_empty()
    }

    /// All configured periods, for validation
    pub fn periods(&self) -> impl Iterator<Item = u32> + '_ {
        self.lag_periods
            .iter()
            .chain(&self.rolling_windows)
            .chain(&self.trend_periods)
            .chain(&self.change_periods)
            .copied()
    }
}

/// The generate-features request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturePlan {
    pub date_features: DateFeatures,
    pub numerical_features: NumericalFeatures,
}

impl FeaturePlan {
    /// True when the plan would generate nothing
    pub fn is_empty(&self) -> bool {
        !self.date_features.any_enabled() && self.numerical_features.is_empty()
    }
}

/// Period the main series is aggregated to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPeriod {
    DailyToWeekly,
    DailyToMonthly,
    WeeklyToMonthly,
}

impl AggregationPeriod {
    pub fn name(&self) -> &'static str {
        match self {
            AggregationPeriod::DailyToWeekly => "daily_to_weekly",
            AggregationPeriod::DailyToMonthly => "daily_to_monthly",
            AggregationPeriod::WeeklyToMonthly => "weekly_to_monthly",
        }
    }
}

/// Function applied to the main value column when aggregating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationFunction {
    Sum,
    Mean,
    Min,
    Max,
}

impl AggregationFunction {
    pub fn name(&self) -> &'static str {
        match self {
            AggregationFunction::Sum => "sum",
            AggregationFunction::Mean => "mean",
            AggregationFunction::Min => "min",
            AggregationFunction::Max => "max",
        }
    }
}

/// Stored aggregation choice for the extended flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    pub period: AggregationPeriod,
    pub main_value_aggregation: AggregationFunction,
}

#[cfg(test)]
#[path = "features_tests.rs"]
mod tests;
