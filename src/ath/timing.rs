//! Asset-class-specific timing heuristics for the next ATH

use super::AthEvent;
use crate::asset::AssetClass;
use crate::config::ForecastConfig;
use crate::stats::mean;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Estimated days to the next ATH when fewer than two events exist
const DEFAULT_INTERVAL_DAYS: f64 = 365.0;

/// Expected window for the next ATH
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

/// Inputs shared by every timing heuristic
#[derive(Debug, Clone, Copy)]
pub struct TimingInput<'a> {
    pub now: DateTime<Utc>,
    pub events: &'a [AthEvent],
    pub current_price: f64,
    pub current_ath: f64,
}

/// Date window, base confidence, and the reasons behind them
#[derive(Debug, Clone, PartialEq)]
pub struct TimingOutcome {
    pub range: DateRange,
    pub confidence: f64,
    pub factors: Vec<String>,
}

/// Timing heuristic, selected by asset class
#[derive(Debug, Clone, PartialEq)]
pub enum TimingStrategy {
    /// Flagship crypto: ATH historically 12-18 months after a halving
    HalvingCycle {
        /// Halving dates, ascending
        halvings: Vec<NaiveDate>,
    },
    /// Other crypto: loosely follows the flagship cycle
    FollowsFlagship,
    /// Traditional: average spacing of past ATH events
    IntervalRecovery,
}

impl TimingStrategy {
    pub fn for_class(class: AssetClass, config: &ForecastConfig) -> Self {
        match class {
            AssetClass::FlagshipCrypto => {
                let mut halvings = config.halving_dates.clone();
                halvings.sort();
                TimingStrategy::HalvingCycle { halvings }
            }
            AssetClass::Crypto => TimingStrategy::FollowsFlagship,
            AssetClass::Traditional => TimingStrategy::IntervalRecovery,
        }
    }

    pub fn predict(&self, input: &TimingInput<'_>) -> TimingOutcome {
        match self {
            TimingStrategy::HalvingCycle { halvings } => halving_cycle(halvings, input.now),
            TimingStrategy::FollowsFlagship => follows_flagship(input.now),
            TimingStrategy::IntervalRecovery => interval_recovery(input),
        }
    }
}

fn halving_cycle(halvings: &[NaiveDate], now: DateTime<Utc>) -> TimingOutcome {
    let last = halvings
        .iter()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .filter(|h| *h < now)
        .max();

    let Some(last) = last else {
        return TimingOutcome {
            range: range(now + Duration::days(365), now + Duration::days(730)),
            confidence: 0.3,
            factors: vec!["No past halving data available".to_string()],
        };
    };

    let mut factors = vec![
        format!(
            "Last BTC halving: {} ({} days ago)",
            last.date_naive(),
            (now - last).num_days()
        ),
        "Historical pattern: ATH typically 12-18 months post-halving".to_string(),
    ];

    let mut target_start = last + Duration::days(365);
    let mut target_end = last + Duration::days(550);

    let confidence = if now < target_start {
        factors.push("Still in early post-halving accumulation phase".to_string());
        0.55
    } else if now < target_end {
        factors.push("Currently in historical ATH window (12-18 months post-halving)".to_string());
        0.7
    } else {
        factors.push("Past typical ATH window - extended cycle possible".to_string());
        target_start = now + Duration::days(60);
        target_end = now + Duration::days(365);
        0.4
    };

    TimingOutcome {
        range: range(
            target_start.max(now + Duration::days(30)),
            target_end.max(now + Duration::days(180)),
        ),
        confidence,
        factors,
    }
}

fn follows_flagship(now: DateTime<Utc>) -> TimingOutcome {
    TimingOutcome {
        range: range(now + Duration::days(90), now + Duration::days(730)),
        confidence: 0.35,
        factors: vec!["Crypto markets tend to follow BTC cycle patterns".to_string()],
    }
}

fn interval_recovery(input: &TimingInput<'_>) -> TimingOutcome {
    let intervals: Vec<f64> = input
        .events
        .windows(2)
        .map(|w| days_between(w[0].timestamp, w[1].timestamp))
        .collect();
    // without an interval to measure, the estimate is a flat year from now
    let est_days = match (mean(&intervals), input.events.last()) {
        (Some(avg_interval), Some(last)) => (avg_interval - days_between(last.timestamp, input.now)).max(30.0),
        _ => DEFAULT_INTERVAL_DAYS,
    };

    let mut factors = vec!["Based on historical ATH interval analysis".to_string()];
    let pct = if input.current_ath > 0.0 {
        (input.current_ath - input.current_price) / input.current_ath * 100.0
    } else {
        0.0
    };

    let confidence = if pct < 5.0 {
        factors.push(format!("Price is within {:.1}% of ATH", pct));
        0.7
    } else if pct < 15.0 {
        factors.push(format!("Price is {:.1}% below ATH", pct));
        0.55
    } else {
        factors.push(format!("Price is {:.1}% below ATH - significant recovery needed", pct));
        0.3
    };

    TimingOutcome {
        range: range(
            add_days(input.now, est_days * 0.5),
            add_days(input.now, est_days * 1.5),
        ),
        confidence,
        factors,
    }
}

fn range(earliest: DateTime<Utc>, latest: DateTime<Utc>) -> DateRange {
    DateRange {
        earliest: earliest.date_naive(),
        latest: latest.date_naive(),
    }
}

fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_DAY
}

fn add_days(t: DateTime<Utc>, days: f64) -> DateTime<Utc> {
    t + Duration::milliseconds((days * MS_PER_DAY).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(now: DateTime<Utc>, events: &[AthEvent], price: f64, ath: f64) -> TimingInput<'_> {
        TimingInput {
            now,
            events,
            current_price: price,
            current_ath: ath,
        }
    }

    fn halving() -> TimingStrategy {
        TimingStrategy::for_class(AssetClass::FlagshipCrypto, &ForecastConfig::default())
    }

    #[test]
    fn test_strategy_per_class() {
        let config = ForecastConfig::default();
        assert!(matches!(halving(), TimingStrategy::HalvingCycle { .. }));
        assert_eq!(TimingStrategy::for_class(AssetClass::Crypto, &config), TimingStrategy::FollowsFlagship);
        assert_eq!(
            TimingStrategy::for_class(AssetClass::Traditional, &config),
            TimingStrategy::IntervalRecovery
        );
    }

    #[test]
    fn test_early_post_halving() {
        let outcome = halving().predict(&input(at(2025, 1, 20), &[], 1.0, 1.0));
        assert_eq!(outcome.confidence, 0.55);
        assert!(outcome.factors[0].starts_with("Last BTC halving: 2024-04-20"));
        assert!(outcome.factors[2].contains("early post-halving"));
        assert_eq!(outcome.range.earliest, date(2025, 4, 20));
        assert_eq!(outcome.range.latest, date(2025, 10, 22));
    }

    #[test]
    fn test_within_halving_window() {
        let outcome = halving().predict(&input(at(2025, 6, 1), &[], 1.0, 1.0));
        assert_eq!(outcome.confidence, 0.7);
        // target start already passed, clamped to now + 30d
        assert_eq!(outcome.range.earliest, date(2025, 7, 1));
        // target end 2025-10-22 is before now + 180d
        assert_eq!(outcome.range.latest, date(2025, 11, 28));
    }

    #[test]
    fn test_past_halving_window() {
        let outcome = halving().predict(&input(at(2026, 3, 1), &[], 1.0, 1.0));
        assert_eq!(outcome.confidence, 0.4);
        assert!(outcome.factors[2].contains("extended cycle"));
        assert_eq!(outcome.range.earliest, date(2026, 4, 30));
        assert_eq!(outcome.range.latest, date(2027, 3, 1));
    }

    #[test]
    fn test_no_past_halving() {
        let outcome = halving().predict(&input(at(2011, 1, 1), &[], 1.0, 1.0));
        assert_eq!(outcome.confidence, 0.3);
        assert_eq!(outcome.factors, vec!["No past halving data available".to_string()]);
        assert_eq!(outcome.range.earliest, date(2012, 1, 1));
        assert_eq!(outcome.range.latest, date(2012, 12, 31));
    }

    #[test]
    fn test_follows_flagship_fixed_window() {
        let now = at(2025, 1, 1);
        let outcome = TimingStrategy::FollowsFlagship.predict(&input(now, &[], 1.0, 2.0));
        assert_eq!(outcome.confidence, 0.35);
        assert_eq!(outcome.range.earliest, date(2025, 4, 1));
        assert_eq!(outcome.range.latest, date(2027, 1, 1));
    }

    #[test]
    fn test_interval_recovery_near_ath() {
        let now = at(2025, 1, 1);
        let events = [
            AthEvent { price: 80.0, timestamp: now - Duration::days(500) },
            AthEvent { price: 90.0, timestamp: now - Duration::days(300) },
            AthEvent { price: 100.0, timestamp: now - Duration::days(100) },
        ];
        let outcome = TimingStrategy::IntervalRecovery.predict(&input(now, &events, 98.0, 100.0));

        assert_eq!(outcome.confidence, 0.7);
        assert_eq!(outcome.factors[1], "Price is within 2.0% of ATH");
        // avg interval 200, 100 days since last -> est 100
        assert_eq!(outcome.range.earliest, (now + Duration::days(50)).date_naive());
        assert_eq!(outcome.range.latest, (now + Duration::days(150)).date_naive());
    }

    #[test]
    fn test_interval_recovery_confidence_tiers() {
        let now = at(2025, 1, 1);
        let mid = TimingStrategy::IntervalRecovery.predict(&input(now, &[], 90.0, 100.0));
        assert_eq!(mid.confidence, 0.55);
        assert_eq!(mid.factors[1], "Price is 10.0% below ATH");

        let far = TimingStrategy::IntervalRecovery.predict(&input(now, &[], 50.0, 100.0));
        assert_eq!(far.confidence, 0.3);
        assert!(far.factors[1].ends_with("significant recovery needed"));
    }

    #[test]
    fn test_interval_recovery_floor() {
        let now = at(2025, 1, 1);
        // avg interval 100, last event 300 days ago -> floored at 30
        let events = [
            AthEvent { price: 9.0, timestamp: now - Duration::days(400) },
            AthEvent { price: 10.0, timestamp: now - Duration::days(300) },
        ];
        let outcome = TimingStrategy::IntervalRecovery.predict(&input(now, &events, 9.0, 10.0));
        assert_eq!(outcome.range.earliest, (now + Duration::days(15)).date_naive());
        assert_eq!(outcome.range.latest, (now + Duration::days(45)).date_naive());
    }

    #[test]
    fn test_interval_recovery_single_event_uses_flat_year() {
        let now = at(2025, 1, 1);
        let events = [AthEvent { price: 10.0, timestamp: now - Duration::days(1000) }];
        let single = TimingStrategy::IntervalRecovery.predict(&input(now, &events, 6.0, 10.0));
        assert_eq!(single.range.earliest, add_days(now, 182.5).date_naive());
        assert_eq!(single.range.latest, add_days(now, 547.5).date_naive());

        let none = TimingStrategy::IntervalRecovery.predict(&input(now, &[], 6.0, 10.0));
        assert_eq!(none.range, single.range);
    }
}
