//! Folds qualitative signals into the timing confidence

use super::TimingOutcome;
use crate::signals::{Signal, SignalKind, SignalSet};

#[derive(Debug, Clone, Copy)]
pub struct ConfidenceAdjuster {
    /// Confidence change from the SMA crossover
    pub step: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl ConfidenceAdjuster {
    /// Apply `signals` to `outcome`; absent signals leave it unchanged
    ///
    /// RSI and MACD are informational. The SMA crossover moves confidence by
    /// `step`, clamped to `ceiling` when bullish and `floor` otherwise.
    pub fn apply(&self, mut outcome: TimingOutcome, signals: Option<&SignalSet>) -> TimingOutcome {
        let Some(signals) = signals else {
            return outcome;
        };

        for (kind, signal) in signals {
            match kind {
                SignalKind::Rsi => outcome.factors.push(format!("RSI signal: {}", signal)),
                SignalKind::Macd => outcome.factors.push(format!("MACD signal: {}", signal)),
                SignalKind::SmaCrossover => {
                    outcome.factors.push(format!("SMA crossover: {}", signal));
                    outcome.confidence = if *signal == Signal::Bullish {
                        (outcome.confidence + self.step).min(self.ceiling)
                    } else {
                        (outcome.confidence - self.step).max(self.floor)
                    };
                }
                SignalKind::Trend => {}
            }
        }

        outcome
    }
}

impl Default for ConfidenceAdjuster {
    fn default() -> Self {
        Self {
            step: 0.05,
            floor: 0.1,
            ceiling: 0.9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ath::DateRange;
    use chrono::NaiveDate;

    fn outcome(confidence: f64) -> TimingOutcome {
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        TimingOutcome {
            range: DateRange { earliest: d, latest: d },
            confidence,
            factors: vec!["base".to_string()],
        }
    }

    fn signals(pairs: &[(SignalKind, Signal)]) -> SignalSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_absent_signals_unchanged() {
        let adjusted = ConfidenceAdjuster::default().apply(outcome(0.55), None);
        assert_eq!(adjusted, outcome(0.55));
    }

    #[test]
    fn test_informational_signals() {
        let set = signals(&[
            (SignalKind::Rsi, Signal::Overbought),
            (SignalKind::Macd, Signal::Bearish),
            (SignalKind::Trend, Signal::AboveSma50),
        ]);
        let adjusted = ConfidenceAdjuster::default().apply(outcome(0.35), Some(&set));
        assert_eq!(adjusted.confidence, 0.35);
        assert_eq!(
            adjusted.factors,
            vec!["base", "RSI signal: overbought", "MACD signal: bearish"]
        );
    }

    #[test]
    fn test_sma_crossover_moves_confidence() {
        let adjuster = ConfidenceAdjuster::default();
        let bullish = signals(&[(SignalKind::SmaCrossover, Signal::Bullish)]);
        let bearish = signals(&[(SignalKind::SmaCrossover, Signal::Bearish)]);

        let up = adjuster.apply(outcome(0.7), Some(&bullish));
        assert!((up.confidence - 0.75).abs() < 1e-12);
        assert_eq!(up.factors[1], "SMA crossover: bullish");

        let down = adjuster.apply(outcome(0.3), Some(&bearish));
        assert!((down.confidence - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_clamped_to_bounds() {
        let adjuster = ConfidenceAdjuster::default();
        let bullish = signals(&[(SignalKind::SmaCrossover, Signal::Bullish)]);
        let neutral = signals(&[(SignalKind::SmaCrossover, Signal::Neutral)]);

        assert_eq!(adjuster.apply(outcome(0.88), Some(&bullish)).confidence, 0.9);
        assert_eq!(adjuster.apply(outcome(0.12), Some(&neutral)).confidence, 0.1);

        for base in [0.3, 0.35, 0.4, 0.55, 0.7] {
            for set in [&bullish, &neutral] {
                let c = adjuster.apply(outcome(base), Some(set)).confidence;
                assert!((0.1..=0.9).contains(&c));
            }
        }
    }
}
