//! Periodic fixed-amount purchase simulation over a projected price path
//!
//! Purchase prices inside a year are linearly interpolated between the two
//! yearly anchors. This is a smoothing approximation, not a simulated path.

use super::model::{PriceBand, PricePathProjection};
use crate::config::DAYS_PER_YEAR;
use crate::error::ForecastError;
use crate::stats::round_to;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Purchase cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    pub fn days_per_period(&self) -> u32 {
        match self {
            Frequency::Daily => 1,
            Frequency::Weekly => 7,
            Frequency::Biweekly => 14,
            Frequency::Monthly => 30,
        }
    }

    /// Purchases per simulated year; fractional periods are dropped (weekly: 52, not 52.14)
    pub fn periods_per_year(&self) -> u32 {
        DAYS_PER_YEAR / self.days_per_period()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(ForecastError::invalid_request(
                "frequency",
                format!("expected daily|weekly|biweekly|monthly, got {:?}", other),
            )),
        }
    }
}

/// End-of-year portfolio snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year: u32,
    pub total_invested: f64,
    pub portfolio_value_low: f64,
    pub portfolio_value_mid: f64,
    pub portfolio_value_high: f64,
    /// Units accumulated on the mid path
    pub units_held: f64,
    pub price_low: f64,
    pub price_mid: f64,
    pub price_high: f64,
}

/// Running totals across the simulation
#[derive(Debug, Clone, Default)]
struct Holdings {
    invested: f64,
    units_low: f64,
    units_mid: f64,
    units_high: f64,
}

impl Holdings {
    fn buy(&mut self, amount: f64, price: &PriceBand) {
        self.invested += amount;
        self.units_low += amount / price.low;
        self.units_mid += amount / price.mid;
        self.units_high += amount / price.high;
    }

    fn snapshot(&self, year: u32, end: &PriceBand) -> ProjectionPoint {
        ProjectionPoint {
            year,
            total_invested: round_to(self.invested, 2),
            portfolio_value_low: round_to(self.units_low * end.low, 2),
            portfolio_value_mid: round_to(self.units_mid * end.mid, 2),
            portfolio_value_high: round_to(self.units_high * end.high, 2),
            units_held: round_to(self.units_mid, 6),
            price_low: round_to(end.low, 2),
            price_mid: round_to(end.mid, 2),
            price_high: round_to(end.high, 2),
        }
    }
}

/// DCA simulator for one request
#[derive(Debug, Clone, Copy)]
pub struct DcaSimulator {
    pub amount_per_period: f64,
    pub frequency: Frequency,
    pub duration_years: u32,
}

impl DcaSimulator {
    pub fn new(amount_per_period: f64, frequency: Frequency, duration_years: u32) -> Self {
        Self {
            amount_per_period,
            frequency,
            duration_years,
        }
    }

    /// Run the simulation starting from `current_price`
    pub fn simulate(&self, current_price: f64, projection: &PricePathProjection) -> Vec<ProjectionPoint> {
        let periods = self.frequency.periods_per_year();
        let mut holdings = Holdings::default();
        let mut points = Vec::with_capacity(self.duration_years as usize);
        let mut start = PriceBand::flat(current_price);

        for year in 1..=self.duration_years {
            let Some(&end) = projection.year(year) else {
                warn!(
                    "projection covers {} years, simulation asked for {}",
                    projection.years(),
                    self.duration_years
                );
                break;
            };

            for i in 0..periods {
                let frac = (i + 1) as f64 / periods as f64;
                holdings.buy(self.amount_per_period, &interpolate(&start, &end, frac));
            }

            points.push(holdings.snapshot(year, &end));
            start = end;
        }

        points
    }
}

fn interpolate(start: &PriceBand, end: &PriceBand, frac: f64) -> PriceBand {
    PriceBand {
        low: start.low + frac * (end.low - start.low),
        mid: start.mid + frac * (end.mid - start.mid),
        high: start.high + frac * (end.high - start.high),
    }
}
