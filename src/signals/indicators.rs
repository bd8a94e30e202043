//! Moving-average, RSI, and MACD series over close prices
//!
//! Each function returns one entry per input price; warmup entries are `None`.

/// Simple moving average over `period` closes
pub fn sma(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut values = vec![None; closes.len()];
    if period == 0 || closes.len() < period {
        return values;
    }

    let mut sum: f64 = closes[..period].iter().sum();
    values[period - 1] = Some(sum / period as f64);
    for i in period..closes.len() {
        sum += closes[i] - closes[i - period];
        values[i] = Some(sum / period as f64);
    }
    values
}

/// Exponential moving average, k = 2/(n+1), seeded with the first SMA
///
/// This differs from pandas-style `ewm(adjust=False)`, which seeds from the first
/// close. The two converge after a few periods but can disagree near the
/// 30-sample minimum, enough to flip a MACD sign.
pub fn ema(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut values = vec![None; closes.len()];
    if period == 0 || closes.len() < period {
        return values;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = closes[..period].iter().sum::<f64>() / period as f64;
    values[period - 1] = Some(ema);
    for i in period..closes.len() {
        ema = closes[i] * k + ema * (1.0 - k);
        values[i] = Some(ema);
    }
    values
}

/// RSI with Wilder smoothing; first valid value at index `period`
///
/// The averages start from a plain mean of the first `period` changes rather than an
/// exponential average seeded from the first change.
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut values = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return values;
    }

    let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let gain = |c: f64| c.max(0.0);
    let loss = |c: f64| (-c).max(0.0);

    let mut avg_gain = changes[..period].iter().map(|&c| gain(c)).sum::<f64>() / period as f64;
    let mut avg_loss = changes[..period].iter().map(|&c| loss(c)).sum::<f64>() / period as f64;
    values[period] = Some(rsi_value(avg_gain, avg_loss));

    for i in period..changes.len() {
        avg_gain = (avg_gain * (period - 1) as f64 + gain(changes[i])) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + loss(changes[i])) / period as f64;
        values[i + 1] = Some(rsi_value(avg_gain, avg_loss));
    }
    values
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// MACD histogram: (EMA_fast - EMA_slow) minus its `signal`-period EMA
pub fn macd_histogram(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Vec<Option<f64>> {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);
    let line: Vec<Option<f64>> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let mut values = vec![None; closes.len()];
    let Some(first) = line.iter().position(Option::is_some) else {
        return values;
    };
    let dense: Vec<f64> = line[first..].iter().flatten().copied().collect();
    for (offset, sig) in ema(&dense, signal).into_iter().enumerate() {
        if let Some(sig) = sig {
            values[first + offset] = Some(dense[offset] - sig);
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_values() {
        let values = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(values[..2], [None, None]);
        assert_eq!(values[2], Some(2.0));
        assert_eq!(values[4], Some(4.0));
    }

    #[test]
    fn test_ema_seeded_with_sma() {
        let values = ema(&[10.0, 20.0, 30.0, 40.0], 3);
        assert_eq!(values[2], Some(20.0));
        // k = 0.5: 40*0.5 + 20*0.5
        assert_eq!(values[3], Some(30.0));
    }

    #[test]
    fn test_ema_seed_differs_from_first_close_seed() {
        let closes = [10.0, 20.0, 30.0, 40.0];
        // seeded from the first close with k = 0.5: 10, 15, 22.5, 31.25
        let first_close_seeded = closes[1..].iter().fold(closes[0], |e, &c| c * 0.5 + e * 0.5);
        assert_eq!(first_close_seeded, 31.25);
        assert_eq!(ema(&closes, 3)[3], Some(30.0));
    }

    #[test]
    fn test_rsi_extremes() {
        let rising: Vec<f64> = (0..30).map(|i| i as f64).collect();
        assert_eq!(rsi(&rising, 14).last().copied().flatten(), Some(100.0));

        let falling: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        let last = rsi(&falling, 14).last().copied().flatten().unwrap();
        assert!(last.abs() < 1e-9);
        assert!(rsi(&falling, 14)[13].is_none());
    }

    #[test]
    fn test_macd_warmup_and_sign() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let hist = macd_histogram(&closes, 12, 26, 9);
        // slow EMA valid at 25, signal EMA needs 9 more line points
        assert!(hist[32].is_none());
        assert!(hist[33].is_some());
        assert!(hist.last().copied().flatten().unwrap() > 0.0);
    }

    #[test]
    fn test_short_input() {
        assert!(sma(&[1.0], 3).iter().all(Option::is_none));
        assert!(macd_histogram(&[1.0; 10], 12, 26, 9).iter().all(Option::is_none));
    }
}
