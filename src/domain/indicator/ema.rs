//! Exponential moving average seeded at the first sample.
//!
//! k = 2/(n+1), EMA[0] = C[0], then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Unlike an SMA-seeded EMA there is no warmup gap; the seed bias decays
//! geometrically. MACD depends on this seeding.

/// Full-length EMA of `values`. Empty input or a zero period yields an
/// empty vector.
pub fn ema_seeded(values: &[f64], period: usize) -> Vec<f64> {
    let Some(&seed) = values.first() else {
        return Vec::new();
    };
    if period == 0 {
        return Vec::new();
    }

    let k = smoothing_factor(period);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = seed;
    out.push(ema);
    for &v in &values[1..] {
        ema = v * k + ema * (1.0 - k);
        out.push(ema);
    }
    out
}

/// 2/(n+1)
pub fn smoothing_factor(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}
