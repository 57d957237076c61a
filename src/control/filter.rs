//! Double exponential moving average (DEMA) filter.
//!
//! Smooths the raw thermistor reading before it reaches the PID.  A plain
//! EMA lags a ramping signal; DEMA cancels most of that lag by
//! subtracting the EMA of the EMA:
//!
//! ```text
//! ema'      = β·x + (1-β)·ema
//! dema'     = β·x + (1-β)·dema
//! dema_ema' = β·dema' + (1-β)·dema_ema
//! y         = 2·dema' - dema_ema'
//! ```

/// Smoothing coefficient.
pub const BETA: f64 = 0.1;

/// DEMA filter state.  All three accumulators start from the same seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemaFilter {
    ema: f64,
    dema: f64,
    dema_ema: f64,
}

#[inline]
fn ema_step(input: f64, stored: f64) -> f64 {
    BETA * input + (1.0 - BETA) * stored
}

impl DemaFilter {
    pub fn new(initial: f64) -> Self {
        Self {
            ema: initial,
            dema: initial,
            dema_ema: initial,
        }
    }

    /// Re-seed every accumulator (system re-initialisation only).
    pub fn init(&mut self, initial: f64) {
        *self = Self::new(initial);
    }

    /// Feed one raw sample and return the smoothed estimate.
    pub fn update(&mut self, sample: f64) -> f64 {
        self.ema = ema_step(sample, self.ema);
        self.dema = ema_step(sample, self.dema);
        self.dema_ema = ema_step(self.dema, self.dema_ema);
        2.0 * self.dema - self.dema_ema
    }

    /// Plain single EMA of the same input stream.
    pub fn ema(&self) -> f64 {
        self.ema
    }
}
