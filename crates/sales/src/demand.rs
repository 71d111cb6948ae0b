//! Customer demand as a function of the sale price.

use shopsim_core::RandomSource;

/// `demand = max(0, base_demand * (mean_price / price) + noise)`,
/// with `noise` a uniform integer in `[-noise_amplitude, noise_amplitude]`.
///
/// Memoryless: each day's demand depends only on that day's price and draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DemandModel {
    pub base_demand: f64,
    pub mean_price: f64,
    pub noise_amplitude: i64,
}

impl DemandModel {
    pub const STANDARD: DemandModel = DemandModel {
        base_demand: 100.0,
        mean_price: 100.0,
        noise_amplitude: 20,
    };

    pub fn draw_noise<R: RandomSource + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.draw_inclusive(-self.noise_amplitude, self.noise_amplitude)
    }

    /// Deterministic component; strictly decreasing in `price` for `price > 0`.
    pub fn expected(&self, price: f64) -> f64 {
        self.base_demand * (self.mean_price / price)
    }

    /// Realized demand for a given price and noise draw; never negative.
    pub fn demand(&self, price: f64, noise: i64) -> f64 {
        (self.expected(price) + noise as f64).max(0.0)
    }
}

impl Default for DemandModel {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shopsim_core::SeededSource;

    #[test]
    fn demand_at_price_twenty_is_five_hundred_plus_noise() {
        let m = DemandModel::STANDARD;
        assert_eq!(m.demand(20.0, 0), 500.0);
        assert_eq!(m.demand(20.0, -20), 480.0);
        assert_eq!(m.demand(20.0, 20), 520.0);
    }

    #[test]
    fn noise_can_floor_demand_at_zero() {
        let m = DemandModel {
            base_demand: 1.0,
            ..DemandModel::STANDARD
        };
        // 1 * 100 / 50 = 2, minus 20
        assert_eq!(m.demand(50.0, -20), 0.0);
    }

    proptest! {
        #[test]
        fn higher_price_never_raises_expected_demand(a in 10.0f64..=50.0, b in 10.0f64..=50.0) {
            let m = DemandModel::STANDARD;
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(m.expected(hi) <= m.expected(lo));
        }

        #[test]
        fn realized_demand_is_non_negative(seed in any::<u64>(), price in 10.0f64..=50.0) {
            let m = DemandModel::STANDARD;
            let mut rng = SeededSource::new(seed);
            let noise = m.draw_noise(&mut rng);
            prop_assert!((-20..=20).contains(&noise));
            prop_assert!(m.demand(price, noise) >= 0.0);
        }
    }
}
