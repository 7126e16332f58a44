use rand::Rng;

use crate::config::CHART;
use crate::domain::Sample;

/// Random-walk history for an instrument without a live feed.
///
/// Produces exactly `CHART.max_samples` samples spaced
/// `CHART.synthetic.step_interval_ms` apart and ending at `now_ms`. The walk
/// starts slightly below `reference_price`, drifts upward on average, and the
/// final sample is `reference_price` itself.
pub fn synthetic_backfill<R: Rng>(
    reference_price: f64,
    now_ms: i64,
    rng: &mut R,
) -> Vec<Sample> {
    synthetic_walk(CHART.max_samples, reference_price, now_ms, rng)
}

pub fn synthetic_walk<R: Rng>(
    count: usize,
    reference_price: f64,
    now_ms: i64,
    rng: &mut R,
) -> Vec<Sample> {
    if count == 0 {
        return Vec::new();
    }
    let cfg = &CHART.synthetic;
    let steps = count - 1;
    let mut samples = Vec::with_capacity(count);

    let mut price = reference_price * cfg.start_factor;
    for i in 0..steps {
        let change = (rng.r#gen::<f64>() - cfg.drift_bias) * cfg.max_step_pct;
        price *= 1.0 + change;
        let time = now_ms - (steps - i) as i64 * cfg.step_interval_ms;
        samples.push(Sample::new(time, price));
    }
    samples.push(Sample::new(now_ms, reference_price));
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn fills_the_window_and_ends_on_reference() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = synthetic_backfill(50.0, 1_700_000_000_000, &mut rng);
        assert_eq!(samples.len(), CHART.max_samples);
        let last = samples.last().unwrap();
        assert_eq!(last.price, 50.0);
        assert_eq!(last.time, 1_700_000_000_000);
    }

    #[test]
    fn steps_are_bounded_and_evenly_spaced() {
        let mut rng = StdRng::seed_from_u64(42);
        let samples = synthetic_backfill(100.0, 10_000_000, &mut rng);
        let walk = &samples[..samples.len() - 1];
        assert!((walk[0].price / 98.0 - 1.0).abs() <= CHART.synthetic.max_step_pct);
        for pair in walk.windows(2) {
            let step = pair[1].price / pair[0].price - 1.0;
            assert!(step.abs() <= CHART.synthetic.max_step_pct, "{}", step);
        }
        for pair in samples.windows(2) {
            assert_eq!(pair[1].time - pair[0].time, CHART.synthetic.step_interval_ms);
        }
    }

    #[test]
    fn same_seed_same_walk() {
        let a = synthetic_backfill(27.85, 0, &mut StdRng::seed_from_u64(1));
        let b = synthetic_backfill(27.85, 0, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn tiny_counts() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(synthetic_walk(0, 1.0, 0, &mut rng).is_empty());
        assert_eq!(synthetic_walk(1, 1.0, 5, &mut rng), vec![Sample::new(5, 1.0)]);
    }
}
