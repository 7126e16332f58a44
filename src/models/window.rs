use crate::domain::Sample;

/// Bounded FIFO of samples backing the chart.
///
/// Insertion order is treated as temporal order; nothing is re-sorted.
#[derive(Debug, Clone)]
pub struct TimeSeriesWindow {
    samples: Vec<Sample>,
    capacity: usize,
}

impl TimeSeriesWindow {
    /// `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn append(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.remove(0);
        }
        self.samples.push(sample);
    }

    pub fn extend<I: IntoIterator<Item = Sample>>(&mut self, samples: I) {
        for sample in samples {
            self.append(sample);
        }
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Current contents, oldest first.
    pub fn snapshot(&self) -> &[Sample] {
        &self.samples
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TimeSeriesWindow {
    fn default() -> Self {
        Self::new(crate::config::CHART.max_samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(n: usize) -> Vec<Sample> {
        (0..n).map(|i| Sample::new(i as i64 * 1000, 100.0 + i as f64)).collect()
    }

    #[test]
    fn length_never_exceeds_capacity() {
        for n in [0, 1, 5, 149, 150, 151, 400] {
            let mut w = TimeSeriesWindow::new(150);
            w.extend(samples(n));
            assert_eq!(w.len(), n.min(150), "n = {}", n);
        }
    }

    #[test]
    fn keeps_most_recent_in_arrival_order() {
        let input = samples(10);
        let mut w = TimeSeriesWindow::new(4);
        w.extend(input.clone());
        assert_eq!(w.snapshot(), &input[6..]);
    }

    #[test]
    fn eviction_is_fifo_one_at_a_time() {
        let mut w = TimeSeriesWindow::new(3);
        w.extend(samples(3));
        w.append(Sample::new(99, 1.0));
        let snap = w.snapshot().to_vec();
        assert_eq!(snap[0].time, 1000);
        assert_eq!(snap[2], Sample::new(99, 1.0));
    }

    #[test]
    fn out_of_order_times_are_not_resorted() {
        let mut w = TimeSeriesWindow::new(5);
        w.append(Sample::new(2000, 1.0));
        w.append(Sample::new(1000, 2.0));
        assert_eq!(w.snapshot()[0].time, 2000);
        assert_eq!(w.latest().map(|s| s.time), Some(1000));
    }

    #[test]
    fn reset_clears_everything() {
        let mut w = TimeSeriesWindow::new(5);
        w.extend(samples(5));
        w.reset();
        assert!(w.is_empty());
        assert!(w.snapshot().is_empty());
        assert_eq!(w.capacity(), 5);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut w = TimeSeriesWindow::new(0);
        w.extend(samples(3));
        assert_eq!(w.len(), 1);
        assert_eq!(w.latest().map(|s| s.time), Some(2000));
    }
}
