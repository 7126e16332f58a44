//! Data space (sample index, price) to pixel space.
//!
//! Every division in here has an explicit guard: window lengths of 0 or 1,
//! flat price series and surfaces smaller than their padding all map to
//! well-defined pixels instead of NaN or infinity.

use itertools::{Itertools, MinMaxResult};

use crate::config::Padding;
use crate::domain::Sample;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Visible price range. Always satisfies `min < max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBounds {
    min: f64,
    max: f64,
}

impl PriceBounds {
    /// Bounds over `prices` plus any `reference_levels`, widened by `padding_pct`
    /// of the data range on each side. A flat series uses a range of 1.
    /// Returns `None` when there is nothing finite to bound.
    pub fn from_prices<I>(prices: I, reference_levels: &[f64], padding_pct: f64) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let (min_data, max_data) = match prices
            .into_iter()
            .chain(reference_levels.iter().copied())
            .filter(|p| p.is_finite())
            .minmax_by(|a, b| a.total_cmp(b))
        {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(p) => (p, p),
            MinMaxResult::MinMax(lo, hi) => (lo, hi),
        };

        let diff = max_data - min_data;
        let range = if diff > 0.0 { diff } else { 1.0 };
        let pad = range * padding_pct.max(0.0);

        let (min, max) = (min_data - pad, max_data + pad);
        if max > min {
            Some(Self { min, max })
        } else {
            // Padding of zero on a flat series.
            Some(Self {
                min: min_data - 0.5,
                max: max_data + 0.5,
            })
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Strictly positive.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Price at `fraction` of the way down from the top (0.0 = max, 1.0 = min).
    pub fn price_at_fraction_from_top(&self, fraction: f64) -> f64 {
        self.max - self.range() * fraction
    }
}

/// Horizontal pixel for sample `index` in a window of `window_len` samples.
pub fn map_x(index: usize, window_len: usize, surface_width: f32, padding: &Padding) -> f32 {
    if window_len <= 1 {
        return padding.left;
    }
    let plot_width = plot_extent(surface_width, padding.left, padding.right);
    padding.left + (index as f32 / (window_len - 1) as f32) * plot_width
}

/// Vertical pixel for `price`. Higher prices map to smaller y.
pub fn map_y(price: f64, bounds: &PriceBounds, surface_height: f32, padding: &Padding) -> f32 {
    let plot_height = plot_extent(surface_height, padding.top, padding.bottom) as f64;
    padding.top + ((bounds.max - price) / bounds.range() * plot_height) as f32
}

fn plot_extent(total: f32, lead: f32, trail: f32) -> f32 {
    (total - lead - trail).max(0.0)
}

/// Mapping for one frame: a window length, a surface and (if there is data) price bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    size: SurfaceSize,
    padding: Padding,
    len: usize,
    bounds: Option<PriceBounds>,
}

impl CoordinateMapper {
    pub fn new(
        samples: &[Sample],
        reference_levels: &[f64],
        size: SurfaceSize,
        padding: Padding,
        price_padding_pct: f64,
    ) -> Self {
        let bounds = PriceBounds::from_prices(
            samples.iter().map(|s| s.price),
            reference_levels,
            price_padding_pct,
        );
        Self {
            size,
            padding,
            len: samples.len(),
            bounds,
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn padding(&self) -> &Padding {
        &self.padding
    }

    pub fn bounds(&self) -> Option<&PriceBounds> {
        self.bounds.as_ref()
    }

    pub fn window_len(&self) -> usize {
        self.len
    }

    pub fn plot_left(&self) -> f32 {
        self.padding.left
    }

    pub fn plot_right(&self) -> f32 {
        self.padding.left + self.plot_width()
    }

    pub fn plot_top(&self) -> f32 {
        self.padding.top
    }

    /// The area baseline.
    pub fn plot_bottom(&self) -> f32 {
        self.padding.top + self.plot_height()
    }

    pub fn plot_width(&self) -> f32 {
        plot_extent(self.size.width, self.padding.left, self.padding.right)
    }

    pub fn plot_height(&self) -> f32 {
        plot_extent(self.size.height, self.padding.top, self.padding.bottom)
    }

    pub fn x(&self, index: usize) -> f32 {
        map_x(index, self.len, self.size.width, &self.padding)
    }

    /// `None` when the window (and reference levels) gave no bounds.
    pub fn y(&self, price: f64) -> Option<f32> {
        self.bounds
            .as_ref()
            .map(|b| map_y(price, b, self.size.height, &self.padding))
    }
}
