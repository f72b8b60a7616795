use serde::{Deserialize, Serialize};

use crate::core::region::{Strip, DEFAULT_REGION_WEIGHT};

/// Default total strip width in pixels
pub const DEFAULT_STRIP_WIDTH: f64 = 1200.0;

/// Default space reserved before the first region (end cap)
pub const DEFAULT_LEADING_OFFSET: f64 = 12.0;

/// Default gap between adjacent regions
pub const DEFAULT_REGION_GAP: f64 = 4.0;

/// Default minimum region width enforced by scaling
pub const DEFAULT_MIN_WIDTH: f64 = 25.0;

/// Helper function to convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Pixel geometry settings for strips
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Total width of every strip, in pixels
    pub strip_width: f64,
    /// Space reserved before the first region
    pub leading_offset: f64,
    /// Space between adjacent regions
    pub gap: f64,
    /// Regions are scaled up to at least this width
    pub min_width: f64,
    /// Weight used for regions whose stored width is unset (zero or negative)
    pub default_weight: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            strip_width: DEFAULT_STRIP_WIDTH,
            leading_offset: DEFAULT_LEADING_OFFSET,
            gap: DEFAULT_REGION_GAP,
            min_width: DEFAULT_MIN_WIDTH,
            default_weight: DEFAULT_REGION_WEIGHT,
        }
    }
}

/// Scale `weights` so they sum to `available`, keeping every value at or above
/// `min_width`.
///
/// Values that scale below the minimum are clamped up, and the total shortfall
/// is taken back from the remaining values in proportion to their own scaled
/// size. This is a single correction pass: a value pushed under the minimum by
/// its share of the shortfall keeps that small residual.
///
/// When the clamped minimums alone would not fit, every value gets an equal
/// share of `available` instead.
#[must_use]
pub fn scale_adjust(weights: &[f64], available: f64, min_width: f64) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }
    let n = count_to_f64(weights.len());
    if available <= 0.0 {
        return vec![min_width; weights.len()];
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return vec![available / n; weights.len()];
    }

    let factor = available / total;
    let scaled: Vec<f64> = weights.iter().map(|w| w * factor).collect();

    let mut deficit = 0.0;
    let mut clamped = 0usize;
    let mut unclamped_total = 0.0;
    for &v in &scaled {
        if v < min_width {
            deficit += min_width - v;
            clamped += 1;
        } else {
            unclamped_total += v;
        }
    }

    if clamped == 0 {
        return scaled;
    }
    if unclamped_total <= 0.0 || count_to_f64(clamped) * min_width >= available {
        return vec![available / n; weights.len()];
    }

    scaled
        .into_iter()
        .map(|v| {
            if v < min_width {
                min_width
            } else {
                v - deficit * v / unclamped_total
            }
        })
        .collect()
}

/// Converts region weights into pixel widths and offsets
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn set_strip_width(&mut self, width: f64) {
        self.config.strip_width = width;
    }

    /// Width left for regions once the end cap and gaps are reserved
    #[must_use]
    pub fn available_width(&self, total_width: f64, region_count: usize) -> f64 {
        let gaps = count_to_f64(region_count.saturating_sub(1));
        total_width - self.config.leading_offset - self.config.gap * gaps
    }

    /// Lay out one strip within `total_width` pixels
    pub fn layout_strip(&self, strip: &mut Strip, total_width: f64) {
        if strip.regions.is_empty() {
            return;
        }
        let available = self.available_width(total_width, strip.regions.len());
        let weights: Vec<f64> = strip
            .regions
            .iter()
            .map(|r| {
                if r.width > 0.0 {
                    r.width
                } else {
                    self.config.default_weight
                }
            })
            .collect();
        let widths = scale_adjust(&weights, available, self.config.min_width);

        let mut dx = self.config.leading_offset;
        for (region, width) in strip.regions.iter_mut().zip(widths) {
            region.width = width;
            region.length = region.end - region.start + 1;
            region.delta_x = dx;
            dx += width + self.config.gap;
        }
    }

    /// Lay out the strips at `which` (all strips when `None`) at the configured width
    pub fn layout(&self, strips: &mut [Strip], which: Option<&[usize]>) {
        let width = self.config.strip_width;
        match which {
            Some(indices) => {
                for &i in indices {
                    if let Some(strip) = strips.get_mut(i) {
                        self.layout_strip(strip, width);
                    }
                }
            }
            None => {
                for strip in strips.iter_mut() {
                    self.layout_strip(strip, width);
                }
            }
        }
    }
}
