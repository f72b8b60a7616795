use crate::core::region::{Region, Strip};
use crate::core::types::RegionId;

/// Hard minimum width of a region while a border is dragged
pub const MIN_BORDER_WIDTH: f64 = 25.0;

/// Interactive resizing of adjacent regions within a strip
#[derive(Debug, Clone, Copy)]
pub struct BorderResizer {
    min_width: f64,
}

impl Default for BorderResizer {
    fn default() -> Self {
        Self::new(MIN_BORDER_WIDTH)
    }
}

impl BorderResizer {
    pub fn new(min_width: f64) -> Self {
        Self { min_width }
    }

    /// Move the border between region `id` and its right neighbor by `amount`
    /// pixels (positive moves it right).
    ///
    /// Returns the distance the border actually moved. Unknown ids and the
    /// last region of a strip have no right border and move nothing.
    pub fn move_border(&self, strip: &mut Strip, id: RegionId, amount: f64) -> f64 {
        let Some(index) = strip.position_of(id) else {
            return 0.0;
        };
        move_border_at(&mut strip.regions, index, amount, self.min_width)
    }

    /// Exchange region `id` with its right sibling. Returns false when there is
    /// nothing to swap with.
    pub fn swap(&self, strip: &mut Strip, id: RegionId) -> bool {
        match strip.position_of(id) {
            Some(index) if index + 1 < strip.regions.len() => {
                strip.regions.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }
}

/// Move the border to the right of `regions[index]`.
///
/// The region on the shrinking side gives up width down to `min_width`; what it
/// cannot give is asked of the next region further along in the same direction,
/// recursively, until the amount is covered or the strip ends. The growing side
/// receives exactly what was absorbed.
pub fn move_border_at(regions: &mut [Region], index: usize, amount: f64, min_width: f64) -> f64 {
    if index + 1 >= regions.len() {
        return 0.0;
    }
    if amount > 0.0 {
        let moved = absorb(regions, index + 1, amount, true, min_width);
        regions[index].width += moved;
        moved
    } else if amount < 0.0 {
        let moved = absorb(regions, index, -amount, false, min_width);
        regions[index + 1].width += moved;
        -moved
    } else {
        0.0
    }
}

/// Shrink `regions[index]` by up to `amount`, cascading the remainder to the
/// neighbor on the right (`rightward`) or left. Returns the total absorbed.
fn absorb(regions: &mut [Region], index: usize, amount: f64, rightward: bool, min_width: f64) -> f64 {
    if amount <= 0.0 {
        return 0.0;
    }
    let Some(region) = regions.get_mut(index) else {
        return 0.0;
    };
    let slack = (region.width - min_width).max(0.0);
    let taken = amount.min(slack);
    region.width -= taken;

    let next = if rightward {
        Some(index + 1)
    } else {
        index.checked_sub(1)
    };
    match next {
        Some(next) => taken + absorb(regions, next, amount - taken, rightward, min_width),
        None => taken,
    }
}
