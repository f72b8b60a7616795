use crate::core::error::ContextError;
use crate::core::landmark::LandmarkSpec;
use crate::core::region::{Region, RegionFactory, Strip};
use crate::core::types::RegionId;

/// Bound on every span and coordinate produced by navigation. Keeps region
/// arithmetic inside `i64` and integers exact in `f64`.
pub const MAX_COORDINATE: i64 = 1 << 50;

/// Convert a floored/rounded f64 coordinate back to an integer position
#[inline]
fn to_coord(value: f64) -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    {
        value as i64
    }
}

#[inline]
fn to_f64(value: i64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        value as f64
    }
}

/// Check zoom and scroll factors before anything is mutated.
///
/// # Errors
///
/// Returns `ContextError::InvalidParameter` if `zoom` is not a positive finite
/// number or `scroll` is not finite.
pub fn validate_factors(zoom: f64, scroll: f64) -> Result<(), ContextError> {
    if !zoom.is_finite() || zoom <= 0.0 {
        return Err(ContextError::InvalidParameter(format!(
            "zoom factor must be > 0 (got {zoom})"
        )));
    }
    if !scroll.is_finite() {
        return Err(ContextError::InvalidParameter(format!(
            "scroll factor must be finite (got {scroll})"
        )));
    }
    Ok(())
}

/// Zoom a region about its midpoint by `zoom` and scroll it by `scroll` times
/// the larger of the old and new lengths. Scrolling is mirrored for reversed
/// regions so it follows the on-screen direction.
///
/// # Errors
///
/// Returns `ContextError::InvalidParameter` for a non-positive zoom factor; the
/// region is left untouched.
pub fn zoom_scroll_region(region: &mut Region, zoom: f64, scroll: f64) -> Result<(), ContextError> {
    validate_factors(zoom, scroll)?;
    apply_zoom_scroll(region, zoom, scroll);
    Ok(())
}

fn apply_zoom_scroll(region: &mut Region, zoom: f64, scroll: f64) {
    let limit = to_f64(MAX_COORDINATE);
    let len = to_f64(region.bp_length());
    let new_len = (zoom * len).min(limit);
    let direction = if region.reversed { -1.0 } else { 1.0 };
    let delta = (scroll * len.max(new_len) * direction).clamp(-limit, limit);
    let mid = to_f64(region.start) / 2.0 + to_f64(region.end) / 2.0;

    let start = (mid - new_len / 2.0 + delta + 1.0).floor().clamp(-limit, limit);
    let end = (start + new_len - 1.0).floor().clamp(-limit, limit);

    region.start = to_coord(start);
    region.end = to_coord(end).max(region.start);
    region.length = region.bp_length();
}

/// Zoom and scroll every region of every strip by the same factors.
///
/// # Errors
///
/// Returns `ContextError::InvalidParameter` for invalid factors, before any
/// region is changed.
pub fn zoom_scroll_all(strips: &mut [Strip], zoom: f64, scroll: f64) -> Result<(), ContextError> {
    validate_factors(zoom, scroll)?;
    for region in strips.iter_mut().flat_map(|s| s.regions.iter_mut()) {
        apply_zoom_scroll(region, zoom, scroll);
    }
    Ok(())
}

/// Carry a zoom/scroll over to an active landmark window so that later strip
/// additions line up with what is on screen.
pub fn rescale_landmark(spec: &mut LandmarkSpec, zoom: f64, scroll: f64) {
    let limit = to_f64(MAX_COORDINATE);
    let length = to_f64(spec.length);
    let shift = to_coord((scroll * length).round().clamp(-limit, limit));
    spec.delta = spec
        .delta
        .saturating_add(shift)
        .clamp(-MAX_COORDINATE, MAX_COORDINATE);
    spec.length = to_coord((length * zoom).round().min(limit)).max(1);
}

/// Split the region at `index` of `strip` at `fraction` of both its pixel
/// width and its base-pair span. The original keeps the visually left piece;
/// a new sibling holding the right piece is inserted right after it.
///
/// Returns the sibling's id, or `None` if the region spans a single base.
///
/// # Errors
///
/// Returns `ContextError::InvalidParameter` if `fraction` is outside `0..=1`.
pub fn split_region(
    strip: &mut Strip,
    index: usize,
    fraction: f64,
    factory: &mut RegionFactory,
) -> Result<Option<RegionId>, ContextError> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(ContextError::InvalidParameter(format!(
            "split fraction must be within 0..=1 (got {fraction})"
        )));
    }
    let Some(region) = strip.regions.get_mut(index) else {
        return Ok(None);
    };
    let len = region.end - region.start + 1;
    if len < 2 {
        return Ok(None);
    }

    let left_bp = to_coord((to_f64(len) * fraction).round()).clamp(1, len - 1);
    let left_width = region.width * fraction;
    let right_width = region.width - left_width;

    let mut sibling_spec = region.to_spec();
    sibling_spec.width = Some(right_width);
    if region.reversed {
        // Visually left is genomically right
        sibling_spec.start = region.start;
        sibling_spec.end = region.end - left_bp;
        region.start = region.end - left_bp + 1;
    } else {
        sibling_spec.start = region.start + left_bp;
        sibling_spec.end = region.end;
        region.end = region.start + left_bp - 1;
    }
    region.width = left_width;
    region.length = region.end - region.start + 1;

    let sibling = factory.make_region(sibling_spec);
    let id = sibling.id;
    strip.regions.insert(index + 1, sibling);
    Ok(Some(id))
}

/// Flip a region's display orientation. Coordinates are unchanged.
pub fn reverse_region(region: &mut Region) {
    region.reversed = !region.reversed;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::feature::Feature;
    use crate::core::region::RegionSpec;
    use crate::core::types::Strand;

    fn region(start: i64, end: i64) -> (RegionFactory, Region) {
        let mut factory = RegionFactory::new();
        let r = factory.make_region(RegionSpec::new("G", "1", start, end).with_width(100.0));
        (factory, r)
    }

    #[test]
    fn test_zoom_in_centered() {
        let (_, mut r) = region(1000, 2000);
        zoom_scroll_region(&mut r, 0.5, 0.0).unwrap();
        assert_eq!((r.start, r.end), (1250, 1749));
    }

    #[test]
    fn test_zoom_identity() {
        let (_, mut r) = region(1000, 2000);
        zoom_scroll_region(&mut r, 1.0, 0.0).unwrap();
        assert_eq!((r.start, r.end), (1000, 2000));
    }

    #[test]
    fn test_zoom_out() {
        let (_, mut r) = region(1001, 2000);
        zoom_scroll_region(&mut r, 2.0, 0.0).unwrap();
        assert_eq!((r.start, r.end), (501, 2500));
    }

    #[test]
    fn test_scroll_follows_orientation() {
        let (_, mut fwd) = region(1001, 2000);
        zoom_scroll_region(&mut fwd, 1.0, 0.5).unwrap();
        assert_eq!((fwd.start, fwd.end), (1501, 2500));

        let (_, mut rev) = region(1001, 2000);
        rev.reversed = true;
        zoom_scroll_region(&mut rev, 1.0, 0.5).unwrap();
        assert_eq!((rev.start, rev.end), (501, 1500));
    }

    #[test]
    fn test_zoom_invalid_factor_leaves_region() {
        let (_, mut r) = region(1000, 2000);
        for bad in [0.0, -1.0, f64::NAN] {
            let err = zoom_scroll_region(&mut r, bad, 0.0).unwrap_err();
            assert!(matches!(err, ContextError::InvalidParameter(_)));
        }
        assert_eq!((r.start, r.end), (1000, 2000));
    }

    #[test]
    fn test_extreme_zoom_never_inverts() {
        let (_, mut r) = region(1000, 1009);
        zoom_scroll_region(&mut r, 0.001, 0.0).unwrap();
        assert!(r.start <= r.end);
    }

    #[test]
    fn test_huge_zoom_is_capped() {
        for factor in [1e16, 1e300, f64::MAX] {
            let (_, mut r) = region(1000, 2000);
            zoom_scroll_region(&mut r, factor, 0.0).unwrap();
            assert!(r.start <= r.end);
            assert!(r.bp_length() <= MAX_COORDINATE);
            assert!(r.start >= -MAX_COORDINATE && r.end <= MAX_COORDINATE);
        }

        // Zooming out again and scrolling far stays bounded
        let (_, mut r) = region(1000, 2000);
        for _ in 0..20 {
            zoom_scroll_region(&mut r, 1e12, 1e12).unwrap();
        }
        assert!(r.start <= r.end);
        assert_eq!(r.length, r.end - r.start + 1);
        assert!(r.end <= MAX_COORDINATE);
    }

    #[test]
    fn test_rescale_landmark_saturates() {
        let f = Feature::new("f", "G", "1", 1, 10, Strand::Plus);
        let mut spec = LandmarkSpec::new(f, 1000).with_delta(i64::MAX - 5);
        rescale_landmark(&mut spec, 1e300, 1e300);
        assert_eq!(spec.length, MAX_COORDINATE);
        assert_eq!(spec.delta, MAX_COORDINATE);

        rescale_landmark(&mut spec, 1e-300, -1e300);
        assert_eq!(spec.length, 1);
        assert!(spec.delta < MAX_COORDINATE);
    }

    #[test]
    fn test_zoom_all_validates_first() {
        let (mut factory, r) = region(1000, 2000);
        let other = factory.make_region(RegionSpec::new("H", "2", 1, 100));
        let mut strips = vec![Strip::new("G", vec![r], 0), Strip::new("H", vec![other], 1)];
        assert!(zoom_scroll_all(&mut strips, -2.0, 0.0).is_err());
        assert_eq!(strips[0].regions[0].start, 1000);

        zoom_scroll_all(&mut strips, 0.5, 0.0).unwrap();
        assert_eq!((strips[0].regions[0].start, strips[0].regions[0].end), (1250, 1749));
        assert_eq!(strips[1].regions[0].length, 50);
    }

    #[test]
    fn test_rescale_landmark() {
        let f = Feature::new("f", "G", "1", 1, 10, Strand::Plus);
        let mut spec = LandmarkSpec::new(f, 1000).with_delta(10);
        rescale_landmark(&mut spec, 0.5, 0.25);
        assert_eq!(spec.delta, 260);
        assert_eq!(spec.length, 500);
    }

    #[test]
    fn test_split_forward() {
        let (mut factory, r) = region(100, 199);
        let id = r.id;
        let mut strip = Strip::new("G", vec![r], 0);
        let sibling = split_region(&mut strip, 0, 0.3, &mut factory).unwrap().unwrap();

        assert_eq!(strip.regions.len(), 2);
        assert_eq!(strip.regions[0].id, id);
        assert_eq!((strip.regions[0].start, strip.regions[0].end), (100, 129));
        assert_eq!(strip.regions[1].id, sibling);
        assert_eq!((strip.regions[1].start, strip.regions[1].end), (130, 199));
        assert!((strip.regions[0].width - 30.0).abs() < 1e-9);
        assert!((strip.regions[1].width - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_split_reversed_mirrors() {
        let (mut factory, mut r) = region(100, 199);
        r.reversed = true;
        let mut strip = Strip::new("G", vec![r], 0);
        split_region(&mut strip, 0, 0.3, &mut factory).unwrap();

        assert_eq!((strip.regions[0].start, strip.regions[0].end), (170, 199));
        assert_eq!((strip.regions[1].start, strip.regions[1].end), (100, 169));
        assert!(strip.regions[1].reversed);
    }

    #[test]
    fn test_split_edges() {
        let (mut factory, r) = region(100, 100);
        let mut strip = Strip::new("G", vec![r], 0);
        assert_eq!(split_region(&mut strip, 0, 0.5, &mut factory).unwrap(), None);
        assert!(split_region(&mut strip, 0, 1.5, &mut factory).is_err());

        let (mut factory, r) = region(1, 10);
        let mut strip = Strip::new("G", vec![r], 0);
        split_region(&mut strip, 0, 0.0, &mut factory).unwrap();
        assert_eq!((strip.regions[0].start, strip.regions[0].end), (1, 1));
        assert_eq!((strip.regions[1].start, strip.regions[1].end), (2, 10));
    }

    #[test]
    fn test_reverse_keeps_coordinates() {
        let (_, mut r) = region(5, 50);
        reverse_region(&mut r);
        assert!(r.reversed);
        assert_eq!((r.start, r.end), (5, 50));
        reverse_region(&mut r);
        assert!(!r.reversed);
    }
}
