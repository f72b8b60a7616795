use futures::future::try_join_all;
use tracing::debug;

use crate::catalog::features::FeatureStore;
use crate::catalog::ServiceError;
use crate::core::feature::Feature;
use crate::core::landmark::{Anchor, AnchorPolicy, LandmarkSpec};
use crate::core::region::RegionSpec;
use crate::core::types::Strand;

#[inline]
fn to_f64(value: i64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        value as f64
    }
}

#[inline]
fn to_coord(value: f64) -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    {
        value as i64
    }
}

/// Alignment point inside `feature` for the given anchor
#[must_use]
pub fn anchor_position(feature: &Feature, anchor: Anchor) -> f64 {
    match anchor {
        Anchor::Fraction(a) => to_f64(feature.start) + a * to_f64(feature.length()),
        Anchor::Policy(policy) => {
            let pos = match (policy, feature.strand) {
                (AnchorPolicy::FivePrime, Strand::Plus)
                | (AnchorPolicy::ThreePrime, Strand::Minus)
                | (AnchorPolicy::Proximal, _) => feature.start,
                (AnchorPolicy::FivePrime, Strand::Minus)
                | (AnchorPolicy::ThreePrime, Strand::Plus)
                | (AnchorPolicy::Distal, _) => feature.end,
                (AnchorPolicy::Midpoint, _) => (feature.start + feature.end).div_euclid(2),
            };
            to_f64(pos)
        }
    }
}

/// Window of `spec.length` bases centred on `center` and shifted by `spec.delta`
fn window(genome: &str, chr: &str, center: f64, spec: &LandmarkSpec) -> RegionSpec {
    let start =
        to_coord((center - to_f64(spec.length) / 2.0).round()).saturating_add(spec.delta);
    RegionSpec::new(genome, chr, start, start.saturating_add(spec.length.max(1) - 1))
}

/// Windows for `genome`, one per counterpart of the landmark.
///
/// Falls back to [`guess_landmark_region`] when the genome has no counterpart.
/// Feature data for both genomes must already be available.
pub fn compute_landmark_region<F: FeatureStore>(
    store: &F,
    spec: &LandmarkSpec,
    genome: &str,
) -> Vec<RegionSpec> {
    let copies = store.genologs(&spec.landmark, genome);
    if copies.is_empty() {
        return guess_landmark_region(store, spec, genome);
    }
    copies
        .iter()
        .map(|copy| window(genome, &copy.chr, anchor_position(copy, spec.anchor), spec))
        .collect()
}

/// First feature among `candidates` that does not overlap `landmark` and has a
/// counterpart in `genome`; returns that counterpart
fn first_counterpart<'a, F: FeatureStore>(
    store: &F,
    candidates: impl Iterator<Item = &'a Feature>,
    landmark: &Feature,
    genome: &str,
) -> Option<Feature> {
    candidates
        .filter(|f| !f.overlaps(landmark))
        .find_map(|f| store.genolog(f, genome))
}

/// Place the landmark in a genome where it has no counterpart, using the
/// nearest flanking features that do.
///
/// | Flanking counterparts found  | Windows                                   |
/// |------------------------------|-------------------------------------------|
/// | none                         | none                                      |
/// | one side                     | one, centred on that counterpart's start  |
/// | both, same chromosome        | one, centred between the two starts       |
/// | both, different chromosomes  | two, each centred on its counterpart      |
///
/// Windows are positioned on counterpart starts only, never on their ends, so
/// the same-chromosome case uses the midpoint of the two starts rather than
/// the midpoint of the span the two counterparts cover together.
pub fn guess_landmark_region<F: FeatureStore>(
    store: &F,
    spec: &LandmarkSpec,
    genome: &str,
) -> Vec<RegionSpec> {
    let landmark = &spec.landmark;
    let neighbors = store.all_features_now(&landmark.genome, &landmark.chr);
    let split = neighbors
        .iter()
        .position(|f| f.is_same(landmark))
        .unwrap_or_else(|| neighbors.partition_point(|f| f.start < landmark.start));

    let left = first_counterpart(store, neighbors[..split].iter().rev(), landmark, genome);
    let right = first_counterpart(store, neighbors[split..].iter(), landmark, genome);

    let (left, right) = match (left, right) {
        (None, None) => {
            debug!(landmark = %landmark.label(), genome, "no flanking counterparts");
            return Vec::new();
        }
        (Some(one), None) | (None, Some(one)) => (one.clone(), one),
        (Some(l), Some(r)) => (l, r),
    };

    if left.chr == right.chr {
        let center = (left.start + right.start).div_euclid(2);
        vec![window(genome, &left.chr, to_f64(center), spec)]
    } else {
        vec![
            window(genome, &left.chr, to_f64(left.start), spec),
            window(genome, &right.chr, to_f64(right.start), spec),
        ]
    }
}

/// Landmark windows for every genome of `genomes`, computed concurrently.
///
/// Feature data for each genome (and for the landmark's own genome) is made
/// available first. Results are positional with `genomes`.
///
/// # Errors
///
/// Returns the first `ServiceError` raised while loading feature data.
pub async fn compute_landmark_regions<F: FeatureStore>(
    store: &F,
    spec: &LandmarkSpec,
    genomes: &[String],
) -> Result<Vec<(String, Vec<RegionSpec>)>, ServiceError> {
    store.ensure_features(spec.genome()).await?;
    let pending = genomes.iter().map(|genome| async move {
        store.ensure_features(genome).await?;
        Ok::<_, ServiceError>((genome.clone(), compute_landmark_region(store, spec, genome)))
    });
    try_join_all(pending).await
}

/// Landmark spec for aligning on `feature`.
///
/// A clicked base becomes a fractional anchor; otherwise the default policy
/// applies. The window keeps the current region's length when there is one,
/// else three times the feature's length.
#[must_use]
pub fn landmark_spec_for_feature(
    feature: &Feature,
    clicked_base: Option<i64>,
    current_length: Option<i64>,
) -> LandmarkSpec {
    let anchor = match clicked_base {
        Some(base) => {
            let fraction = to_f64(base - feature.start) / to_f64(feature.length());
            Anchor::Fraction(fraction.clamp(0.0, 1.0))
        }
        None => Anchor::default(),
    };
    let length = current_length.unwrap_or_else(|| 3 * feature.length()).max(1);
    LandmarkSpec::new(feature.clone(), length).with_anchor(anchor)
}
