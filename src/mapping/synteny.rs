use futures::future::try_join_all;
use tracing::debug;

use crate::catalog::synteny::{SyntenyBlock, SyntenyTranslator};
use crate::catalog::ServiceError;
use crate::core::region::RegionSpec;

#[inline]
fn bp_weight(spec: &RegionSpec) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        spec.length() as f64
    }
}

/// Coalesce translated fragments into contiguous groups.
///
/// Fragments are sorted by block index. A fragment whose index repeats the
/// previous one is dropped; one whose index follows the previous on the same
/// chromosome extends it; anything else starts a new group.
#[must_use]
pub fn combine_regions(mut blocks: Vec<SyntenyBlock>) -> Vec<SyntenyBlock> {
    blocks.sort_by_key(|b| b.index);

    let mut groups: Vec<SyntenyBlock> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match groups.last_mut() {
            Some(prev) if prev.index == block.index => {}
            Some(prev) if prev.index + 1 == block.index && prev.chr == block.chr => {
                prev.end = block.end.max(prev.start);
                prev.index = block.index;
            }
            _ => groups.push(block),
        }
    }
    groups
}

/// Map one region into `target`.
///
/// A region already in `target` maps onto itself. Otherwise its span is
/// translated and the fragments coalesced. Every result carries its base-pair
/// length as weight.
///
/// # Errors
///
/// Returns the translator's `ServiceError` unchanged.
pub async fn map_region_to_genome<T: SyntenyTranslator>(
    translator: &T,
    region: &RegionSpec,
    target: &str,
) -> Result<Vec<RegionSpec>, ServiceError> {
    if region.genome == target {
        let spec = region.clone();
        let weight = bp_weight(&spec);
        return Ok(vec![spec.with_width(weight)]);
    }

    let blocks = translator
        .translate(&region.genome, &region.chr, region.start, region.end, target)
        .await?;
    let specs: Vec<RegionSpec> = combine_regions(blocks)
        .into_iter()
        .map(|b| {
            let spec = RegionSpec::new(target, b.chr, b.start, b.end);
            let weight = bp_weight(&spec);
            spec.with_width(weight)
        })
        .collect();

    if specs.is_empty() {
        debug!(source = %region.genome, target, "no synteny for {}:{}..{}", region.chr, region.start, region.end);
    }
    Ok(specs)
}

/// Map `region` into every genome of `targets` concurrently.
///
/// Results are positional with `targets`. Nothing is returned until every
/// genome is mapped; the first failure aborts the whole batch.
///
/// # Errors
///
/// Returns the first `ServiceError` raised by the translator.
pub async fn map_regions<T: SyntenyTranslator>(
    translator: &T,
    region: &RegionSpec,
    targets: &[String],
) -> Result<Vec<(String, Vec<RegionSpec>)>, ServiceError> {
    let pending = targets.iter().map(|target| async move {
        let specs = map_region_to_genome(translator, region, target).await?;
        Ok::<_, ServiceError>((target.clone(), specs))
    });
    try_join_all(pending).await
}
