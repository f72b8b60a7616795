//! Centralized validation and helper functions.

use crate::core::genome::Genome;
use crate::core::types::Coords;

/// Maximum number of chromosomes accepted for one genome (DOS protection)
pub const MAX_CHROMOSOMES: usize = 100_000;

/// Default window used when a strip is opened without any other cue
pub const DEFAULT_WINDOW: i64 = 10_000_000;

/// Check if adding another chromosome would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new chromosome.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_chromosome_limit(count: usize) -> Option<String> {
    if count >= MAX_CHROMOSOMES {
        Some(format!(
            "Too many chromosomes: adding another would exceed maximum of {MAX_CHROMOSOMES}"
        ))
    } else {
        None
    }
}

/// Validates a proposed window against a genome's chromosomes
pub trait CoordinateValidator {
    /// Returns the accepted (possibly adjusted) coordinates, or `None` if the
    /// window cannot be placed on `genome`.
    fn validate(&self, genome: &Genome, chr: &str, start: i64, end: i64) -> Option<Coords>;
}

/// Clamps windows into chromosome bounds.
///
/// Unknown chromosomes, inverted spans and windows lying entirely outside
/// the chromosome are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClampToChromosome;

impl CoordinateValidator for ClampToChromosome {
    fn validate(&self, genome: &Genome, chr: &str, start: i64, end: i64) -> Option<Coords> {
        let chromosome = genome.chromosome(chr)?;
        if start > end || chromosome.length < 1 {
            return None;
        }
        let start = start.max(1);
        let end = end.min(chromosome.length);
        if start > end {
            return None;
        }
        Some(Coords::new(chr, start, end))
    }
}

/// Default window on the genome's first chromosome: `[1, min(window, length)]`
#[must_use]
pub fn default_window(genome: &Genome, window: i64) -> Option<Coords> {
    let chromosome = genome.first_chromosome()?;
    if chromosome.length < 1 {
        return None;
    }
    Some(Coords::new(
        chromosome.name.clone(),
        1,
        window.max(1).min(chromosome.length),
    ))
}
