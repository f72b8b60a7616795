//! Parsers for genome chromosome lists.
//!
//! This module provides parsers for:
//!
//! - **FASTA index (.fai) files**: name and length of every sequence
//! - **Picard .dict files**: `@SQ` lines with `SN`/`LN` tags
//! - **UCSC chrom.sizes files**: name and length per line
//!
//! Each yields the ordered chromosome list of a [`Genome`](crate::core::genome::Genome).
//!
//! ## Example
//!
//! ```rust,no_run
//! use genome_strips::parsing::parse_index_file;
//! use std::path::Path;
//!
//! let chromosomes = parse_index_file(Path::new("GRCm39.fa.fai")).unwrap();
//! println!("{} chromosomes", chromosomes.len());
//! ```

use std::path::Path;

use thiserror::Error;

use crate::core::genome::Chromosome;
use crate::utils::validation::MAX_CHROMOSOMES;

pub mod dict;
pub mod fai;
pub mod sizes;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Too many chromosomes: {0} exceeds maximum allowed ({MAX_CHROMOSOMES})")]
    TooManyChromosomes(usize),
}

/// Parse a chromosome list, choosing the parser from the file extension
///
/// # Errors
///
/// Returns `ParseError::UnsupportedFormat` for extensions other than `.fai`,
/// `.dict` and `.sizes`, or any error of the selected parser.
pub fn parse_index_file(path: &Path) -> Result<Vec<Chromosome>, ParseError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("fai") => fai::parse_fai_file(path),
        Some("dict") => dict::parse_dict_file(path),
        Some("sizes") => sizes::parse_sizes_file(path),
        Some(other) => Err(ParseError::UnsupportedFormat(other.to_string())),
        None => Err(ParseError::UnsupportedFormat(path.display().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_file_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let sizes = dir.path().join("mm39.chrom.sizes");
        std::fs::write(&sizes, "chr1\t195154279\nchrX\t169476592\n").unwrap();
        let chromosomes = parse_index_file(&sizes).unwrap();
        assert_eq!(chromosomes.len(), 2);
        assert_eq!(chromosomes[1].name, "chrX");

        let bam = dir.path().join("reads.bam");
        std::fs::write(&bam, "").unwrap();
        assert!(matches!(
            parse_index_file(&bam),
            Err(ParseError::UnsupportedFormat(ext)) if ext == "bam"
        ));
    }
}
