//! Parser for FASTA index (.fai) files using noodles.
//!
//! Only the first two columns matter here: sequence name and length.
//! Format: `name\tlength\toffset\tline_bases\tline_width`

use std::io::BufReader;
use std::path::Path;

use crate::core::genome::Chromosome;
use crate::parsing::ParseError;
use crate::utils::validation::check_chromosome_limit;

/// Parse a FASTA index (.fai) file using noodles
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, `ParseError::InvalidFormat` if no sequences are found, or
/// `ParseError::TooManyChromosomes` if the limit is exceeded.
pub fn parse_fai_file(path: &Path) -> Result<Vec<Chromosome>, ParseError> {
    use noodles::fasta;

    let reader = std::fs::File::open(path).map(BufReader::new)?;

    let index = fasta::fai::io::Reader::new(reader)
        .read_index()
        .map_err(|e| ParseError::Noodles(format!("Failed to parse FAI file: {e}")))?;

    index_to_chromosomes(&index)
}

fn index_to_chromosomes(index: &noodles::fasta::fai::Index) -> Result<Vec<Chromosome>, ParseError> {
    let mut chromosomes = Vec::new();

    for record in index.as_ref() {
        if check_chromosome_limit(chromosomes.len()).is_some() {
            return Err(ParseError::TooManyChromosomes(chromosomes.len()));
        }

        let name = String::from_utf8_lossy(record.name()).to_string();
        let length = i64::try_from(record.length()).map_err(|_| {
            ParseError::InvalidFormat(format!("Sequence '{name}' is too long"))
        })?;

        chromosomes.push(Chromosome::new(name, length));
    }

    if chromosomes.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FAI file".to_string(),
        ));
    }

    Ok(chromosomes)
}
