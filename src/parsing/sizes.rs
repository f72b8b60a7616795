//! Parser for UCSC chromosome size files (`chrom.sizes`).
//!
//! One sequence per line: name and length separated by whitespace. Extra
//! columns are ignored, so the first two columns of a `.fai` also parse.

use std::path::Path;

use crate::core::genome::Chromosome;
use crate::parsing::ParseError;
use crate::utils::validation::check_chromosome_limit;

/// Read a chromosome size file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or any error of
/// [`parse_sizes_text`].
pub fn parse_sizes_file(path: &Path) -> Result<Vec<Chromosome>, ParseError> {
    let text = std::fs::read_to_string(path)?;
    parse_sizes_text(&text)
}

/// Parse chromosome sizes from text. Blank lines and `#` comments are skipped.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for a line without a length, a length
/// that is not a positive integer, or an empty list, and
/// `ParseError::TooManyChromosomes` if the limit is exceeded.
pub fn parse_sizes_text(text: &str) -> Result<Vec<Chromosome>, ParseError> {
    let mut chromosomes = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if check_chromosome_limit(chromosomes.len()).is_some() {
            return Err(ParseError::TooManyChromosomes(chromosomes.len()));
        }

        let mut fields = line.split_whitespace();
        let (Some(name), Some(length)) = (fields.next(), fields.next()) else {
            return Err(ParseError::InvalidFormat(format!(
                "line {}: expected a name and a length",
                number + 1
            )));
        };
        let length = length
            .parse::<i64>()
            .ok()
            .filter(|len| *len > 0)
            .ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "line {}: invalid length for '{name}': {length}",
                    number + 1
                ))
            })?;

        chromosomes.push(Chromosome::new(name, length));
    }

    if chromosomes.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in size list".to_string(),
        ));
    }

    Ok(chromosomes)
}
