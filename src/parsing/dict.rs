use std::path::Path;

use crate::core::genome::Chromosome;
use crate::parsing::ParseError;
use crate::utils::validation::check_chromosome_limit;

/// Parse a Picard sequence dictionary (.dict) file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_dict_file(path: &Path) -> Result<Vec<Chromosome>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_dict_text(&content)
}

/// Parse dictionary from text
///
/// Only `@SQ` lines are read; `SN` and `LN` are required on each.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if an `@SQ` line lacks `SN`/`LN` or has
/// a bad length, or if no sequences are found. Returns
/// `ParseError::TooManyChromosomes` if the number of sequences exceeds the maximum.
pub fn parse_dict_text(text: &str) -> Result<Vec<Chromosome>, ParseError> {
    let mut chromosomes = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let Some(rest) = line.strip_prefix("@SQ\t") else {
            continue;
        };

        if check_chromosome_limit(chromosomes.len()).is_some() {
            return Err(ParseError::TooManyChromosomes(chromosomes.len()));
        }

        let mut name = None;
        let mut length = None;
        for field in rest.split('\t') {
            if let Some(value) = field.strip_prefix("SN:") {
                name = Some(value.to_string());
            } else if let Some(value) = field.strip_prefix("LN:") {
                let parsed = value
                    .replace('_', "")
                    .parse::<i64>()
                    .ok()
                    .filter(|len| *len > 0)
                    .ok_or_else(|| {
                        ParseError::InvalidFormat(format!(
                            "Invalid LN on line {}: {value}",
                            line_no + 1
                        ))
                    })?;
                length = Some(parsed);
            }
        }

        match (name, length) {
            (Some(name), Some(length)) => chromosomes.push(Chromosome::new(name, length)),
            _ => {
                return Err(ParseError::InvalidFormat(format!(
                    "@SQ line {} is missing SN or LN",
                    line_no + 1
                )))
            }
        }
    }

    if chromosomes.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No @SQ lines found in dictionary".to_string(),
        ));
    }

    Ok(chromosomes)
}
