//! Text and JSON renditions of the displayed strips.
//!
//! The canonical form lists strips in `order`, regions in display order:
//!
//! ```text
//! regions=C57BL/6J::11:1000..2000/400,11:5000..6000/200|A/J::11:900..2100/600
//! ```
//!
//! Widths are floored pixels. Parsing the string back yields the widths as
//! layout weights.

use std::fmt::Write as _;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::error::ContextError;
use crate::core::feature::Feature;
use crate::core::region::{RegionSpec, Strip};
use crate::context::mode::NavigationMode;
use crate::parsing::ParseError;

/// Prefix of the canonical regions string
pub const REGIONS_PREFIX: &str = "regions=";

#[inline]
fn floor_width(width: f64) -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    {
        width.floor() as i64
    }
}

/// Render strips in canonical form; empty strips are skipped
#[must_use]
pub fn serialize_strips(strips: &[Strip]) -> String {
    let mut ordered: Vec<&Strip> = strips.iter().filter(|s| !s.regions.is_empty()).collect();
    ordered.sort_by_key(|s| s.order);

    let body = ordered
        .iter()
        .map(|strip| {
            let regions = strip
                .regions
                .iter()
                .map(|r| format!("{}:{}..{}/{}", r.chr, r.start, r.end, floor_width(r.width)))
                .collect::<Vec<_>>()
                .join(",");
            format!("{}::{regions}", strip.genome)
        })
        .collect::<Vec<_>>()
        .join("|");
    format!("{REGIONS_PREFIX}{body}")
}

fn parse_region(genome: &str, text: &str) -> Result<RegionSpec, ParseError> {
    let invalid = || ParseError::InvalidFormat(format!("bad region '{text}'"));

    let (location, width) = match text.rsplit_once('/') {
        Some((location, width)) => {
            let width: f64 = width.trim().parse().map_err(|_| invalid())?;
            (location, Some(width))
        }
        None => (text, None),
    };
    let (chr, range) = location.rsplit_once(':').ok_or_else(invalid)?;
    let (start, end) = range.split_once("..").ok_or_else(invalid)?;
    let start: i64 = start.trim().parse().map_err(|_| invalid())?;
    let end: i64 = end.trim().parse().map_err(|_| invalid())?;
    if chr.is_empty() || start > end {
        return Err(invalid());
    }

    let spec = RegionSpec::new(genome, chr.trim(), start, end);
    Ok(match width {
        Some(w) if w > 0.0 => spec.with_width(w),
        _ => spec,
    })
}

/// Parse a canonical regions string into per-genome region specs.
///
/// The `regions=` prefix is optional. Strips keep their textual order.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for a malformed strip or region, or a
/// genome named twice.
pub fn parse_regions(text: &str) -> Result<Vec<(String, Vec<RegionSpec>)>, ParseError> {
    let text = text.trim();
    let body = text.strip_prefix(REGIONS_PREFIX).unwrap_or(text);
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let mut strips: Vec<(String, Vec<RegionSpec>)> = Vec::new();
    for part in body.split('|') {
        let (genome, regions) = part
            .split_once("::")
            .ok_or_else(|| ParseError::InvalidFormat(format!("missing genome in '{part}'")))?;
        if genome.is_empty() {
            return Err(ParseError::InvalidFormat(format!("missing genome in '{part}'")));
        }
        if strips.iter().any(|(g, _)| g == genome) {
            return Err(ParseError::InvalidFormat(format!("genome '{genome}' listed twice")));
        }
        let specs = regions
            .split(',')
            .map(|r| parse_region(genome, r))
            .collect::<Result<Vec<_>, _>>()?;
        strips.push((genome.to_string(), specs));
    }
    Ok(strips)
}

/// One line per region: chromosome, 0-based start, end, name, score, strand
#[must_use]
pub fn strips_to_bed(strips: &[Strip]) -> String {
    let mut ordered: Vec<&Strip> = strips.iter().collect();
    ordered.sort_by_key(|s| s.order);

    let mut out = String::new();
    for region in ordered.iter().flat_map(|s| s.regions.iter()) {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}|{}\t0\t{}",
            region.chr,
            region.start - 1,
            region.end,
            region.genome,
            region.id,
            if region.reversed { '-' } else { '+' }
        );
    }
    out
}

/// Full state of a controller at one point in time
#[derive(Debug, Clone, Serialize)]
pub struct ContextSnapshot {
    pub created_at: DateTime<Utc>,
    pub mode: NavigationMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<Feature>,
    pub strips: Vec<Strip>,
}

impl ContextSnapshot {
    pub fn new(mode: NavigationMode, selection: Option<Feature>, strips: Vec<Strip>) -> Self {
        Self {
            created_at: Utc::now(),
            mode,
            selection,
            strips,
        }
    }
}

/// Supported export renditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Regions,
    Json,
    Bed,
}

impl FromStr for ExportKind {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "regions" => Ok(Self::Regions),
            "json" => Ok(Self::Json),
            "bed" => Ok(Self::Bed),
            other => Err(ContextError::UnsupportedType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::region::RegionFactory;

    fn strips() -> Vec<Strip> {
        let mut factory = RegionFactory::new();
        let a1 = factory.make_region(RegionSpec::new("C57BL/6J", "11", 1000, 2000).with_width(400.7));
        let a2 = factory.make_region(RegionSpec::new("C57BL/6J", "11", 5000, 6000).with_width(200.0));
        let mut b = factory.make_region(RegionSpec::new("A/J", "11", 900, 2100).with_width(600.2));
        b.reversed = true;
        // Order ranks deliberately differ from vector order
        vec![
            Strip::new("A/J", vec![b], 1),
            Strip::new("C57BL/6J", vec![a1, a2], 0),
            Strip::new("empty", Vec::new(), 2),
        ]
    }

    #[test]
    fn test_serialize_canonical() {
        assert_eq!(
            serialize_strips(&strips()),
            "regions=C57BL/6J::11:1000..2000/400,11:5000..6000/200|A/J::11:900..2100/600"
        );
        assert_eq!(serialize_strips(&[]), "regions=");
    }

    #[test]
    fn test_parse_regions() {
        let parsed = parse_regions(&serialize_strips(&strips())).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].0, "C57BL/6J");
        assert_eq!(
            parsed[0].1[1],
            RegionSpec::new("C57BL/6J", "11", 5000, 6000).with_width(200.0)
        );
        assert_eq!(parsed[1].1[0].genome, "A/J");

        // Prefix and widths are optional
        let bare = parse_regions("G::chrX:1..10").unwrap();
        assert_eq!(bare[0].1[0], RegionSpec::new("G", "chrX", 1, 10));
        assert!(parse_regions("regions=").unwrap().is_empty());
    }

    #[test]
    fn test_parse_regions_errors() {
        for bad in ["G:1:1..10", "G::1:10..1", "G::1:a..b", "::1:1..2", "G::1:1..2|G::1:3..4"] {
            assert!(parse_regions(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_bed() {
        let bed = strips_to_bed(&strips());
        let lines: Vec<&str> = bed.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "11\t999\t2000\tC57BL/6J|r1\t0\t+");
        assert_eq!(lines[2], "11\t899\t2100\tA/J|r3\t0\t-");
    }

    #[test]
    fn test_export_kind() {
        assert_eq!("JSON".parse::<ExportKind>().unwrap(), ExportKind::Json);
        assert!(matches!(
            "gff".parse::<ExportKind>(),
            Err(ContextError::UnsupportedType(_))
        ));
    }
}
