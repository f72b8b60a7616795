use serde::{Deserialize, Serialize};

use crate::catalog::ServiceError;

/// One translated fragment of a mapped span.
///
/// `index` is the ordinal of the underlying synteny block; fragments with
/// consecutive indices are adjacent in both genomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntenyBlock {
    pub chr: String,
    pub start: i64,
    pub end: i64,
    pub index: i64,
}

impl SyntenyBlock {
    pub fn new(chr: impl Into<String>, start: i64, end: i64, index: i64) -> Self {
        Self {
            chr: chr.into(),
            start,
            end,
            index,
        }
    }
}

/// Maps a coordinate span from one genome into another
#[allow(async_fn_in_trait)]
pub trait SyntenyTranslator {
    async fn translate(
        &self,
        source_genome: &str,
        chr: &str,
        start: i64,
        end: i64,
        target_genome: &str,
    ) -> Result<Vec<SyntenyBlock>, ServiceError>;
}

/// A pair of collinear blocks, one in each genome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPair {
    pub a_genome: String,
    pub a_chr: String,
    pub a_start: i64,
    pub a_end: i64,
    pub b_genome: String,
    pub b_chr: String,
    pub b_start: i64,
    pub b_end: i64,
}

/// One side of a block pair, as seen from the translation direction
struct Side<'a> {
    chr: &'a str,
    start: i64,
    end: i64,
}

/// Translator over an explicit table of block pairs.
///
/// Pairs are usable in both directions. Block indices are the ordinal of a
/// pair among the pairs linking the two genomes, in table order.
#[derive(Debug, Clone, Default)]
pub struct BlockTableTranslator {
    pairs: Vec<BlockPair>,
}

impl BlockTableTranslator {
    pub fn new(pairs: Vec<BlockPair>) -> Self {
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn oriented<'a>(pair: &'a BlockPair, source: &str, target: &str) -> Option<(Side<'a>, Side<'a>)> {
        let a = Side {
            chr: &pair.a_chr,
            start: pair.a_start,
            end: pair.a_end,
        };
        let b = Side {
            chr: &pair.b_chr,
            start: pair.b_start,
            end: pair.b_end,
        };
        if pair.a_genome == source && pair.b_genome == target {
            Some((a, b))
        } else if pair.b_genome == source && pair.a_genome == target {
            Some((b, a))
        } else {
            None
        }
    }
}

/// Linear interpolation of `pos` from one block span onto another
fn project(pos: i64, from: &Side<'_>, to: &Side<'_>) -> i64 {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    {
        let from_len = (from.end - from.start + 1) as f64;
        let to_len = (to.end - to.start + 1) as f64;
        to.start + ((pos - from.start) as f64 * to_len / from_len).floor() as i64
    }
}

impl SyntenyTranslator for BlockTableTranslator {
    async fn translate(
        &self,
        source_genome: &str,
        chr: &str,
        start: i64,
        end: i64,
        target_genome: &str,
    ) -> Result<Vec<SyntenyBlock>, ServiceError> {
        if start > end {
            return Err(ServiceError::Translation(format!(
                "invalid span {chr}:{start}..{end}"
            )));
        }

        let mut blocks = Vec::new();
        let linking = self
            .pairs
            .iter()
            .filter_map(|p| Self::oriented(p, source_genome, target_genome));
        for (index, (from, to)) in (0_i64..).zip(linking) {
            if from.chr != chr || from.end < start || from.start > end {
                continue;
            }
            let clip_start = start.max(from.start);
            let clip_end = end.min(from.end);
            let t_start = project(clip_start, &from, &to);
            let t_end = (project(clip_end + 1, &from, &to) - 1).max(t_start);
            blocks.push(SyntenyBlock::new(to.chr, t_start, t_end.min(to.end), index));
        }
        Ok(blocks)
    }
}
