//! Navigation commands accepted by `view`, one per line.
//!
//! | Command                                   | Effect                                   |
//! |-------------------------------------------|------------------------------------------|
//! | `strips A,B,C`                            | display exactly these genomes            |
//! | `add <genome> [chr:start..end]`           | add one strip                            |
//! | `delete <genome>`                         | remove one strip                         |
//! | `move-strip <genome> <position>`          | reorder strips                           |
//! | `goto <genome> <chr:start..end>`          | show one window in a genome              |
//! | `zoom <region> <factor> [scroll]`         | zoom/scroll, following the current mode  |
//! | `lock on\|off`                            | locked scrolling                         |
//! | `split <region> <fraction>`               | split a region in two                    |
//! | `reverse <region>`                        | flip orientation                         |
//! | `remove <region>`                         | remove a region                          |
//! | `swap <region>`                           | swap with the right neighbour            |
//! | `border <region> <pixels>`                | drag the right border                    |
//! | `reference <region> [A,B]`                | map a reference region via synteny       |
//! | `landmark <feature> <length> [anchor] [delta]` | align every genome on a landmark    |
//! | `align <feature> [base] [region]`         | align on a feature, keeping a window size |
//! | `restore <regions string>`                | replace every strip                      |
//! | `width <pixels>`                          | strip width                              |
//!
//! A `<region>` is an id (`r3` or `3`) or `<genome>#<index>`. A `<feature>` is
//! an id or symbol, optionally qualified as `<key>@<genome>`. Blank lines and
//! lines starting with `#` are ignored.

use anyhow::{anyhow, bail, Context};

use crate::core::landmark::{Anchor, AnchorPolicy};
use crate::core::region::RegionSpec;
use crate::core::types::RegionId;

/// How a script names a region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionRef {
    Id(RegionId),
    Position { genome: String, index: usize },
}

/// How a script names a feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRef {
    pub key: String,
    pub genome: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Strips(Vec<String>),
    Add {
        genome: String,
        region: Option<RegionSpec>,
    },
    Delete(String),
    MoveStrip {
        genome: String,
        position: usize,
    },
    Goto(RegionSpec),
    Zoom {
        region: RegionRef,
        zoom: f64,
        scroll: f64,
    },
    Lock(bool),
    Split {
        region: RegionRef,
        fraction: f64,
    },
    Reverse(RegionRef),
    Remove(RegionRef),
    Swap(RegionRef),
    Border {
        region: RegionRef,
        amount: f64,
    },
    Reference {
        region: RegionRef,
        genomes: Option<Vec<String>>,
    },
    Landmark {
        feature: FeatureRef,
        length: i64,
        anchor: Anchor,
        delta: i64,
    },
    Align {
        feature: FeatureRef,
        base: Option<i64>,
        region: Option<RegionRef>,
    },
    Restore(String),
    Width(f64),
}

fn parse_region_ref(text: &str) -> anyhow::Result<RegionRef> {
    if let Some((genome, index)) = text.rsplit_once('#') {
        let index = index
            .parse()
            .with_context(|| format!("bad region index in '{text}'"))?;
        return Ok(RegionRef::Position {
            genome: genome.to_string(),
            index,
        });
    }
    let digits = text.strip_prefix('r').unwrap_or(text);
    let id = digits
        .parse()
        .with_context(|| format!("bad region '{text}'"))?;
    Ok(RegionRef::Id(RegionId(id)))
}

fn parse_feature_ref(text: &str) -> FeatureRef {
    match text.split_once('@') {
        Some((key, genome)) => FeatureRef {
            key: key.to_string(),
            genome: Some(genome.to_string()),
        },
        None => FeatureRef {
            key: text.to_string(),
            genome: None,
        },
    }
}

/// `chr:start..end` in `genome`
fn parse_location(genome: &str, text: &str) -> anyhow::Result<RegionSpec> {
    let (chr, range) = text
        .rsplit_once(':')
        .ok_or_else(|| anyhow!("expected chr:start..end, got '{text}'"))?;
    let (start, end) = range
        .split_once("..")
        .ok_or_else(|| anyhow!("expected chr:start..end, got '{text}'"))?;
    let start: i64 = start.parse().with_context(|| format!("bad start in '{text}'"))?;
    let end: i64 = end.parse().with_context(|| format!("bad end in '{text}'"))?;
    if start > end {
        bail!("start is after end in '{text}'");
    }
    Ok(RegionSpec::new(genome, chr, start, end))
}

fn parse_anchor(text: &str) -> anyhow::Result<Anchor> {
    if let Some(policy) = AnchorPolicy::parse(text) {
        return Ok(Anchor::Policy(policy));
    }
    let fraction: f64 = text
        .parse()
        .with_context(|| format!("unknown anchor '{text}'"))?;
    if !(0.0..=1.0).contains(&fraction) {
        bail!("anchor fraction must be within 0..=1 (got {fraction})");
    }
    Ok(Anchor::Fraction(fraction))
}

fn genome_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn number<N: std::str::FromStr>(arg: Option<&&str>, what: &str) -> anyhow::Result<N> {
    let text = arg.ok_or_else(|| anyhow!("missing {what}"))?;
    text.parse()
        .map_err(|_| anyhow!("bad {what}: '{text}'"))
}

fn nth<'a>(args: &[&'a str], i: usize, command: &str, what: &str) -> anyhow::Result<&'a str> {
    args.get(i)
        .copied()
        .ok_or_else(|| anyhow!("{command}: missing {what}"))
}

/// Parse one script line; blank lines and comments yield `None`
///
/// # Errors
///
/// Returns an error for an unknown command or malformed arguments.
pub fn parse_command(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let args: Vec<&str> = rest.split_whitespace().collect();
    let arg = |i: usize, what: &str| nth(&args, i, name, what);

    let command = match name {
        "strips" => Command::Strips(genome_list(rest)),
        "add" => {
            let genome = arg(0, "genome")?.to_string();
            let region = args
                .get(1)
                .map(|loc| parse_location(&genome, loc))
                .transpose()?;
            Command::Add { genome, region }
        }
        "delete" => Command::Delete(arg(0, "genome")?.to_string()),
        "move-strip" => Command::MoveStrip {
            genome: arg(0, "genome")?.to_string(),
            position: number(args.get(1), "position")?,
        },
        "goto" => Command::Goto(parse_location(arg(0, "genome")?, arg(1, "location")?)?),
        "zoom" => Command::Zoom {
            region: parse_region_ref(arg(0, "region")?)?,
            zoom: number(args.get(1), "zoom factor")?,
            scroll: if args.len() > 2 {
                number(args.get(2), "scroll factor")?
            } else {
                0.0
            },
        },
        "lock" => match arg(0, "on|off")? {
            "on" => Command::Lock(true),
            "off" => Command::Lock(false),
            other => bail!("lock: expected on or off, got '{other}'"),
        },
        "split" => Command::Split {
            region: parse_region_ref(arg(0, "region")?)?,
            fraction: number(args.get(1), "fraction")?,
        },
        "reverse" => Command::Reverse(parse_region_ref(arg(0, "region")?)?),
        "remove" => Command::Remove(parse_region_ref(arg(0, "region")?)?),
        "swap" => Command::Swap(parse_region_ref(arg(0, "region")?)?),
        "border" => Command::Border {
            region: parse_region_ref(arg(0, "region")?)?,
            amount: number(args.get(1), "pixels")?,
        },
        "reference" => Command::Reference {
            region: parse_region_ref(arg(0, "region")?)?,
            genomes: args.get(1).map(|g| genome_list(g)),
        },
        "landmark" => Command::Landmark {
            feature: parse_feature_ref(arg(0, "feature")?),
            length: number(args.get(1), "length")?,
            anchor: args
                .get(2)
                .map(|a| parse_anchor(a))
                .transpose()?
                .unwrap_or_default(),
            delta: if args.len() > 3 {
                number(args.get(3), "delta")?
            } else {
                0
            },
        },
        "align" => Command::Align {
            feature: parse_feature_ref(arg(0, "feature")?),
            base: if args.len() > 1 {
                Some(number(args.get(1), "base")?)
            } else {
                None
            },
            region: args.get(2).map(|r| parse_region_ref(r)).transpose()?,
        },
        "restore" => {
            if rest.is_empty() {
                bail!("restore: missing regions string");
            }
            Command::Restore(rest.to_string())
        }
        "width" => Command::Width(number(args.first(), "pixels")?),
        other => bail!("unknown command '{other}'"),
    };
    Ok(Some(command))
}

/// Parse a whole script
///
/// # Errors
///
/// Returns the first malformed line, with its line number.
pub fn parse_script(text: &str) -> anyhow::Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        if let Some(command) =
            parse_command(line).with_context(|| format!("line {}", line_no + 1))?
        {
            commands.push(command);
        }
    }
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strip_commands() {
        assert_eq!(
            parse_command("strips C57BL/6J, A/J").unwrap(),
            Some(Command::Strips(vec!["C57BL/6J".into(), "A/J".into()]))
        );
        assert_eq!(
            parse_command("add A/J 11:100..200").unwrap(),
            Some(Command::Add {
                genome: "A/J".into(),
                region: Some(RegionSpec::new("A/J", "11", 100, 200)),
            })
        );
        assert_eq!(
            parse_command("move-strip A 0").unwrap(),
            Some(Command::MoveStrip {
                genome: "A".into(),
                position: 0
            })
        );
        assert_eq!(parse_command("  # comment").unwrap(), None);
        assert_eq!(parse_command("").unwrap(), None);
    }

    #[test]
    fn test_parse_region_refs() {
        assert_eq!(
            parse_command("zoom r3 0.5").unwrap(),
            Some(Command::Zoom {
                region: RegionRef::Id(RegionId(3)),
                zoom: 0.5,
                scroll: 0.0
            })
        );
        assert_eq!(
            parse_command("split A/J#1 0.3").unwrap(),
            Some(Command::Split {
                region: RegionRef::Position {
                    genome: "A/J".into(),
                    index: 1
                },
                fraction: 0.3
            })
        );
        assert!(parse_command("reverse x").is_err());
    }

    #[test]
    fn test_parse_landmark_and_align() {
        assert_eq!(
            parse_command("landmark Pax6@A 5000 midpoint -100").unwrap(),
            Some(Command::Landmark {
                feature: FeatureRef {
                    key: "Pax6".into(),
                    genome: Some("A".into())
                },
                length: 5000,
                anchor: Anchor::Policy(AnchorPolicy::Midpoint),
                delta: -100,
            })
        );
        assert_eq!(
            parse_command("align Pax6").unwrap(),
            Some(Command::Align {
                feature: FeatureRef {
                    key: "Pax6".into(),
                    genome: None
                },
                base: None,
                region: None,
            })
        );
        assert!(parse_command("landmark Pax6 100 1.5").is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("fly away").is_err());
        assert!(parse_command("lock maybe").is_err());
        assert!(parse_command("zoom r1").is_err());
        assert!(parse_command("goto A 1:20..10").is_err());
        assert!(parse_command("restore").is_err());
    }

    #[test]
    fn test_parse_script_reports_line() {
        let err = parse_script("strips A\n\nbogus\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 3"));
        assert_eq!(parse_script("strips A\nlock on\n").unwrap().len(), 2);
    }
}
