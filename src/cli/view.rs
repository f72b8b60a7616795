use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Args;
use tracing::info;

use crate::catalog::features::InMemoryFeatureStore;
use crate::catalog::store::Dataset;
use crate::catalog::synteny::BlockTableTranslator;
use crate::cli::script::{parse_command, parse_script, Command, FeatureRef, RegionRef};
use crate::cli::OutputFormat;
use crate::context::{ContextChange, ContextConfig, StripController};
use crate::core::feature::Feature;
use crate::core::landmark::LandmarkSpec;
use crate::core::types::RegionId;

type Controller = StripController<InMemoryFeatureStore, BlockTableTranslator>;

#[derive(Args)]
pub struct ViewArgs {
    /// Dataset file (JSON)
    #[arg(required = true)]
    pub dataset: PathBuf,

    /// Genomes to open, comma-separated (defaults to every genome in the dataset)
    #[arg(short, long, value_delimiter = ',')]
    pub genomes: Vec<String>,

    /// Controller configuration (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// File of navigation commands, one per line
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Navigation command to run after the script (repeatable)
    #[arg(short = 'e', long = "execute")]
    pub execute: Vec<String>,

    /// Print the canonical regions string only
    #[arg(long)]
    pub regions_only: bool,
}

/// Execute the view subcommand
///
/// # Errors
///
/// Returns an error if the dataset, configuration or script cannot be loaded,
/// or if a command fails.
pub fn run(args: ViewArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_view(args, format, verbose))
}

async fn run_view(args: ViewArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let dataset = Dataset::load_from_file(&args.dataset)
        .with_context(|| format!("loading {}", args.dataset.display()))?;
    let config = match &args.config {
        Some(path) => ContextConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ContextConfig::default(),
    };

    let mut commands = Vec::new();
    if let Some(path) = &args.script {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        commands.extend(parse_script(&text).with_context(|| format!("in {}", path.display()))?);
    }
    for line in &args.execute {
        if let Some(command) = parse_command(line).with_context(|| format!("in '{line}'"))? {
            commands.push(command);
        }
    }

    let genomes = if args.genomes.is_empty() {
        dataset.catalog.names()
    } else {
        args.genomes.clone()
    };

    let features = dataset.feature_store();
    let translator = dataset.translator();
    let mut controller = StripController::new(dataset.catalog, features, translator, config);

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<ContextChange>();
    controller.add_listener(Box::new(tx));

    controller.set_strips(&genomes).await?;
    for command in commands {
        apply(&mut controller, command).await?;
    }

    let mut changes = 0;
    while rx.try_recv().is_ok() {
        changes += 1;
    }
    info!(changes, "commands applied");
    if verbose {
        eprintln!("{changes} context changes");
    }

    if args.regions_only {
        println!("{}", controller.serialize());
        return Ok(());
    }
    print_state(&controller, format)
}

fn resolve_region(controller: &Controller, region: &RegionRef) -> anyhow::Result<RegionId> {
    match region {
        RegionRef::Id(id) => Ok(*id),
        RegionRef::Position { genome, index } => controller
            .find_strip(genome)
            .and_then(|si| controller.strips()[si].regions.get(*index))
            .map(|r| r.id)
            .ok_or_else(|| anyhow!("no region {genome}#{index}")),
    }
}

fn resolve_feature(controller: &Controller, feature: &FeatureRef) -> anyhow::Result<Feature> {
    let store = controller.features();
    let found = match &feature.genome {
        Some(genome) => store.find(genome, &feature.key),
        None => store.find_any(&feature.key),
    };
    found
        .cloned()
        .ok_or_else(|| anyhow!("unknown feature '{}'", feature.key))
}

async fn apply(controller: &mut Controller, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Strips(genomes) => controller.set_strips(&genomes).await?,
        Command::Add { genome, region } => {
            controller.add_strip(&genome, region).await?;
        }
        Command::Delete(genome) => {
            controller.delete_strip(&genome, false);
        }
        Command::MoveStrip { genome, position } => {
            controller.move_strip(&genome, position);
        }
        Command::Goto(spec) => controller.goto(spec).await?,
        Command::Zoom {
            region,
            zoom,
            scroll,
        } => {
            let id = resolve_region(controller, &region)?;
            controller.zoom_scroll(id, zoom, scroll).await?;
        }
        Command::Lock(on) => controller.set_scroll_lock(on),
        Command::Split { region, fraction } => {
            let id = resolve_region(controller, &region)?;
            controller.split_region(id, fraction)?;
        }
        Command::Reverse(region) => {
            let id = resolve_region(controller, &region)?;
            controller.reverse_region(id);
        }
        Command::Remove(region) => {
            let id = resolve_region(controller, &region)?;
            controller.remove_region(id);
        }
        Command::Swap(region) => {
            let id = resolve_region(controller, &region)?;
            controller.swap(id);
        }
        Command::Border { region, amount } => {
            let id = resolve_region(controller, &region)?;
            controller.move_border(id, amount);
        }
        Command::Reference { region, genomes } => {
            let id = resolve_region(controller, &region)?;
            controller
                .compute_mapped_regions(id, genomes.as_deref())
                .await?;
        }
        Command::Landmark {
            feature,
            length,
            anchor,
            delta,
        } => {
            if length < 1 {
                return Err(anyhow!("landmark length must be at least 1"));
            }
            let landmark = resolve_feature(controller, &feature)?;
            let spec = LandmarkSpec::new(landmark, length)
                .with_anchor(anchor)
                .with_delta(delta);
            controller.align_on_landmark(spec, None, false).await?;
        }
        Command::Align {
            feature,
            base,
            region,
        } => {
            let feature = resolve_feature(controller, &feature)?;
            let current = region
                .as_ref()
                .map(|r| resolve_region(controller, r))
                .transpose()?;
            controller.feature_align(&feature, base, current).await?;
        }
        Command::Restore(text) => controller.restore_regions(&text)?,
        Command::Width(width) => controller.set_strip_width(width)?,
    }
    Ok(())
}

fn print_state(controller: &Controller, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{}", controller.serialize());
            println!("Mode: {}", controller.mode());
            if let Some(feature) = controller.selection() {
                println!("Selection: {}", feature.label());
            }
            for strip in controller.strips() {
                println!("\n{} ({} regions)", strip.genome, strip.regions.len());
                for region in &strip.regions {
                    println!(
                        "  {:<6} {}:{}..{}{}  width={:.1} x={:.1}",
                        region.id.to_string(),
                        region.chr,
                        region.start,
                        region.end,
                        if region.reversed { " (rev)" } else { "" },
                        region.width,
                        region.delta_x
                    );
                }
            }
        }
        OutputFormat::Json => println!("{}", controller.export("json")?),
        OutputFormat::Tsv => {
            println!("genome\tid\tchr\tstart\tend\treversed\twidth\tdelta_x");
            for strip in controller.strips() {
                for region in &strip.regions {
                    println!(
                        "{}\t{}\t{}\t{}\t{}\t{}\t{:.1}\t{:.1}",
                        strip.genome,
                        region.id,
                        region.chr,
                        region.start,
                        region.end,
                        region.reversed,
                        region.width,
                        region.delta_x
                    );
                }
            }
        }
    }
    Ok(())
}
