use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use dungeon_core::config::GeneratorConfig;
use dungeon_core::generation::generate_level_seeded;
use dungeon_core::logging::init_tracing;
use dungeon_core::recipe::Recipe;

/// Generate a dungeon level from a recipe file and print it as JSON
#[derive(Parser, Debug)]
#[command(name = "dungeon-gen", version, about)]
struct Cli {
    /// Recipe JSON file
    recipe: PathBuf,

    /// Dungeon depth (1-based)
    #[arg(short, long)]
    depth: Option<u32>,

    /// Root seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Generator config (.json or .ron)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Print the generation report instead of the asset
    #[arg(long)]
    report: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    init_tracing(&config.tracing);

    let content = std::fs::read_to_string(&cli.recipe)
        .with_context(|| format!("reading recipe {}", cli.recipe.display()))?;
    let recipe = Recipe::from_json(&content)
        .with_context(|| format!("decoding recipe {}", cli.recipe.display()))?;

    let depth = cli.depth.unwrap_or(config.default_depth);
    let seed = cli.seed.unwrap_or(config.default_seed);
    let level = generate_level_seeded(&recipe, depth, seed);

    let pretty = cli.pretty || config.pretty_output;
    let output = match (cli.report, pretty) {
        (true, true) => serde_json::to_string_pretty(&level.report)?,
        (true, false) => serde_json::to_string(&level.report)?,
        (false, true) => level.asset.to_json_pretty(),
        (false, false) => level.asset.to_json(),
    };
    println!("{output}");
    Ok(())
}
