pub mod cave;
pub mod level_manager;
pub mod population;
pub mod rooms;
pub mod tunnel;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

use crate::constants::*;
use crate::logging::TimingSpan;
use crate::recipe::{LayoutSelection, LayoutType, Recipe};
use crate::scene::{ChildEntity, ChildMetadata, EntityTransform, ExitMetadata, ProceduralAsset};

/// Random source used for seeded generation
pub type LevelRng = Xoshiro256PlusPlus;

/// Root seed. Each (recipe, depth) pair derives its own stream from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSeed {
    pub seed: u64,
}

impl Default for LevelSeed {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

impl LevelSeed {
    /// Deterministic per-level hash of root seed, recipe id and depth
    pub fn level_hash(&self, recipe_id: &str, depth: u32) -> u64 {
        let mut hasher = Sha3_256::new();
        hasher.update(self.seed.to_le_bytes());
        hasher.update(recipe_id.as_bytes());
        hasher.update(depth.to_le_bytes());
        let digest = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(bytes)
    }

    pub fn rng_for(&self, recipe_id: &str, depth: u32) -> LevelRng {
        LevelRng::seed_from_u64(self.level_hash(recipe_id, depth))
    }
}

/// Per-layout numbers worth asserting on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutStats {
    Rooms {
        requested: usize,
        placed: usize,
        corridors: usize,
    },
    Cave {
        alive_cells: usize,
        open_cells: usize,
    },
    Tunnel {
        visited_cells: usize,
    },
    /// Layout name outside the closed set; nothing was generated
    Unrecognized { layout: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub depth: u32,
    pub layout: LayoutStats,
    pub parts: usize,
    pub enemies_spawned: usize,
    pub fallback_population: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedLevel {
    pub asset: ProceduralAsset,
    pub report: GenerationReport,
}

/// Level display name
pub fn level_name(recipe: &Recipe, depth: u32) -> String {
    format!("{} (Level {})", recipe.name, depth)
}

/// Build one level from a recipe. Total: every recipe yields a renderable
/// asset ending in the exit marker.
pub fn generate_level<R: Rng + ?Sized>(recipe: &Recipe, depth: u32, rng: &mut R) -> GeneratedLevel {
    let _span = TimingSpan::new("generate_level");
    let mut asset = ProceduralAsset::new(level_name(recipe, depth));

    let layout = match &recipe.layout_type {
        LayoutSelection::Known(layout) => run_layout(*layout, &mut asset, recipe, rng),
        LayoutSelection::Unrecognized(raw) => {
            tracing::warn!(
                recipe = %recipe.id,
                layout = %raw,
                "unrecognized layout type, level has no geometry"
            );
            LayoutStats::Unrecognized {
                layout: raw.clone(),
            }
        }
    };

    let fallback_population = asset.children.is_empty() && recipe.has_enemies();
    if fallback_population {
        let spawned = population::populate_fallback(&mut asset, recipe, rng);
        tracing::debug!(spawned, "layout emitted no children, applied fallback population");
    }

    let enemies_spawned = asset.enemy_count();
    append_exit_marker(&mut asset, recipe);

    let report = GenerationReport {
        depth,
        layout,
        parts: asset.parts.len(),
        enemies_spawned,
        fallback_population,
    };

    tracing::info!(
        recipe = %recipe.id,
        depth,
        parts = report.parts,
        enemies = report.enemies_spawned,
        "level generated"
    );

    GeneratedLevel { asset, report }
}

/// Seeded convenience: derives the random stream from (seed, recipe, depth)
pub fn generate_level_seeded(recipe: &Recipe, depth: u32, seed: u64) -> GeneratedLevel {
    let mut rng = LevelSeed { seed }.rng_for(&recipe.id, depth);
    generate_level(recipe, depth, &mut rng)
}

/// Generate several independent levels in parallel; output order matches
/// input order and equals sequential `generate_level_seeded` calls.
pub fn generate_batch(requests: &[(Recipe, u32)], seed: u64) -> Vec<GeneratedLevel> {
    requests
        .par_iter()
        .map(|(recipe, depth)| generate_level_seeded(recipe, *depth, seed))
        .collect()
}

fn run_layout<R: Rng + ?Sized>(
    layout: LayoutType,
    asset: &mut ProceduralAsset,
    recipe: &Recipe,
    rng: &mut R,
) -> LayoutStats {
    match layout {
        LayoutType::Rooms => {
            let result = rooms::generate(asset, recipe, rng);
            LayoutStats::Rooms {
                requested: result.requested,
                placed: result.rooms.len(),
                corridors: result.corridors.len(),
            }
        }
        LayoutType::Cave => {
            let result = cave::generate(asset, recipe, rng);
            LayoutStats::Cave {
                alive_cells: result.grid.alive_count(),
                open_cells: result.open_cells.len(),
            }
        }
        LayoutType::Tunnel => {
            let result = tunnel::generate(asset, recipe, rng);
            LayoutStats::Tunnel {
                visited_cells: result.cells.len(),
            }
        }
    }
}

/// Fixed exit trigger. Every layout is assumed to be entered from the
/// south, so the exit always sits at the same offset.
fn append_exit_marker(asset: &mut ProceduralAsset, recipe: &Recipe) {
    asset.push_child(ChildEntity {
        path: EXIT_MARKER_PATH.to_string(),
        name: format!("{}_Exit", recipe.id),
        transform: EntityTransform::at(EXIT_MARKER_OFFSET.into()).trigger(EXIT_TRIGGER_RADIUS),
        metadata: ChildMetadata::exit(ExitMetadata {
            is_exit: true,
            return_scene: recipe.return_scene(),
        }),
    });
}
