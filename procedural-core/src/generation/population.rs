//! Enemy population rules.
//!
//! Layout generators hand over candidate world positions; these functions
//! turn them into enemy child entities carrying the encounter metadata.
//! Child names are `{prefix}_{serial}` with the serial taken from the
//! asset's child count, so names stay unique within one level.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::*;
use crate::recipe::{EnemySpec, Recipe};
use crate::scene::{
    ChildEntity, ChildMetadata, EnemyMetadata, EntityTransform, ProceduralAsset, Vector3,
};

/// How spawned enemies are oriented
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Facing {
    /// Uniform yaw in [0, 360)
    Random,
    Fixed(f32),
}

impl Facing {
    fn yaw<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match self {
            Facing::Random => rng.gen_range(0.0..360.0),
            Facing::Fixed(yaw) => *yaw,
        }
    }
}

/// Number of cave enemies for a given open-cell count
pub fn cave_enemy_count(open_cells: usize) -> usize {
    (open_cells / CAVE_CELLS_PER_ENEMY).min(CAVE_MAX_ENEMIES)
}

/// Append one enemy child of the given type
pub fn spawn_enemy(
    asset: &mut ProceduralAsset,
    recipe: &Recipe,
    enemy: &EnemySpec,
    position: Vector3,
    yaw: f32,
) {
    let serial = asset.children.len();
    asset.push_child(ChildEntity {
        path: enemy.asset_path.clone(),
        name: format!("{}_{}", enemy.name_prefix, serial),
        transform: EntityTransform::at(position).facing(yaw),
        metadata: ChildMetadata::enemy(EnemyMetadata {
            is_enemy: true,
            hp: enemy.hp,
            xp: enemy.xp,
            return_scene: recipe.return_scene(),
            asset_path: enemy.asset_path.clone(),
        }),
    });
}

/// Spawn `count` enemies on distinct candidates; each consumed candidate
/// leaves the pool. Returns the number spawned.
pub fn populate_without_replacement<R: Rng + ?Sized>(
    asset: &mut ProceduralAsset,
    recipe: &Recipe,
    mut candidates: Vec<Vector3>,
    count: usize,
    facing: Facing,
    rng: &mut R,
) -> usize {
    let mut spawned = 0;
    while spawned < count && !candidates.is_empty() {
        let Some(enemy) = recipe.enemies.choose(rng) else {
            break;
        };
        let idx = rng.gen_range(0..candidates.len());
        let position = candidates.swap_remove(idx);
        let yaw = facing.yaw(rng);
        spawn_enemy(asset, recipe, enemy, position, yaw);
        spawned += 1;
    }
    spawned
}

/// Spawn `count` enemies on candidates drawn with replacement
pub fn populate_with_replacement<R: Rng + ?Sized>(
    asset: &mut ProceduralAsset,
    recipe: &Recipe,
    candidates: &[Vector3],
    count: usize,
    facing: Facing,
    rng: &mut R,
) -> usize {
    if candidates.is_empty() {
        return 0;
    }
    let mut spawned = 0;
    for _ in 0..count {
        let Some(enemy) = recipe.enemies.choose(rng) else {
            break;
        };
        let position = candidates[rng.gen_range(0..candidates.len())];
        let yaw = facing.yaw(rng);
        spawn_enemy(asset, recipe, enemy, position, yaw);
        spawned += 1;
    }
    spawned
}

/// Generic population for levels whose layout produced no children:
/// 1..=3 enemies on a coarse grid around the origin.
pub fn populate_fallback<R: Rng + ?Sized>(
    asset: &mut ProceduralAsset,
    recipe: &Recipe,
    rng: &mut R,
) -> usize {
    if !recipe.has_enemies() {
        return 0;
    }
    let count = rng.gen_range(1..=FALLBACK_MAX_ENEMIES);
    let mut spawned = 0;
    for _ in 0..count {
        let Some(enemy) = recipe.enemies.choose(rng) else {
            break;
        };
        let x = rng.gen_range(-FALLBACK_POSITION_STEPS..=FALLBACK_POSITION_STEPS) as f32
            * FALLBACK_POSITION_STEP;
        let z = rng.gen_range(-FALLBACK_POSITION_STEPS..=FALLBACK_POSITION_STEPS) as f32
            * FALLBACK_POSITION_STEP;
        spawn_enemy(asset, recipe, enemy, Vector3::new(x, 0.0, z), 0.0);
        spawned += 1;
    }
    spawned
}
