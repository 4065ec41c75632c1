//! Drunkard's-walk tunnel layout.
//!
//! A forward-biased walk over integer cells carves one winding corridor.
//! Visited cells collapse into an ordered set, so revisits add nothing and
//! iteration order is stable for a given random source.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::population::{self, Facing};
use crate::constants::*;
use crate::recipe::Recipe;
use crate::scene::{Part, ProceduralAsset, Shape, Vector3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Forward,
    Backward,
    Right,
    Left,
}

impl Step {
    /// Map a roll in [0, 1) onto the biased direction table
    pub fn from_roll(roll: f32) -> Self {
        if roll < TUNNEL_FORWARD_CHANCE {
            Step::Forward
        } else if roll < TUNNEL_FORWARD_CHANCE + TUNNEL_BACKWARD_CHANCE {
            Step::Backward
        } else if roll < TUNNEL_FORWARD_CHANCE + TUNNEL_BACKWARD_CHANCE + TUNNEL_RIGHT_CHANCE {
            Step::Right
        } else {
            Step::Left
        }
    }

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Step::Forward => (0, 1),
            Step::Backward => (0, -1),
            Step::Right => (1, 0),
            Step::Left => (-1, 0),
        }
    }
}

/// Walk `TUNNEL_WALK_STEPS` steps from (0, 0), recording every cell
pub fn carve_path<R: Rng + ?Sized>(rng: &mut R) -> BTreeSet<(i32, i32)> {
    let mut cell = (0, 0);
    let mut visited = BTreeSet::new();
    visited.insert(cell);

    for _ in 0..TUNNEL_WALK_STEPS {
        let (dx, dz) = Step::from_roll(rng.gen::<f32>()).delta();
        cell = (cell.0 + dx, cell.1 + dz);
        visited.insert(cell);
    }
    visited
}

fn cell_to_world(cell: (i32, i32)) -> Vector3 {
    Vector3::new(
        cell.0 as f32 * TUNNEL_CELL_SIZE,
        0.0,
        cell.1 as f32 * TUNNEL_CELL_SIZE,
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TunnelLayout {
    pub cells: Vec<(i32, i32)>,
    pub enemies_spawned: usize,
}

/// Generate the tunnel layout into `asset`
pub fn generate<R: Rng + ?Sized>(
    asset: &mut ProceduralAsset,
    recipe: &Recipe,
    rng: &mut R,
) -> TunnelLayout {
    let cells: Vec<(i32, i32)> = carve_path(rng).into_iter().collect();
    let theme = &recipe.theme;
    let half = TUNNEL_CELL_SIZE / 2.0;

    for &(x, z) in &cells {
        let base = cell_to_world((x, z));
        let prefix = format!("tunnel_{x}_{z}");

        asset.push_part(
            Part::cuboid(
                format!("{prefix}_floor"),
                base,
                Vector3::new(TUNNEL_CELL_SIZE, SLAB_THICKNESS, TUNNEL_CELL_SIZE),
            )
            .with_style(&theme.floor_color, &theme.floor_material),
        );
        asset.push_part(
            Part::cuboid(
                format!("{prefix}_sludge"),
                Vector3::new(base.x, base.y - SLUDGE_DEPTH, base.z),
                Vector3::new(half, SLAB_THICKNESS, TUNNEL_CELL_SIZE),
            )
            .with_style(SLUDGE_COLOR, SLUDGE_MATERIAL),
        );
        asset.push_part(
            Part::cuboid(
                format!("{prefix}_ceiling"),
                Vector3::new(base.x, TUNNEL_HEIGHT, base.z),
                Vector3::new(TUNNEL_CELL_SIZE, SLAB_THICKNESS, TUNNEL_CELL_SIZE),
            )
            .with_style(&theme.wall_color, &theme.wall_material),
        );
        asset.push_part(
            Part::new(
                format!("{prefix}_column"),
                Shape::Cylinder,
                Vector3::new(base.x + half, TUNNEL_HEIGHT / 2.0, base.z + half),
                Vector3::new(
                    TUNNEL_COLUMN_RADIUS * 2.0,
                    TUNNEL_HEIGHT,
                    TUNNEL_COLUMN_RADIUS * 2.0,
                ),
            )
            .with_style(&theme.wall_color, &theme.wall_material),
        );
    }

    let mut enemies_spawned = 0;
    if recipe.has_enemies() {
        let candidates: Vec<Vector3> = cells.iter().map(|&c| cell_to_world(c)).collect();
        enemies_spawned = population::populate_with_replacement(
            asset,
            recipe,
            &candidates,
            TUNNEL_ENEMY_SAMPLES,
            Facing::Fixed(TUNNEL_ENEMY_FACING),
            rng,
        );
    }

    tracing::debug!(
        cells = cells.len(),
        enemies = enemies_spawned,
        "tunnel layout generated"
    );

    TunnelLayout {
        cells,
        enemies_spawned,
    }
}
