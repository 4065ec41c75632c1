//! Cellular-automata cave layout.
//!
//! Alive cells are rock, dead cells are open floor. Off-grid neighbours
//! count as rock, which closes the map at its edges. The cells straddling
//! the grid centre are cleared after every pass so a spawn point always
//! exists.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::population::{self, Facing};
use crate::constants::*;
use crate::recipe::Recipe;
use crate::scene::{Part, ProceduralAsset, Vector3};

/// Boolean occupancy grid, `true` = rock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaveGrid {
    pub width: usize,
    pub height: usize,
    cells: Vec<bool>,
}

impl CaveGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Random fill with the given alive probability
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, fill: f64, rng: &mut R) -> Self {
        let mut grid = Self::new(width, height);
        for cell in grid.cells.iter_mut() {
            *cell = rng.gen_bool(fill);
        }
        grid
    }

    pub fn is_alive(&self, x: usize, z: usize) -> bool {
        self.cells[z * self.width + x]
    }

    pub fn set(&mut self, x: usize, z: usize, alive: bool) {
        self.cells[z * self.width + x] = alive;
    }

    pub fn center(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// The three cells forced open around the centre
    pub fn spawn_cells(&self) -> [(usize, usize); 3] {
        let (cx, cz) = self.center();
        [(cx - 1, cz), (cx, cz), (cx + 1, cz)]
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Moore-neighbourhood count; off-grid counts as alive
    pub fn alive_neighbours(&self, x: usize, z: usize) -> usize {
        let mut count = 0;
        for dz in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dz == 0 {
                    continue;
                }
                let nx = x as i64 + dx;
                let nz = z as i64 + dz;
                if nx < 0 || nz < 0 || nx >= self.width as i64 || nz >= self.height as i64 {
                    count += 1;
                } else if self.is_alive(nx as usize, nz as usize) {
                    count += 1;
                }
            }
        }
        count
    }

    /// One smoothing pass
    pub fn smooth(&self) -> Self {
        let mut next = Self::new(self.width, self.height);
        for z in 0..self.height {
            for x in 0..self.width {
                let n = self.alive_neighbours(x, z);
                let alive = if self.is_alive(x, z) {
                    n >= CAVE_SURVIVAL_THRESHOLD
                } else {
                    n >= CAVE_BIRTH_THRESHOLD
                };
                next.set(x, z, alive);
            }
        }
        next
    }

    pub fn clear_spawn(&mut self) {
        for (x, z) in self.spawn_cells() {
            self.set(x, z, false);
        }
    }

    /// Dead cells outside the spawn buffer
    pub fn open_cells(&self) -> Vec<(usize, usize)> {
        let (cx, cz) = self.center();
        let mut open = Vec::new();
        for z in 0..self.height {
            for x in 0..self.width {
                if self.is_alive(x, z) {
                    continue;
                }
                if x.abs_diff(cx) <= CAVE_SPAWN_BUFFER && z.abs_diff(cz) <= CAVE_SPAWN_BUFFER {
                    continue;
                }
                open.push((x, z));
            }
        }
        open
    }

    /// World-space centre of a cell, grid centred on origin so its outer
    /// edges line up with the floor slab
    pub fn cell_to_world(&self, x: usize, z: usize) -> Vector3 {
        Vector3::new(
            (x as f32 + 0.5 - self.width as f32 / 2.0) * CAVE_CELL_SIZE,
            0.0,
            (z as f32 + 0.5 - self.height as f32 / 2.0) * CAVE_CELL_SIZE,
        )
    }
}

/// Initial fill plus smoothing, spawn cleared after each pass
pub fn carve<R: Rng + ?Sized>(rng: &mut R) -> CaveGrid {
    let mut grid = CaveGrid::random(
        CAVE_GRID_WIDTH,
        CAVE_GRID_HEIGHT,
        CAVE_FILL_PROBABILITY,
        rng,
    );
    for _ in 0..CAVE_SMOOTHING_PASSES {
        grid = grid.smooth();
        grid.clear_spawn();
    }
    grid
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaveLayout {
    pub grid: CaveGrid,
    pub open_cells: Vec<(usize, usize)>,
    pub enemies_spawned: usize,
}

/// Generate the cave layout into `asset`
pub fn generate<R: Rng + ?Sized>(
    asset: &mut ProceduralAsset,
    recipe: &Recipe,
    rng: &mut R,
) -> CaveLayout {
    let grid = carve(rng);
    let theme = &recipe.theme;
    let extent_x = grid.width as f32 * CAVE_CELL_SIZE;
    let extent_z = grid.height as f32 * CAVE_CELL_SIZE;

    asset.push_part(
        Part::cuboid(
            "cave_floor",
            Vector3::ZERO,
            Vector3::new(extent_x, SLAB_THICKNESS, extent_z),
        )
        .with_style(&theme.floor_color, &theme.floor_material),
    );
    asset.push_part(
        Part::cuboid(
            "cave_ceiling",
            Vector3::new(0.0, CAVE_HEIGHT, 0.0),
            Vector3::new(extent_x, SLAB_THICKNESS, extent_z),
        )
        .with_style(&theme.wall_color, &theme.wall_material),
    );

    for z in 0..grid.height {
        for x in 0..grid.width {
            if !grid.is_alive(x, z) {
                continue;
            }
            let mut position = grid.cell_to_world(x, z);
            position.y = CAVE_HEIGHT / 2.0;
            asset.push_part(
                Part::cuboid(
                    format!("rock_{x}_{z}"),
                    position,
                    Vector3::new(CAVE_CELL_SIZE, CAVE_HEIGHT, CAVE_CELL_SIZE),
                )
                .with_style(&theme.wall_color, &theme.wall_material),
            );
        }
    }

    let open_cells = grid.open_cells();
    let mut enemies_spawned = 0;
    if recipe.has_enemies() && !open_cells.is_empty() {
        let candidates = open_cells
            .iter()
            .map(|&(x, z)| grid.cell_to_world(x, z))
            .collect();
        let count = population::cave_enemy_count(open_cells.len());
        enemies_spawned = population::populate_without_replacement(
            asset,
            recipe,
            candidates,
            count,
            Facing::Random,
            rng,
        );
    }

    tracing::debug!(
        alive = grid.alive_count(),
        open = open_cells.len(),
        enemies = enemies_spawned,
        "cave layout generated"
    );

    CaveLayout {
        grid,
        open_cells,
        enemies_spawned,
    }
}
