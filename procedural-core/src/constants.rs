//! Centralized tuning constants for level generation.
//!
//! Every loop bound and dimension used by the layout generators lives here,
//! so generation stays bounded and the numbers are visible in one place.

// =====================================================
// Rooms layout
// =====================================================

/// Half of the square bounded area rooms are placed in (200x200 around origin)
pub const ROOMS_AREA_HALF_EXTENT: f32 = 100.0;

/// Requested room count range (half-open)
pub const ROOMS_MIN_COUNT: usize = 8;
pub const ROOMS_MAX_COUNT: usize = 15;

/// Room width/depth range in world units (inclusive)
pub const ROOM_MIN_SIZE: f32 = 15.0;
pub const ROOM_MAX_SIZE: f32 = 30.0;

/// Spacing every accepted room keeps from the next candidate
pub const ROOM_OVERLAP_BUFFER: f32 = 5.0;

/// Room inserted when no candidate survives placement
pub const FALLBACK_ROOM_SIZE: f32 = 20.0;

/// Height of room walls and ceiling
pub const ROOM_WALL_HEIGHT: f32 = 8.0;

/// Thickness of floor/ceiling slabs and walls
pub const SLAB_THICKNESS: f32 = 0.5;
pub const WALL_THICKNESS: f32 = 1.0;

/// Corridor width in world units
pub const CORRIDOR_WIDTH: f32 = 6.0;

// =====================================================
// Cave layout
// =====================================================

pub const CAVE_GRID_WIDTH: usize = 40;
pub const CAVE_GRID_HEIGHT: usize = 40;

/// World units per cave cell
pub const CAVE_CELL_SIZE: f32 = 5.0;

/// Probability a cell starts alive (rock)
pub const CAVE_FILL_PROBABILITY: f64 = 0.45;

pub const CAVE_SMOOTHING_PASSES: usize = 4;

/// Alive cell survives with at least this many alive/wall neighbours
pub const CAVE_SURVIVAL_THRESHOLD: usize = 4;

/// Dead cell is born with at least this many alive/wall neighbours
pub const CAVE_BIRTH_THRESHOLD: usize = 5;

/// Cells around the centre (Chebyshev distance) never used for population
pub const CAVE_SPAWN_BUFFER: usize = 2;

/// Rock column height
pub const CAVE_HEIGHT: f32 = 10.0;

/// One enemy per this many open cells
pub const CAVE_CELLS_PER_ENEMY: usize = 10;

pub const CAVE_MAX_ENEMIES: usize = 8;

// =====================================================
// Tunnel layout
// =====================================================

pub const TUNNEL_WALK_STEPS: usize = 60;

/// World units per tunnel cell
pub const TUNNEL_CELL_SIZE: f32 = 8.0;

/// Cumulative roll thresholds: +Z, -Z, +X, remainder -X
pub const TUNNEL_FORWARD_CHANCE: f32 = 0.50;
pub const TUNNEL_BACKWARD_CHANCE: f32 = 0.20;
pub const TUNNEL_RIGHT_CHANCE: f32 = 0.15;

pub const TUNNEL_HEIGHT: f32 = 8.0;

/// How far the sludge channel sits below the tunnel floor
pub const SLUDGE_DEPTH: f32 = 0.2;
pub const SLUDGE_COLOR: &str = "#4A5D23";
pub const SLUDGE_MATERIAL: &str = "Sludge";

pub const TUNNEL_COLUMN_RADIUS: f32 = 0.75;

pub const TUNNEL_ENEMY_SAMPLES: usize = 5;

/// Yaw (degrees) every tunnel enemy faces
pub const TUNNEL_ENEMY_FACING: f32 = 180.0;

// =====================================================
// Orchestration
// =====================================================

/// Upper bound on enemies synthesized when a layout emitted no children
pub const FALLBACK_MAX_ENEMIES: usize = 3;

/// Fallback positions are multiples of this step
pub const FALLBACK_POSITION_STEP: f32 = 10.0;

/// Fallback positions span [-STEPS, STEPS] * STEP on X and Z
pub const FALLBACK_POSITION_STEPS: i32 = 5;

/// Exit marker offset relative to the level root
pub const EXIT_MARKER_OFFSET: [f32; 3] = [0.0, 5.0, -80.0];

pub const EXIT_MARKER_PATH: &str = "props/level_exit.json";

pub const EXIT_TRIGGER_RADIUS: f32 = 3.0;

/// Scene the encounter system returns to: "{prefix}{recipe_id}"
pub const RETURN_SCENE_PREFIX: &str = "DungeonEntrance_";

pub const DEFAULT_ENEMY_PREFIX: &str = "Enemy";
