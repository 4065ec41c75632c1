//! Room-and-corridor layout.
//!
//! Rooms are placed once each inside a 200x200 area; a candidate touching
//! an accepted room (with buffer) is dropped, never retried. Accepted rooms
//! are chained in list order by L-shaped corridors, so the room graph is
//! always a simple path.
//!
//! A room's `x`/`z` serve as both its corner (for overlap tests) and its
//! center (for geometry). Corridors and walls follow that convention.

use petgraph::graph::UnGraph;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::recipe::{Recipe, Theme};
use crate::scene::{Part, ProceduralAsset, Vector3};

/// Axis-aligned room footprint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomRect {
    pub x: f32,
    pub z: f32,
    pub w: f32,
    pub d: f32,
}

impl RoomRect {
    pub fn new(x: f32, z: f32, w: f32, d: f32) -> Self {
        Self { x, z, w, d }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x, self.z)
    }

    /// Overlap test on `[x, x+w] x [z, z+d]`, with self grown by `buffer`
    pub fn intersects(&self, other: &RoomRect, buffer: f32) -> bool {
        self.x - buffer < other.x + other.w
            && self.x + self.w + buffer > other.x
            && self.z - buffer < other.z + other.d
            && self.z + self.d + buffer > other.z
    }

    pub fn fallback() -> Self {
        Self::new(0.0, 0.0, FALLBACK_ROOM_SIZE, FALLBACK_ROOM_SIZE)
    }
}

/// Direction a corridor segment runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

/// Straight corridor piece: from `start` to `end` along `axis`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorridorSegment {
    pub axis: Axis,
    pub start: (f32, f32),
    pub end: (f32, f32),
}

/// L-shaped link between two consecutive rooms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub from: usize,
    pub to: usize,
    pub horizontal: CorridorSegment,
    pub vertical: CorridorSegment,
}

/// Outcome of a rooms run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomsLayout {
    /// Candidates attempted
    pub requested: usize,
    pub rooms: Vec<RoomRect>,
    pub corridors: Vec<Corridor>,
    pub used_fallback_room: bool,
}

impl RoomsLayout {
    /// Rooms as nodes, corridors as edges
    pub fn connectivity_graph(&self) -> UnGraph<usize, ()> {
        let mut graph = UnGraph::new_undirected();
        let nodes: Vec<_> = (0..self.rooms.len()).map(|i| graph.add_node(i)).collect();
        for corridor in &self.corridors {
            graph.add_edge(nodes[corridor.from], nodes[corridor.to], ());
        }
        graph
    }
}

/// Place rooms without geometry
pub fn place_rooms<R: Rng + ?Sized>(rng: &mut R) -> (usize, Vec<RoomRect>) {
    let requested = rng.gen_range(ROOMS_MIN_COUNT..ROOMS_MAX_COUNT);
    let mut rooms: Vec<RoomRect> = Vec::with_capacity(requested);

    for _ in 0..requested {
        let w = rng.gen_range(ROOM_MIN_SIZE..=ROOM_MAX_SIZE);
        let d = rng.gen_range(ROOM_MIN_SIZE..=ROOM_MAX_SIZE);
        let x_limit = ROOMS_AREA_HALF_EXTENT - w / 2.0;
        let z_limit = ROOMS_AREA_HALF_EXTENT - d / 2.0;
        let candidate = RoomRect::new(
            rng.gen_range(-x_limit..=x_limit),
            rng.gen_range(-z_limit..=z_limit),
            w,
            d,
        );

        if rooms
            .iter()
            .any(|r| candidate.intersects(r, ROOM_OVERLAP_BUFFER))
        {
            continue;
        }
        rooms.push(candidate);
    }

    (requested, rooms)
}

/// Chain rooms in list order
pub fn connect_rooms(rooms: &[RoomRect]) -> Vec<Corridor> {
    rooms
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let (ax, az) = pair[0].center();
            let (bx, bz) = pair[1].center();
            Corridor {
                from: i,
                to: i + 1,
                horizontal: CorridorSegment {
                    axis: Axis::X,
                    start: (ax, az),
                    end: (bx, az),
                },
                vertical: CorridorSegment {
                    axis: Axis::Z,
                    start: (bx, az),
                    end: (bx, bz),
                },
            }
        })
        .collect()
}

/// Generate the rooms layout into `asset`
pub fn generate<R: Rng + ?Sized>(
    asset: &mut ProceduralAsset,
    recipe: &Recipe,
    rng: &mut R,
) -> RoomsLayout {
    let (requested, rooms) = place_rooms(rng);
    build_layout(asset, recipe, requested, rooms)
}

/// Emit geometry for already placed rooms. An empty placement gets the
/// single fallback room; `place_rooms` always accepts its first candidate,
/// so only callers supplying their own placement reach that branch.
pub fn build_layout(
    asset: &mut ProceduralAsset,
    recipe: &Recipe,
    requested: usize,
    mut rooms: Vec<RoomRect>,
) -> RoomsLayout {
    let used_fallback_room = rooms.is_empty();
    if used_fallback_room {
        rooms.push(RoomRect::fallback());
    }

    for (i, room) in rooms.iter().enumerate() {
        build_room(asset, &recipe.theme, i, room);
    }

    let corridors = connect_rooms(&rooms);
    for (i, corridor) in corridors.iter().enumerate() {
        build_segment(asset, &recipe.theme, &format!("corridor_{i}_x"), &corridor.horizontal);
        build_segment(asset, &recipe.theme, &format!("corridor_{i}_z"), &corridor.vertical);
    }

    tracing::debug!(
        requested,
        placed = rooms.len(),
        corridors = corridors.len(),
        "rooms layout generated"
    );

    RoomsLayout {
        requested,
        rooms,
        corridors,
        used_fallback_room,
    }
}

/// Floor, ceiling and four walls
fn build_room(asset: &mut ProceduralAsset, theme: &Theme, index: usize, room: &RoomRect) {
    let (cx, cz) = room.center();
    let half_h = ROOM_WALL_HEIGHT / 2.0;
    let prefix = format!("room_{index}");

    asset.push_part(
        Part::cuboid(
            format!("{prefix}_floor"),
            Vector3::new(cx, 0.0, cz),
            Vector3::new(room.w, SLAB_THICKNESS, room.d),
        )
        .with_style(&theme.floor_color, &theme.floor_material),
    );
    asset.push_part(
        Part::cuboid(
            format!("{prefix}_ceiling"),
            Vector3::new(cx, ROOM_WALL_HEIGHT, cz),
            Vector3::new(room.w, SLAB_THICKNESS, room.d),
        )
        .with_style(&theme.wall_color, &theme.wall_material),
    );

    let walls = [
        (
            "north",
            Vector3::new(cx, half_h, cz + room.d / 2.0),
            Vector3::new(room.w, ROOM_WALL_HEIGHT, WALL_THICKNESS),
        ),
        (
            "south",
            Vector3::new(cx, half_h, cz - room.d / 2.0),
            Vector3::new(room.w, ROOM_WALL_HEIGHT, WALL_THICKNESS),
        ),
        (
            "east",
            Vector3::new(cx + room.w / 2.0, half_h, cz),
            Vector3::new(WALL_THICKNESS, ROOM_WALL_HEIGHT, room.d),
        ),
        (
            "west",
            Vector3::new(cx - room.w / 2.0, half_h, cz),
            Vector3::new(WALL_THICKNESS, ROOM_WALL_HEIGHT, room.d),
        ),
    ];
    for (side, position, scale) in walls {
        asset.push_part(
            Part::cuboid(format!("{prefix}_wall_{side}"), position, scale)
                .with_style(&theme.wall_color, &theme.wall_material),
        );
    }
}

/// Floor + ceiling pair covering one corridor segment
fn build_segment(asset: &mut ProceduralAsset, theme: &Theme, id: &str, seg: &CorridorSegment) {
    let mid_x = (seg.start.0 + seg.end.0) / 2.0;
    let mid_z = (seg.start.1 + seg.end.1) / 2.0;
    let (sx, sz) = match seg.axis {
        Axis::X => ((seg.end.0 - seg.start.0).abs() + CORRIDOR_WIDTH, CORRIDOR_WIDTH),
        Axis::Z => (CORRIDOR_WIDTH, (seg.end.1 - seg.start.1).abs() + CORRIDOR_WIDTH),
    };

    asset.push_part(
        Part::cuboid(
            format!("{id}_floor"),
            Vector3::new(mid_x, 0.0, mid_z),
            Vector3::new(sx, SLAB_THICKNESS, sz),
        )
        .with_style(&theme.floor_color, &theme.floor_material),
    );
    asset.push_part(
        Part::cuboid(
            format!("{id}_ceiling"),
            Vector3::new(mid_x, ROOM_WALL_HEIGHT, mid_z),
            Vector3::new(sx, SLAB_THICKNESS, sz),
        )
        .with_style(&theme.wall_color, &theme.wall_material),
    );
}
