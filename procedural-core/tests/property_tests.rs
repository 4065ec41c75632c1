//! Property-based tests using proptest
//!
//! Invariants that must hold for ALL seeds:
//! - Rooms: inside the placement area, no overlaps, chained into one path
//! - Cave: spawn cells open, enemy count follows the open-cell formula
//! - Tunnel: bounded cell count, always contains the origin
//! - Every level: valid scene, single trailing exit, deterministic output

use proptest::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use dungeon_core::constants::*;
use dungeon_core::generation::{cave, generate_level_seeded, population, rooms, tunnel};
use dungeon_core::recipe::{EnemySpec, LayoutType, Recipe};
use dungeon_core::scene::ProceduralAsset;

fn roster_recipe(layout: LayoutType) -> Recipe {
    Recipe::new("prop", "Prop", layout).with_enemy(EnemySpec {
        asset_path: "enemies/bat.json".into(),
        name_prefix: "Bat".into(),
        hp: 4,
        xp: 1,
    })
}

fn layout_strategy() -> impl Strategy<Value = LayoutType> {
    prop_oneof![
        Just(LayoutType::Rooms),
        Just(LayoutType::Cave),
        Just(LayoutType::Tunnel),
    ]
}

// ============================================================
// Rooms
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_rooms_in_bounds_and_disjoint(seed in any::<u64>()) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let (requested, placed) = rooms::place_rooms(&mut rng);

        prop_assert!((ROOMS_MIN_COUNT..ROOMS_MAX_COUNT).contains(&requested));
        prop_assert!(placed.len() <= requested);

        for room in &placed {
            prop_assert!(room.x.abs() + room.w / 2.0 <= ROOMS_AREA_HALF_EXTENT + 1e-3);
            prop_assert!(room.z.abs() + room.d / 2.0 <= ROOMS_AREA_HALF_EXTENT + 1e-3);
            prop_assert!(room.w >= ROOM_MIN_SIZE && room.w <= ROOM_MAX_SIZE);
            prop_assert!(room.d >= ROOM_MIN_SIZE && room.d <= ROOM_MAX_SIZE);
        }
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                prop_assert!(!a.intersects(b, ROOM_OVERLAP_BUFFER));
            }
        }
    }

    #[test]
    fn prop_rooms_form_a_path(seed in any::<u64>()) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut asset = ProceduralAsset::new("rooms");
        let layout = rooms::generate(&mut asset, &Recipe::new("r", "R", LayoutType::Rooms), &mut rng);

        prop_assert!(!layout.rooms.is_empty());
        prop_assert_eq!(layout.corridors.len(), layout.rooms.len() - 1);
        let graph = layout.connectivity_graph();
        prop_assert_eq!(petgraph::algo::connected_components(&graph), 1);
    }
}

// ============================================================
// Cave
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_cave_spawn_always_open(seed in any::<u64>()) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let grid = cave::carve(&mut rng);
        for (x, z) in grid.spawn_cells() {
            prop_assert!(!grid.is_alive(x, z));
        }
    }

    #[test]
    fn prop_cave_enemy_count_formula(seed in any::<u64>()) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut asset = ProceduralAsset::new("cave");
        let layout = cave::generate(&mut asset, &roster_recipe(LayoutType::Cave), &mut rng);
        let expected = population::cave_enemy_count(layout.open_cells.len());
        prop_assert_eq!(asset.enemy_count(), expected);
        prop_assert!(expected <= CAVE_MAX_ENEMIES);
    }
}

// ============================================================
// Tunnel
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_tunnel_bounded_and_rooted(seed in any::<u64>()) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let cells = tunnel::carve_path(&mut rng);
        prop_assert!(cells.len() <= TUNNEL_WALK_STEPS + 1);
        prop_assert!(cells.contains(&(0, 0)));
        for &(x, z) in &cells {
            prop_assert!(x.unsigned_abs() as usize <= TUNNEL_WALK_STEPS);
            prop_assert!(z.unsigned_abs() as usize <= TUNNEL_WALK_STEPS);
        }
    }
}

// ============================================================
// Whole-level properties
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(60))]

    #[test]
    fn prop_level_is_valid_with_trailing_exit(
        seed in any::<u64>(),
        depth in 1u32..=50,
        layout in layout_strategy(),
    ) {
        let recipe = roster_recipe(layout);
        let level = generate_level_seeded(&recipe, depth, seed);

        prop_assert!(level.asset.validate().is_ok());
        let exits = level.asset.children.iter().filter(|c| c.metadata.exit.is_some()).count();
        prop_assert_eq!(exits, 1);
        let last = level.asset.children.last().unwrap();
        prop_assert!(last.metadata.exit.is_some());
        prop_assert!(level.report.enemies_spawned >= 1);
        prop_assert_eq!(level.report.parts, level.asset.parts.len());
    }

    #[test]
    fn prop_level_generation_is_deterministic(
        seed in any::<u64>(),
        depth in 1u32..=50,
        layout in layout_strategy(),
    ) {
        let recipe = roster_recipe(layout);
        let a = generate_level_seeded(&recipe, depth, seed);
        let b = generate_level_seeded(&recipe, depth, seed);
        prop_assert_eq!(a.asset.to_json(), b.asset.to_json());
    }
}
