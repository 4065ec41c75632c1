//! Edge case & boundary tests
//!
//! Behavior at the library boundary:
//! - Null pointer inputs -> null / sentinel, never a crash
//! - Empty and malformed JSON -> rejected, no level produced
//! - Recipes missing optional sections -> defaults applied
//! - Unknown layout names -> geometry-free level that still has an exit
//! - Extreme seeds and depths

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use dungeon_core::bridge::*;

// ============================================================
// Helpers
// ============================================================

fn cstr(s: &str) -> CString {
    CString::new(s).unwrap()
}

fn ptr_to_json(ptr: *mut c_char) -> serde_json::Value {
    assert!(!ptr.is_null(), "FFI returned null pointer");
    let s = unsafe { CStr::from_ptr(ptr).to_str().unwrap().to_owned() };
    free_string(ptr);
    serde_json::from_str(&s).unwrap_or_else(|e| panic!("Invalid JSON from FFI: {e}\nRaw: {s}"))
}

fn generate(recipe: &str, depth: u32, seed: u64) -> serde_json::Value {
    let input = cstr(recipe);
    ptr_to_json(generate_level_json(input.as_ptr(), depth, seed))
}

fn children_where<'a>(
    level: &'a serde_json::Value,
    key: &'a str,
) -> impl Iterator<Item = &'a serde_json::Value> + 'a {
    level["asset"]["children"]
        .as_array()
        .unwrap()
        .iter()
        .filter(move |c| c["metadata"][key] == true)
}

// ============================================================
// 1. Null pointer safety
// ============================================================

#[test]
fn null_input_generate_level_json() {
    let result = generate_level_json(std::ptr::null(), 1, 42);
    assert!(result.is_null(), "generate_level_json(null, ...) should return null");
}

#[test]
fn null_input_validate_recipe_json() {
    assert_eq!(validate_recipe_json(std::ptr::null()), -1);
}

#[test]
fn null_input_level_seed_hash() {
    assert_eq!(level_seed_hash(42, std::ptr::null(), 1), 0);
}

#[test]
fn free_string_null_is_noop() {
    free_string(std::ptr::null_mut());
    free_string(std::ptr::null_mut());
}

// ============================================================
// 2. Malformed input
// ============================================================

#[test]
fn malformed_json_rejected() {
    for bad in ["", "{", "not json", "{\"id\": }", "[1, 2, 3]", "42", "null"] {
        let input = cstr(bad);
        assert!(
            generate_level_json(input.as_ptr(), 1, 1).is_null(),
            "expected null for input {bad:?}"
        );
        assert_eq!(validate_recipe_json(input.as_ptr()), 0, "input {bad:?}");
    }
}

#[test]
fn wrong_field_type_rejected() {
    let input = cstr(r#"{"id": "x", "enemies": "goblin"}"#);
    assert_eq!(validate_recipe_json(input.as_ptr()), 0);
    assert!(generate_level_json(input.as_ptr(), 1, 1).is_null());
}

// ============================================================
// 3. Missing optional sections
// ============================================================

#[test]
fn empty_object_is_a_valid_recipe() {
    let input = cstr("{}");
    assert_eq!(validate_recipe_json(input.as_ptr()), 1);

    // No layout: geometry-free level with only the exit
    let level = generate("{}", 1, 1);
    assert_eq!(level["asset"]["parts"].as_array().unwrap().len(), 0);
    assert_eq!(level["asset"]["children"].as_array().unwrap().len(), 1);
    assert_eq!(children_where(&level, "isExit").count(), 1);
}

#[test]
fn empty_enemy_roster_spawns_nothing() {
    for layout in ["Rooms", "Cave", "Tunnel"] {
        let recipe = format!(r#"{{"id": "calm", "name": "Calm", "layoutType": "{layout}", "enemies": []}}"#);
        let level = generate(&recipe, 1, 9);
        assert_eq!(children_where(&level, "isEnemy").count(), 0, "layout {layout}");
        assert_eq!(level["report"]["fallback_population"], false);
    }
}

#[test]
fn missing_theme_uses_defaults() {
    let level = generate(r#"{"id": "plain", "name": "Plain", "layoutType": "Tunnel"}"#, 1, 3);
    let parts = level["asset"]["parts"].as_array().unwrap();
    let floor = parts
        .iter()
        .find(|p| p["id"] == "tunnel_0_0_floor")
        .expect("origin floor tile");
    assert_eq!(floor["colorHex"], "#5A5A5A");
    assert_eq!(floor["material"], "Stone");
}

#[test]
fn null_sections_use_defaults() {
    let recipes = [
        r#"{"id": "n", "name": "N", "layoutType": "Tunnel", "theme": null}"#,
        r#"{"id": "n", "name": "N", "layoutType": "Tunnel", "enemies": null}"#,
        r#"{"Id": "n", "Name": "N", "LayoutType": "Tunnel", "Theme": {"FloorColor": null}}"#,
    ];
    for recipe in recipes {
        let input = cstr(recipe);
        assert_eq!(validate_recipe_json(input.as_ptr()), 1, "recipe {recipe}");

        let level = generate(recipe, 1, 3);
        let floor = level["asset"]["parts"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["id"] == "tunnel_0_0_floor")
            .expect("origin floor tile");
        assert_eq!(floor["colorHex"], "#5A5A5A", "recipe {recipe}");
        assert_eq!(floor["material"], "Stone", "recipe {recipe}");
        assert_eq!(children_where(&level, "isEnemy").count(), 0);
    }
}

#[test]
fn enemy_without_prefix_uses_default() {
    let level = generate(
        r#"{"id": "t", "name": "T", "layoutType": "Tunnel", "enemies": [{"assetPath": "enemies/slime.json", "hp": 3}]}"#,
        1,
        11,
    );
    let enemies: Vec<_> = children_where(&level, "isEnemy").collect();
    assert_eq!(enemies.len(), 5);
    for enemy in enemies {
        assert!(enemy["name"].as_str().unwrap().starts_with("Enemy_"));
        assert_eq!(enemy["metadata"]["hp"], 3);
        assert_eq!(enemy["metadata"]["xp"], 0);
    }
}

// ============================================================
// 4. Unknown layout
// ============================================================

#[test]
fn unknown_layout_still_produces_exit_and_fallback() {
    let level = generate(
        r#"{"id": "maze", "name": "Maze", "layoutType": "Labyrinth",
            "enemies": [{"assetPath": "enemies/imp.json", "namePrefix": "Imp", "hp": 9, "xp": 3}]}"#,
        2,
        5,
    );
    assert_eq!(level["asset"]["name"], "Maze (Level 2)");
    assert!(level["asset"]["parts"].as_array().unwrap().is_empty());

    let enemies = children_where(&level, "isEnemy").count();
    assert!((1..=3).contains(&enemies));
    assert_eq!(level["report"]["fallback_population"], true);

    let children = level["asset"]["children"].as_array().unwrap();
    assert_eq!(children.last().unwrap()["name"], "maze_Exit");
}

#[test]
fn out_of_range_layout_index_is_unrecognized() {
    let level = generate(r#"{"id": "x", "name": "X", "layoutType": 7}"#, 1, 1);
    assert!(level["asset"]["parts"].as_array().unwrap().is_empty());
}

// ============================================================
// 5. Extreme values
// ============================================================

#[test]
fn extreme_seed_and_depth() {
    for (seed, depth) in [(0, 0), (u64::MAX, u32::MAX), (1, 1)] {
        let level = generate(r#"{"id": "deep", "name": "Deep", "layoutType": "Cave"}"#, depth, seed);
        assert_eq!(level["report"]["depth"], depth);
        assert_eq!(children_where(&level, "isExit").count(), 1);
    }
}

#[test]
fn seed_hash_distinguishes_inputs() {
    let a = cstr("crypt");
    let b = cstr("sewer");
    assert_eq!(level_seed_hash(1, a.as_ptr(), 1), level_seed_hash(1, a.as_ptr(), 1));
    assert_ne!(level_seed_hash(1, a.as_ptr(), 1), level_seed_hash(1, b.as_ptr(), 1));
    assert_ne!(level_seed_hash(1, a.as_ptr(), 1), level_seed_hash(2, a.as_ptr(), 1));
    assert_ne!(level_seed_hash(1, a.as_ptr(), 1), level_seed_hash(1, a.as_ptr(), 2));
}
