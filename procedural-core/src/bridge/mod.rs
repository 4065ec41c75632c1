//! FFI Bridge Layer: level generator <-> host runtime
//!
//! C-ABI functions for hosts that load the generator as a shared library
//! (e.g. a WASM/JS shim or a native engine plugin). Data crosses the
//! boundary as JSON. Returned strings are heap-allocated and must be freed
//! with `free_string`.

use serde::{Deserialize, Serialize};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use crate::generation::{generate_level_seeded, GenerationReport, LevelSeed};
use crate::recipe::Recipe;
use crate::scene::ProceduralAsset;

// ========================
// Data transfer types
// ========================

/// Generation response: the asset for the renderer plus the run report
#[derive(Debug, Serialize, Deserialize)]
pub struct LevelResponse {
    pub asset: ProceduralAsset,
    pub report: GenerationReport,
}

// ========================
// Helpers
// ========================

fn json_to_cstring<T: Serialize>(value: &T) -> *mut c_char {
    match serde_json::to_string(value) {
        Ok(json) => CString::new(json).unwrap_or_default().into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

fn parse_cstr(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_owned()) }
}

/// Free a string returned by any bridge function.
/// `ptr` must come from this library or be null.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            drop(CString::from_raw(ptr));
        }
    }
}

// ========================
// C-ABI: Level Generation
// ========================

/// Generate a level from recipe JSON. Returns null on null or undecodable
/// input; any decodable recipe yields a level.
#[no_mangle]
pub extern "C" fn generate_level_json(
    recipe_json: *const c_char,
    depth: u32,
    seed: u64,
) -> *mut c_char {
    let Some(json) = parse_cstr(recipe_json) else {
        tracing::warn!("generate_level_json called with null recipe");
        return std::ptr::null_mut();
    };

    let recipe = match Recipe::from_json(&json) {
        Ok(recipe) => recipe,
        Err(e) => {
            tracing::warn!(error = %e, "rejected recipe");
            return std::ptr::null_mut();
        }
    };

    let level = generate_level_seeded(&recipe, depth, seed);
    json_to_cstring(&LevelResponse {
        asset: level.asset,
        report: level.report,
    })
}

/// Seed the generator derives for (seed, recipe id, depth); 0 on null id
#[no_mangle]
pub extern "C" fn level_seed_hash(seed: u64, recipe_id: *const c_char, depth: u32) -> u64 {
    match parse_cstr(recipe_id) {
        Some(id) => LevelSeed { seed }.level_hash(&id, depth),
        None => 0,
    }
}

/// 1 if the recipe decodes, 0 if not, -1 on null
#[no_mangle]
pub extern "C" fn validate_recipe_json(recipe_json: *const c_char) -> i32 {
    match parse_cstr(recipe_json) {
        Some(json) => i32::from(Recipe::from_json(&json).is_ok()),
        None => -1,
    }
}
