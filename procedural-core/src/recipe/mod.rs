//! Dungeon recipes: the declarative input to level generation.
//!
//! A recipe names a layout kind, a visual theme and an enemy roster.
//! Recipes arrive as JSON authored in either PascalCase or camelCase, so
//! decoding lower-cases every object key first and matches fields
//! case-insensitively. Serialization always writes camelCase.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::DEFAULT_ENEMY_PREFIX;

#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("recipe is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("recipe root must be a JSON object")]
    NotAnObject,
}

/// Closed set of layout algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutType {
    Rooms,
    Cave,
    Tunnel,
}

impl LayoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutType::Rooms => "Rooms",
            LayoutType::Cave => "Cave",
            LayoutType::Tunnel => "Tunnel",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rooms" => Some(LayoutType::Rooms),
            "cave" => Some(LayoutType::Cave),
            "tunnel" => Some(LayoutType::Tunnel),
            _ => None,
        }
    }

    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(LayoutType::Rooms),
            1 => Some(LayoutType::Cave),
            2 => Some(LayoutType::Tunnel),
            _ => None,
        }
    }

    pub fn all() -> [LayoutType; 3] {
        [LayoutType::Rooms, LayoutType::Cave, LayoutType::Tunnel]
    }
}

/// Wire form of `layoutType`: either a name or an enum index
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawLayout {
    Index(i64),
    Name(String),
}

/// Layout as written in the recipe. Anything outside the closed set is kept
/// verbatim so the orchestrator can report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawLayout", into = "RawLayout")]
pub enum LayoutSelection {
    Known(LayoutType),
    Unrecognized(String),
}

impl Default for LayoutSelection {
    fn default() -> Self {
        LayoutSelection::Unrecognized(String::new())
    }
}

impl From<RawLayout> for LayoutSelection {
    fn from(raw: RawLayout) -> Self {
        match raw {
            RawLayout::Index(i) => LayoutType::from_index(i)
                .map(LayoutSelection::Known)
                .unwrap_or_else(|| LayoutSelection::Unrecognized(i.to_string())),
            RawLayout::Name(name) => LayoutType::from_name(&name)
                .map(LayoutSelection::Known)
                .unwrap_or(LayoutSelection::Unrecognized(name)),
        }
    }
}

impl From<LayoutSelection> for RawLayout {
    fn from(selection: LayoutSelection) -> Self {
        match selection {
            LayoutSelection::Known(t) => RawLayout::Name(t.as_str().to_string()),
            LayoutSelection::Unrecognized(raw) => RawLayout::Name(raw),
        }
    }
}

impl From<LayoutType> for LayoutSelection {
    fn from(t: LayoutType) -> Self {
        LayoutSelection::Known(t)
    }
}

/// Colors and materials applied to generated geometry.
/// `atmosphere_color` is only consumed by the renderer (fog/ambient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct Theme {
    #[serde(rename(deserialize = "floorcolor"))]
    pub floor_color: String,
    #[serde(rename(deserialize = "floormaterial"))]
    pub floor_material: String,
    #[serde(rename(deserialize = "wallcolor"))]
    pub wall_color: String,
    #[serde(rename(deserialize = "wallmaterial"))]
    pub wall_material: String,
    #[serde(rename(deserialize = "atmospherecolor"))]
    pub atmosphere_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            floor_color: "#5A5A5A".into(),
            floor_material: "Stone".into(),
            wall_color: "#3C3C3C".into(),
            wall_material: "Stone".into(),
            atmosphere_color: "#101018".into(),
        }
    }
}

/// One entry of the enemy roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct EnemySpec {
    #[serde(rename(deserialize = "assetpath"))]
    pub asset_path: String,
    #[serde(rename(deserialize = "nameprefix"))]
    pub name_prefix: String,
    pub hp: u32,
    pub xp: u32,
}

impl Default for EnemySpec {
    fn default() -> Self {
        Self {
            asset_path: String::new(),
            name_prefix: DEFAULT_ENEMY_PREFIX.into(),
            hp: 1,
            xp: 0,
        }
    }
}

/// Full dungeon recipe
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(rename(deserialize = "layouttype"))]
    pub layout_type: LayoutSelection,
    pub theme: Theme,
    pub enemies: Vec<EnemySpec>,
}

impl Recipe {
    pub fn new(id: &str, name: &str, layout: LayoutType) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            layout_type: LayoutSelection::Known(layout),
            theme: Theme::default(),
            enemies: Vec::new(),
        }
    }

    pub fn with_enemy(mut self, enemy: EnemySpec) -> Self {
        self.enemies.push(enemy);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Decode a recipe, matching field names case-insensitively
    pub fn from_json(json: &str) -> Result<Self, RecipeError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, RecipeError> {
        if !value.is_object() {
            return Err(RecipeError::NotAnObject);
        }
        Ok(serde_json::from_value(lowercase_keys(value))?)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn has_enemies(&self) -> bool {
        !self.enemies.is_empty()
    }

    /// Scene the encounter system sends the player back to
    pub fn return_scene(&self) -> String {
        format!("{}{}", crate::constants::RETURN_SCENE_PREFIX, self.id)
    }
}

/// Recursively lower-case every object key. Null members are dropped so
/// they fall back to field defaults like absent ones.
fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.to_lowercase(), lowercase_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}
