//! Scene description produced by level generation.
//!
//! A `ProceduralAsset` is a flat list of primitive parts (optionally
//! parented to other parts by id) plus references to child assets such as
//! enemies and the level exit. The renderer consumes it as camelCase JSON.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("duplicate part id `{0}`")]
    DuplicatePartId(String),
    #[error("duplicate child entity name `{0}`")]
    DuplicateChildName(String),
    #[error("part `{part}` references missing parent `{parent}`")]
    MissingParent { part: String, parent: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    pub const ONE: Vector3 = Vector3::new(1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Rotation about the vertical axis, in degrees
    pub const fn yaw(degrees: f32) -> Self {
        Self::new(0.0, degrees, 0.0)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Box,
    Cylinder,
    Sphere,
    Cone,
}

/// How a part combines with the geometry before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PartOperation {
    #[default]
    Union,
    Subtract,
}

/// A single primitive shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: String,
    pub shape: Shape,
    pub position: Vector3,
    pub rotation: Vector3,
    pub scale: Vector3,
    pub color_hex: String,
    pub material: String,
    /// Position is relative to this part when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub operation: PartOperation,
}

impl Part {
    pub fn new(id: impl Into<String>, shape: Shape, position: Vector3, scale: Vector3) -> Self {
        Self {
            id: id.into(),
            shape,
            position,
            rotation: Vector3::ZERO,
            scale,
            color_hex: "#FFFFFF".into(),
            material: "Default".into(),
            parent_id: None,
            operation: PartOperation::Union,
        }
    }

    pub fn cuboid(id: impl Into<String>, position: Vector3, scale: Vector3) -> Self {
        Self::new(id, Shape::Box, position, scale)
    }

    pub fn with_style(mut self, color_hex: &str, material: &str) -> Self {
        self.color_hex = color_hex.to_string();
        self.material = material.to_string();
        self
    }

    pub fn with_rotation(mut self, rotation: Vector3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_parent(mut self, parent_id: &str) -> Self {
        self.parent_id = Some(parent_id.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityTransform {
    pub position: Vector3,
    pub rotation: Vector3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_trigger: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_radius: Option<f32>,
}

impl EntityTransform {
    pub fn at(position: Vector3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn facing(mut self, yaw_degrees: f32) -> Self {
        self.rotation = Vector3::yaw(yaw_degrees);
        self
    }

    pub fn trigger(mut self, radius: f32) -> Self {
        self.is_trigger = Some(true);
        self.trigger_radius = Some(radius);
        self
    }
}

/// Gameplay data the encounter system reads off an enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyMetadata {
    pub is_enemy: bool,
    pub hp: u32,
    pub xp: u32,
    pub return_scene: String,
    pub asset_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitMetadata {
    pub is_exit: bool,
    pub return_scene: String,
}

/// Child metadata: typed records for known shapes, plus free-form extras
/// passed through to the renderer untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, serde_json::Value>")]
pub struct ChildMetadata {
    #[serde(flatten)]
    pub enemy: Option<EnemyMetadata>,
    #[serde(flatten)]
    pub exit: Option<ExitMetadata>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ChildMetadata {
    pub fn enemy(meta: EnemyMetadata) -> Self {
        Self {
            enemy: Some(meta),
            ..Default::default()
        }
    }

    pub fn exit(meta: ExitMetadata) -> Self {
        Self {
            exit: Some(meta),
            ..Default::default()
        }
    }

    pub fn is_enemy(&self) -> bool {
        self.enemy.as_ref().is_some_and(|e| e.is_enemy)
    }
}

const ENEMY_KEYS: [&str; 5] = ["isEnemy", "hp", "xp", "returnScene", "assetPath"];
const EXIT_KEYS: [&str; 2] = ["isExit", "returnScene"];

// Both typed records share `returnScene`, so each is decoded from the whole
// map before any key is claimed.
impl From<BTreeMap<String, serde_json::Value>> for ChildMetadata {
    fn from(mut map: BTreeMap<String, serde_json::Value>) -> Self {
        let object: serde_json::Map<String, serde_json::Value> =
            map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        let enemy = map
            .contains_key("isEnemy")
            .then(|| serde_json::from_value::<EnemyMetadata>(object.clone().into()).ok())
            .flatten();
        let exit = map
            .contains_key("isExit")
            .then(|| serde_json::from_value::<ExitMetadata>(object.into()).ok())
            .flatten();

        if enemy.is_some() {
            ENEMY_KEYS.iter().for_each(|k| {
                map.remove(*k);
            });
        }
        if exit.is_some() {
            EXIT_KEYS.iter().for_each(|k| {
                map.remove(*k);
            });
        }

        Self {
            enemy,
            exit,
            extra: map,
        }
    }
}

/// Reference to another loadable asset placed in the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildEntity {
    pub path: String,
    pub name: String,
    pub transform: EntityTransform,
    #[serde(default)]
    pub metadata: ChildMetadata,
}

impl ChildEntity {
    pub fn is_enemy(&self) -> bool {
        self.metadata.is_enemy()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    pub time: f32,
    pub part_id: String,
    pub position: Vector3,
    pub rotation: Vector3,
}

/// Animation timeline, carried through untouched
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub duration: f32,
    pub looping: bool,
    pub keyframes: Vec<Keyframe>,
}

/// Root of a generated scene description
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProceduralAsset {
    pub name: String,
    pub parts: Vec<Part>,
    pub children: Vec<ChildEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
}

impl ProceduralAsset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn push_part(&mut self, part: Part) {
        self.parts.push(part);
    }

    pub fn push_child(&mut self, child: ChildEntity) {
        self.children.push(child);
    }

    pub fn part(&self, id: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.id == id)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &ChildEntity> {
        self.children.iter().filter(|c| c.is_enemy())
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies().count()
    }

    /// Check id uniqueness and parent references
    pub fn validate(&self) -> Result<(), SceneError> {
        let mut ids = HashSet::with_capacity(self.parts.len());
        for part in &self.parts {
            if !ids.insert(part.id.as_str()) {
                return Err(SceneError::DuplicatePartId(part.id.clone()));
            }
        }
        for part in &self.parts {
            if let Some(parent) = &part.parent_id {
                if !ids.contains(parent.as_str()) {
                    return Err(SceneError::MissingParent {
                        part: part.id.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        let mut names = HashSet::with_capacity(self.children.len());
        for child in &self.children {
            if !names.insert(child.name.as_str()) {
                return Err(SceneError::DuplicateChildName(child.name.clone()));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
