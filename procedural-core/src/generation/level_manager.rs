//! Level transitions for hosts running Bevy.
//!
//! Each transition request generates the next level and replaces the
//! single `ActiveLevel` resource wholesale, so the renderer never sees two
//! generated levels merged.

use bevy::prelude::*;

use super::{generate_level_seeded, GenerationReport, LevelSeed};
use crate::recipe::Recipe;
use crate::scene::ProceduralAsset;

pub struct LevelGenerationPlugin {
    pub seed: u64,
}

impl Default for LevelGenerationPlugin {
    fn default() -> Self {
        Self {
            seed: LevelSeed::default().seed,
        }
    }
}

impl Plugin for LevelGenerationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(LevelProgress::new(self.seed))
            .add_event::<LevelTransitionEvent>()
            .add_event::<LevelReadyEvent>()
            .add_systems(Update, handle_level_transitions);
    }
}

/// The level currently handed to the renderer
#[derive(Resource, Debug, Clone)]
pub struct ActiveLevel {
    pub recipe_id: String,
    pub depth: u32,
    pub asset: ProceduralAsset,
    pub report: GenerationReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthDirection {
    Descend,
    Ascend,
}

/// Request: leave the current level through its exit
#[derive(Event, Debug, Clone)]
pub struct LevelTransitionEvent {
    pub recipe: Recipe,
    pub direction: DepthDirection,
}

/// Emitted once the new level is active
#[derive(Event, Debug, Clone)]
pub struct LevelReadyEvent {
    pub recipe_id: String,
    pub depth: u32,
}

/// Dungeon progression tracker
#[derive(Resource, Debug)]
pub struct LevelProgress {
    pub seed: LevelSeed,
    /// 0 until the first level is entered
    pub current_depth: u32,
    pub deepest_reached: u32,
    pub levels_cleared: Vec<u32>,
}

impl LevelProgress {
    pub fn new(seed: u64) -> Self {
        Self {
            seed: LevelSeed { seed },
            current_depth: 0,
            deepest_reached: 0,
            levels_cleared: Vec::new(),
        }
    }

    /// Depth a transition leads to, `None` when ascending past level 1
    pub fn next_depth(&self, direction: DepthDirection) -> Option<u32> {
        match direction {
            DepthDirection::Descend => Some(self.current_depth + 1),
            DepthDirection::Ascend if self.current_depth > 1 => Some(self.current_depth - 1),
            DepthDirection::Ascend => None,
        }
    }

    pub fn is_cleared(&self, depth: u32) -> bool {
        self.levels_cleared.contains(&depth)
    }

    pub fn clear_level(&mut self, depth: u32) {
        if !self.levels_cleared.contains(&depth) {
            self.levels_cleared.push(depth);
        }
    }
}

/// System: generate the next level on transition
pub fn handle_level_transitions(
    mut transition_events: EventReader<LevelTransitionEvent>,
    mut ready_events: EventWriter<LevelReadyEvent>,
    mut progress: ResMut<LevelProgress>,
    mut commands: Commands,
) {
    for event in transition_events.read() {
        let Some(depth) = progress.next_depth(event.direction) else {
            continue;
        };

        let level = generate_level_seeded(&event.recipe, depth, progress.seed.seed);

        progress.current_depth = depth;
        progress.deepest_reached = progress.deepest_reached.max(depth);

        commands.insert_resource(ActiveLevel {
            recipe_id: event.recipe.id.clone(),
            depth,
            asset: level.asset,
            report: level.report,
        });

        ready_events.send(LevelReadyEvent {
            recipe_id: event.recipe.id.clone(),
            depth,
        });

        tracing::info!(recipe = %event.recipe.id, depth, "level transition complete");
    }
}
