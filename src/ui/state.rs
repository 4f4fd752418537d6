use bevy::prelude::*;

/// Display-side copy of the run state the HUD and overlays render from.
/// Gameplay systems push into this; it never drives the simulation back.
#[derive(Resource, Debug, Clone)]
pub struct HudState {
    pub score: i32,
    pub life: i32,
    pub level: u32,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            score: 0,
            life: 100,
            level: 0,
        }
    }
}
