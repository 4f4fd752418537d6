/*
Skytread
*/
use bevy::prelude::*;

/// Half-extents of every scoring platform, in world units.
pub const PLATFORM_HALF: Vec3 = Vec3::new(1.0, 0.25, 1.0);

/// Half-extents of the victory point pad.
pub const VICTORY_HALF: Vec3 = Vec3::new(0.75, 0.25, 0.75);

/// Falling below this height counts as falling off the course.
pub const KILL_PLANE_Y: f32 = -20.0;

/// Static layout for one level: where the player starts, where the scoring
/// platforms sit and where the victory point is. Geometry is authored here
/// rather than loaded from disk; the catalog is small.
pub struct LevelDef {
    pub spawn: Vec3,
    pub platforms: &'static [Vec3],
    pub victory_point: Vec3,
}

static LEVELS: &[LevelDef] = &[
    LevelDef {
        spawn: Vec3::new(0.0, 1.0, 0.0),
        platforms: &[
            Vec3::new(0.0, 1.0, -6.0),
            Vec3::new(2.5, 2.0, -10.0),
            Vec3::new(0.0, 3.0, -14.0),
            Vec3::new(-2.5, 4.0, -18.0),
        ],
        victory_point: Vec3::new(-2.5, 4.75, -22.0),
    },
    LevelDef {
        spawn: Vec3::new(0.0, 1.0, 0.0),
        platforms: &[
            Vec3::new(-2.0, 1.0, -5.0),
            Vec3::new(2.0, 2.0, -8.0),
            Vec3::new(-2.0, 3.0, -11.0),
            Vec3::new(2.0, 4.0, -14.0),
            Vec3::new(-2.0, 5.0, -17.0),
            Vec3::new(2.0, 6.0, -20.0),
        ],
        victory_point: Vec3::new(2.0, 6.75, -24.0),
    },
    LevelDef {
        spawn: Vec3::new(0.0, 1.0, 0.0),
        platforms: &[
            Vec3::new(0.0, 1.5, -7.0),
            Vec3::new(4.0, 2.5, -7.0),
            Vec3::new(4.0, 3.5, -13.0),
            Vec3::new(0.0, 4.5, -13.0),
            Vec3::new(-4.0, 5.5, -13.0),
            Vec3::new(-4.0, 6.5, -19.0),
            Vec3::new(0.0, 7.5, -19.0),
        ],
        victory_point: Vec3::new(0.0, 8.25, -25.0),
    },
];

pub fn level_count() -> u32 {
    LEVELS.len() as u32
}

/// Levels past the end of the catalog clamp onto the last one, so a stale
/// session file can never index out of bounds.
pub fn level_def(index: u32) -> &'static LevelDef {
    let i = (index as usize).min(LEVELS.len() - 1);
    &LEVELS[i]
}

/// Whether `index` is the last authored level; crossing its victory point
/// ends the run with the victory overlay instead of loading another level.
pub fn is_final_level(index: u32) -> bool {
    index + 1 >= level_count()
}

/// Set when the player dies: rebuild the current level from scratch.
#[derive(Resource, Debug, Clone, Default)]
pub struct RestartRequested(pub bool);

/// Set when a victory point on a non-final level is crossed: tear down the
/// current level and build the next one, keeping run stats.
#[derive(Resource, Debug, Clone, Default)]
pub struct AdvanceLevelRequested(pub bool);
