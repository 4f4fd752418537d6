/*
Skytread
*/
use bevy::audio::SpatialListener;
use bevy::prelude::*;

use crate::combat::projectiles::ProjectileAssets;
use crate::level::{self, LevelDef, PLATFORM_HALF, VICTORY_HALF};
use crate::player::{LookAngles, Player, PlayerMotion, PlayerVitals};
use crate::scoring::{Platform, VictoryPoint};
use crate::session::SessionData;
use crate::ui::HudState;

/// Half-extents of the take-off pad under the spawn point.
pub const GROUND_HALF: Vec3 = Vec3::new(4.0, 0.25, 4.0);

/// The non-scoring surface the player starts on.
#[derive(Component)]
pub struct Ground;

/// Everything torn down and rebuilt on a level reload. The player, lights
/// and UI survive reloads and are tagged with nothing.
#[derive(Component)]
pub struct LevelEntity;

/// Build one level's geometry: take-off pad, scoring platforms, victory pad.
pub fn spawn_level(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    def: &LevelDef,
) {
    let ground_mesh = meshes.add(Cuboid::from_size(GROUND_HALF * 2.0));
    let platform_mesh = meshes.add(Cuboid::from_size(PLATFORM_HALF * 2.0));
    let victory_mesh = meshes.add(Cuboid::from_size(VICTORY_HALF * 2.0));

    let ground_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.25, 0.27, 0.32),
        ..default()
    });
    let platform_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.5, 0.8),
        ..default()
    });
    let victory_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.95, 0.8, 0.2),
        emissive: LinearRgba::new(1.4, 1.1, 0.2, 1.0),
        ..default()
    });

    commands.spawn((
        Ground,
        LevelEntity,
        Mesh3d(ground_mesh),
        MeshMaterial3d(ground_mat),
        Transform::from_xyz(def.spawn.x, -GROUND_HALF.y, def.spawn.z),
    ));

    for pos in def.platforms {
        commands.spawn((
            Platform::default(),
            LevelEntity,
            Mesh3d(platform_mesh.clone()),
            MeshMaterial3d(platform_mat.clone()),
            Transform::from_translation(*pos),
        ));
    }

    commands.spawn((
        VictoryPoint,
        LevelEntity,
        Mesh3d(victory_mesh),
        MeshMaterial3d(victory_mat),
        Transform::from_translation(def.victory_point),
    ));
}

pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    session: Res<SessionData>,
    mut hud: ResMut<HudState>,
) {
    let def = level::level_def(session.current_level);
    spawn_level(&mut commands, &mut meshes, &mut materials, def);

    // The score banked at the last victory point is where the display resumes.
    hud.score = session.current_score;
    hud.level = session.current_level;

    // Projectile archetype; remove this insert and firing still works, it
    // just spawns nothing.
    let projectile_assets = ProjectileAssets::build(&mut meshes, &mut materials);
    commands.insert_resource(projectile_assets);

    commands.spawn((
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 14.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Camera3d::default(),
        Player,
        LookAngles::default(),
        PlayerMotion::default(),
        PlayerVitals::default(),
        SpatialListener::new(0.2),
        Transform::from_translation(def.spawn).looking_at(def.spawn + Vec3::NEG_Z, Vec3::Y),
    ));
}
