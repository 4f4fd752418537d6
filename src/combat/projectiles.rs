/*
Skytread
*/
use bevy::prelude::*;

use crate::level::KILL_PLANE_Y;

const PROJECTILE_SPEED: f32 = 22.0;
const PROJECTILE_LIFETIME_SECS: f32 = 3.0;
const PROJECTILE_RADIUS: f32 = 0.08;

#[derive(Clone, Copy, Debug, Message)]
pub struct SpawnProjectile {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// The projectile "archetype": mesh and material resolved at construction
/// time. Its absence simply disables spawning.
#[derive(Resource, Clone)]
pub struct ProjectileAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

impl ProjectileAssets {
    pub fn build(meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) -> Self {
        Self {
            mesh: meshes.add(Sphere::new(PROJECTILE_RADIUS)),
            material: materials.add(StandardMaterial {
                base_color: Color::srgb(1.0, 0.55, 0.1),
                emissive: LinearRgba::new(6.0, 2.4, 0.3, 1.0),
                ..default()
            }),
        }
    }
}

#[derive(Component)]
pub struct Projectile {
    pub dir: Vec3,
    pub speed: f32,
    pub lifetime: Timer,
}

pub fn spawn_projectiles(
    mut commands: Commands,
    assets: Option<Res<ProjectileAssets>>,
    mut ev: MessageReader<SpawnProjectile>,
) {
    let Some(assets) = assets else {
        // fire_weapon never emits spawns without the archetype; drain anyway.
        ev.clear();
        return;
    };

    for req in ev.read() {
        commands.spawn((
            Projectile {
                dir: req.dir.normalize_or_zero(),
                speed: PROJECTILE_SPEED,
                lifetime: Timer::from_seconds(PROJECTILE_LIFETIME_SECS, TimerMode::Once),
            },
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
            Transform::from_translation(req.origin),
        ));
    }
}

pub fn fly_projectiles(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut Projectile, &mut Transform)>,
) {
    for (e, mut projectile, mut tf) in q.iter_mut() {
        let step = projectile.dir * projectile.speed * time.delta_secs();
        tf.translation += step;

        projectile.lifetime.tick(time.delta());
        if projectile.lifetime.is_finished() || tf.translation.y < KILL_PLANE_Y {
            commands.entity(e).despawn();
        }
    }
}
