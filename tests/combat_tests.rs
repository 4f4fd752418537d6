//! Headless weapon tests: the sound-always / spawn-maybe split around the
//! optional projectile archetype, pause and lock gating, the refire cooldown
//! and projectile flight bounds.

use std::time::Duration;

use bevy::prelude::*;

use skylib::audio::{PlaySfx, SfxKind};
use skylib::combat::projectiles::{
    fly_projectiles, spawn_projectiles, Projectile, ProjectileAssets, SpawnProjectile,
};
use skylib::combat::{fire_weapon, FireConfig, FireRequested, WeaponCooldown};
use skylib::level::KILL_PLANE_Y;
use skylib::player::{Player, PlayerControlLock};
use skylib::ui::overlay::GamePaused;

#[derive(Resource, Default)]
struct SfxLog(Vec<SfxKind>);

fn log_sfx(mut log: ResMut<SfxLog>, mut ev: MessageReader<PlaySfx>) {
    for e in ev.read() {
        log.0.push(e.kind);
    }
}

/// Trigger pulls come from input devices in the real app; the tests drive
/// the same message through this one-shot flag instead.
#[derive(Resource, Default)]
struct PullTrigger(bool);

fn drive_trigger(mut pull: ResMut<PullTrigger>, mut fire: MessageWriter<FireRequested>) {
    if pull.0 {
        fire.write(FireRequested);
        pull.0 = false;
    }
}

fn combat_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);

    app.init_resource::<Assets<Mesh>>();
    app.init_resource::<Assets<StandardMaterial>>();
    app.init_resource::<FireConfig>();
    app.init_resource::<WeaponCooldown>();
    app.init_resource::<GamePaused>();
    app.init_resource::<PlayerControlLock>();
    app.init_resource::<PullTrigger>();
    app.init_resource::<SfxLog>();

    app.add_message::<FireRequested>();
    app.add_message::<SpawnProjectile>();
    app.add_message::<PlaySfx>();

    app.add_systems(
        Update,
        (drive_trigger, fire_weapon, spawn_projectiles, log_sfx).chain(),
    );

    let mut fixed = Time::<Fixed>::from_seconds(1.0 / 60.0);
    fixed.advance_by(Duration::from_secs_f64(1.0 / 60.0));
    app.insert_resource(fixed);

    app
}

fn pull_trigger(app: &mut App) {
    app.world_mut().resource_mut::<PullTrigger>().0 = true;
    app.update();
}

fn fire_cues(app: &App) -> usize {
    app.world()
        .resource::<SfxLog>()
        .0
        .iter()
        .filter(|k| **k == SfxKind::Fire)
        .count()
}

fn projectile_count(app: &mut App) -> usize {
    let mut q = app.world_mut().query::<&Projectile>();
    q.iter(app.world()).count()
}

fn with_archetype(app: &mut App) {
    let assets = {
        let world = app.world_mut();
        world.resource_scope(|world, mut meshes: Mut<Assets<Mesh>>| {
            let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
            ProjectileAssets::build(&mut meshes, &mut materials)
        })
    };
    app.insert_resource(assets);
}

/// No archetype configured: the trigger still produces its sound cue but no
/// projectile, and nothing panics.
#[test]
fn trigger_without_archetype_plays_sound_only() {
    let mut app = combat_app();
    app.world_mut()
        .spawn((Player, Transform::from_xyz(0.0, 0.6, 0.0)));

    pull_trigger(&mut app);

    assert_eq!(fire_cues(&app), 1);
    assert_eq!(projectile_count(&mut app), 0);
}

/// With the archetype present the same pull spawns a projectile flying out
/// of the aim direction.
#[test]
fn trigger_with_archetype_spawns_projectile() {
    let mut app = combat_app();
    with_archetype(&mut app);
    app.world_mut()
        .spawn((Player, Transform::from_xyz(0.0, 0.6, 0.0)));

    pull_trigger(&mut app);

    assert_eq!(fire_cues(&app), 1);
    assert_eq!(projectile_count(&mut app), 1);

    let mut q = app.world_mut().query::<&Projectile>();
    let projectile = q.iter(app.world()).next().unwrap();
    assert_eq!(projectile.dir, Vec3::NEG_Z, "unrotated aim fires straight ahead");
}

/// Paused or locked play swallows the pull entirely: no sound, no spawn.
#[test]
fn trigger_is_inert_while_paused() {
    let mut app = combat_app();
    with_archetype(&mut app);
    app.world_mut()
        .spawn((Player, Transform::from_xyz(0.0, 0.6, 0.0)));
    app.insert_resource(GamePaused(true));

    pull_trigger(&mut app);

    assert_eq!(fire_cues(&app), 0);
    assert_eq!(projectile_count(&mut app), 0);
}

#[test]
fn trigger_is_inert_while_controls_locked() {
    let mut app = combat_app();
    with_archetype(&mut app);
    app.world_mut()
        .spawn((Player, Transform::from_xyz(0.0, 0.6, 0.0)));
    app.insert_resource(PlayerControlLock(true));

    pull_trigger(&mut app);

    assert_eq!(fire_cues(&app), 0);
    assert_eq!(projectile_count(&mut app), 0);
}

/// Two pulls in quick succession yield one shot; the cooldown eats the rest.
#[test]
fn cooldown_limits_refire_rate() {
    let mut app = combat_app();
    with_archetype(&mut app);
    app.world_mut()
        .spawn((Player, Transform::from_xyz(0.0, 0.6, 0.0)));

    pull_trigger(&mut app);
    pull_trigger(&mut app);

    assert_eq!(fire_cues(&app), 1);
    assert_eq!(projectile_count(&mut app), 1);
}

/// A projectile advances by speed * dt along its direction each fixed step.
#[test]
fn projectiles_fly_along_their_direction() {
    let mut app = combat_app();
    app.add_systems(PostUpdate, fly_projectiles);
    let e = app
        .world_mut()
        .spawn((
            Projectile {
                dir: Vec3::NEG_Z,
                speed: 22.0,
                lifetime: Timer::from_seconds(3.0, TimerMode::Once),
            },
            Transform::from_xyz(0.0, 2.0, 0.0),
        ))
        .id();

    app.update();

    let tf = app.world().entity(e).get::<Transform>().unwrap();
    assert!(tf.translation.z < -0.3, "expected roughly 22/60 of travel");
    assert_eq!(tf.translation.y, 2.0);
}

/// Falling past the kill plane despawns a projectile even with lifetime left.
#[test]
fn projectiles_despawn_below_kill_plane() {
    let mut app = combat_app();
    app.add_systems(PostUpdate, fly_projectiles);
    app.world_mut().spawn((
        Projectile {
            dir: Vec3::NEG_Y,
            speed: 22.0,
            lifetime: Timer::from_seconds(3.0, TimerMode::Once),
        },
        Transform::from_xyz(0.0, KILL_PLANE_Y - 1.0, 0.0),
    ));

    app.update();

    assert_eq!(projectile_count(&mut app), 0);
}

/// An expired lifetime despawns the projectile wherever it is.
#[test]
fn projectiles_despawn_after_lifetime() {
    let mut app = combat_app();
    app.add_systems(PostUpdate, fly_projectiles);
    let mut lifetime = Timer::from_seconds(3.0, TimerMode::Once);
    lifetime.set_elapsed(lifetime.duration());
    app.world_mut().spawn((
        Projectile {
            dir: Vec3::ZERO,
            speed: 22.0,
            lifetime,
        },
        Transform::from_xyz(0.0, 2.0, 0.0),
    ));

    app.update();

    assert_eq!(projectile_count(&mut app), 0);
}
