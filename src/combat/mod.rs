/*
Skytread
*/
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions};

pub mod projectiles;

use crate::audio::{PlaySfx, SfxKind};
use crate::player::{Player, PlayerControlLock};
use crate::ui::overlay::GamePaused;
use projectiles::{ProjectileAssets, SpawnProjectile};

/// Discrete trigger pull, whatever device produced it.
#[derive(Clone, Copy, Debug, Message)]
pub struct FireRequested;

/// Firing tunables, injected at app construction. The muzzle offset is in
/// view space and gets rotated by the aim rotation at spawn time.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FireConfig {
    pub muzzle_offset: Vec3,
    pub cooldown_secs: f32,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            muzzle_offset: Vec3::new(0.15, -0.12, -0.45),
            cooldown_secs: 0.35,
        }
    }
}

#[derive(Resource)]
pub struct WeaponCooldown {
    pub timer: Timer,
}

impl Default for WeaponCooldown {
    fn default() -> Self {
        // Start finished so the first shot is never swallowed.
        let mut timer = Timer::from_seconds(FireConfig::default().cooldown_secs, TimerMode::Once);
        timer.set_elapsed(timer.duration());
        Self { timer }
    }
}

/// Mouse / gamepad trigger sampling. Touch taps arrive through the gesture
/// system instead.
pub fn fire_input(
    cursor_options: Single<&CursorOptions>,
    mouse: Res<ButtonInput<MouseButton>>,
    q_gamepads: Query<&Gamepad>,
    mut fire: MessageWriter<FireRequested>,
    mut armed: Local<bool>,
) {
    let locked = cursor_options.grab_mode == CursorGrabMode::Locked;
    if !locked {
        *armed = false;
    } else if !*armed {
        // The click that grabbed the cursor must not also fire.
        *armed = true;
        return;
    }

    let pad_trigger = q_gamepads
        .iter()
        .any(|g| g.just_pressed(GamepadButton::RightTrigger2));

    if (locked && mouse.just_pressed(MouseButton::Left)) || pad_trigger {
        fire.write(FireRequested);
    }
}

/// Resolve trigger pulls: the sound cue always plays, a projectile only
/// spawns when an archetype was configured. No archetype is normal, not an
/// error; it is logged once so missing content is visible.
pub fn fire_weapon(
    time: Res<Time>,
    mut fire: MessageReader<FireRequested>,
    config: Res<FireConfig>,
    assets: Option<Res<ProjectileAssets>>,
    paused: Res<GamePaused>,
    lock: Res<PlayerControlLock>,
    mut cooldown: ResMut<WeaponCooldown>,
    q_player: Query<&Transform, With<Player>>,
    mut spawn: MessageWriter<SpawnProjectile>,
    mut sfx: MessageWriter<PlaySfx>,
    mut noted_missing: Local<bool>,
) {
    cooldown.timer.tick(time.delta());

    if fire.read().next().is_none() {
        return;
    }
    if paused.0 || lock.0 {
        return;
    }
    if !cooldown.timer.is_finished() {
        return;
    }

    let Ok(tf) = q_player.single() else {
        return;
    };

    cooldown.timer = Timer::from_seconds(config.cooldown_secs, TimerMode::Once);

    sfx.write(PlaySfx {
        kind: SfxKind::Fire,
        pos: tf.translation,
    });

    match assets {
        Some(_) => {
            let origin = tf.translation + tf.rotation * config.muzzle_offset;
            let dir = (tf.rotation * Vec3::NEG_Z).normalize();
            spawn.write(SpawnProjectile { origin, dir });
        }
        None => {
            if !*noted_missing {
                info!("Fire: no projectile archetype configured, nothing to spawn");
                *noted_missing = true;
            }
        }
    }
}
