/*
Skytread
*/
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions};
use bevy::input::mouse::AccumulatedMouseMotion;

use crate::level::{KILL_PLANE_Y, PLATFORM_HALF};
use crate::scoring::Platform;
use crate::ui::overlay::GamePaused;
use crate::world::{Ground, GROUND_HALF};

/// Camera sits this far above the feet; collisions work in feet space.
pub const EYE_HEIGHT: f32 = 0.6;

/// Horizontal footprint used when testing whether a surface supports us.
const PLAYER_RADIUS: f32 = 0.3;

/// Tolerance for snapping onto a surface while descending.
const LANDING_EPS: f32 = 0.05;

#[derive(Component)]
pub struct Player;

#[derive(Component, Default)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

/// Vertical motion bookkeeping; horizontal motion is stateless per frame.
#[derive(Component, Default)]
pub struct PlayerMotion {
    pub vertical: f32,
    pub grounded: bool,
}

/// Every tunable the character consumes, injected at app construction
/// instead of being discovered through engine reflection.
#[derive(Resource)]
pub struct PlayerSettings {
    pub speed: f32,
    pub sensitivity: f32,
    /// Gamepad yaw rate at full stick deflection, deg/sec.
    pub base_turn_rate: f32,
    /// Gamepad pitch rate at full stick deflection, deg/sec.
    pub base_look_rate: f32,
    pub jump_speed: f32,
    pub gravity: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            speed: 4.5,
            sensitivity: 0.002,
            base_turn_rate: 45.0,
            base_look_rate: 45.0,
            jump_speed: 6.5,
            gravity: 16.0,
        }
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerVitals {
    pub life: i32,
    pub life_max: i32,
}

impl Default for PlayerVitals {
    fn default() -> Self {
        Self { life: 100, life_max: 100 }
    }
}

/// Frozen controls: death and terminal overlays set this; restart clears it.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerControlLock(pub bool);

/// Ensures the death transition runs exactly once per life-cycle.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerDeathLatch(pub bool);

/// External damage sources (falls, hazards) feed the vitals through this.
#[derive(Clone, Copy, Debug, Message)]
pub struct DamagePlayer {
    pub amount: i32,
}

// Left Click to Lock/Hide Cursor, Esc is handled by the pause flow
pub fn grab_mouse(
    mut cursor_options: Single<&mut CursorOptions>,
    mouse: Res<ButtonInput<MouseButton>>,
    paused: Res<GamePaused>,
) {
    if paused.0 {
        cursor_options.visible = true;
        cursor_options.grab_mode = CursorGrabMode::None;
        return;
    }
    if mouse.just_pressed(MouseButton::Left) {
        cursor_options.visible = false;
        cursor_options.grab_mode = CursorGrabMode::Locked;
    }
}

pub fn mouse_look(
    cursor_options: Single<&CursorOptions>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut q: Query<(&mut Transform, &mut LookAngles), With<Player>>,
    settings: Res<PlayerSettings>,
    paused: Res<GamePaused>,
    lock: Res<PlayerControlLock>,
) {
    if paused.0 || lock.0 {
        return;
    }
    if cursor_options.grab_mode != CursorGrabMode::Locked {
        return;
    }
    let delta = mouse_motion.delta;
    if delta == Vec2::ZERO {
        return;
    }

    let Ok((mut transform, mut look)) = q.single_mut() else {
        return;
    };
    look.yaw -= delta.x * settings.sensitivity;
    look.pitch -= delta.y * settings.sensitivity;
    // ~ +/- 88 Degrees
    look.pitch = look.pitch.clamp(-1.54, 1.54);

    transform.rotation = Quat::from_euler(EulerRot::YXZ, look.yaw, look.pitch, 0.0);
}

/// Right-stick turn/look: a normalized rate becomes an angular delta via the
/// configured deg/sec base rates and this frame's duration. An exactly
/// centered stick contributes nothing.
pub fn gamepad_look(
    time: Res<Time>,
    q_gamepads: Query<&Gamepad>,
    mut q: Query<(&mut Transform, &mut LookAngles), With<Player>>,
    settings: Res<PlayerSettings>,
    paused: Res<GamePaused>,
    lock: Res<PlayerControlLock>,
) {
    if paused.0 || lock.0 {
        return;
    }

    let mut turn_rate = 0.0;
    let mut look_rate = 0.0;
    for gamepad in &q_gamepads {
        turn_rate += gamepad.get(GamepadAxis::RightStickX).unwrap_or(0.0);
        look_rate += gamepad.get(GamepadAxis::RightStickY).unwrap_or(0.0);
    }
    if turn_rate == 0.0 && look_rate == 0.0 {
        return;
    }

    let Ok((mut transform, mut look)) = q.single_mut() else {
        return;
    };

    let dt = time.delta_secs();
    look.yaw -= turn_rate * settings.base_turn_rate.to_radians() * dt;
    look.pitch += look_rate * settings.base_look_rate.to_radians() * dt;
    look.pitch = look.pitch.clamp(-1.54, 1.54);

    transform.rotation = Quat::from_euler(EulerRot::YXZ, look.yaw, look.pitch, 0.0);
}

/// Highest surface top at the player's footprint that is at or below `feet_y`
/// (plus a small landing tolerance). `f32::NEG_INFINITY` means open air.
fn support_height(
    pos_xz: Vec2,
    feet_y: f32,
    surfaces: impl Iterator<Item = (Vec3, Vec3)>,
) -> f32 {
    let mut top = f32::NEG_INFINITY;
    for (center, half) in surfaces {
        let dx = (pos_xz.x - center.x).abs();
        let dz = (pos_xz.y - center.z).abs();
        if dx > half.x + PLAYER_RADIUS || dz > half.z + PLAYER_RADIUS {
            continue;
        }
        let surface_top = center.y + half.y;
        if surface_top <= feet_y + LANDING_EPS {
            top = top.max(surface_top);
        }
    }
    top
}

pub fn player_move(
    time: Res<Time<Fixed>>,
    keys: Res<ButtonInput<KeyCode>>,
    q_gamepads: Query<&Gamepad>,
    settings: Res<PlayerSettings>,
    paused: Res<GamePaused>,
    lock: Res<PlayerControlLock>,
    q_ground: Query<&Transform, (With<Ground>, Without<Player>)>,
    q_platforms: Query<&Transform, (With<Platform>, Without<Player>)>,
    mut q_player: Query<(&mut Transform, &mut PlayerMotion), With<Player>>,
) {
    if paused.0 || lock.0 {
        return;
    }

    let Ok((mut transform, mut motion)) = q_player.single_mut() else {
        return;
    };

    let dt = time.delta_secs();

    // Movement Basis (XZ Only)
    let mut forward = transform.rotation * Vec3::NEG_Z;
    forward.y = 0.0;
    forward = forward.normalize_or_zero();

    let mut right = transform.rotation * Vec3::X;
    right.y = 0.0;
    right = right.normalize_or_zero();

    let mut fwd_axis = 0.0;
    let mut right_axis = 0.0;
    if keys.pressed(KeyCode::KeyW) { fwd_axis += 1.0; }
    if keys.pressed(KeyCode::KeyS) { fwd_axis -= 1.0; }
    if keys.pressed(KeyCode::KeyD) { right_axis += 1.0; }
    if keys.pressed(KeyCode::KeyA) { right_axis -= 1.0; }
    for gamepad in &q_gamepads {
        right_axis += gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0);
        fwd_axis += gamepad.get(GamepadAxis::LeftStickY).unwrap_or(0.0);
    }

    // Horizontal contribution only for a nonzero axis sample.
    let wish = (forward * fwd_axis + right * right_axis).normalize_or_zero();
    if wish != Vec3::ZERO {
        transform.translation += wish * settings.speed * dt;
    }

    // Jump from any supported stance.
    let wants_jump = keys.just_pressed(KeyCode::Space)
        || q_gamepads.iter().any(|g| g.just_pressed(GamepadButton::South));
    if motion.grounded && wants_jump {
        motion.vertical = settings.jump_speed;
        motion.grounded = false;
    }

    // Gravity + landing against ground pads and platform tops.
    motion.vertical -= settings.gravity * dt;
    let mut feet = transform.translation.y - EYE_HEIGHT + motion.vertical * dt;

    let pos_xz = Vec2::new(transform.translation.x, transform.translation.z);
    let surfaces = q_ground
        .iter()
        .map(|tf| (tf.translation, GROUND_HALF))
        .chain(q_platforms.iter().map(|tf| (tf.translation, PLATFORM_HALF)));
    let support = support_height(pos_xz, transform.translation.y - EYE_HEIGHT, surfaces);

    if motion.vertical <= 0.0 && feet <= support {
        feet = support;
        motion.vertical = 0.0;
        motion.grounded = true;
    } else {
        motion.grounded = false;
    }

    transform.translation.y = feet + EYE_HEIGHT;
}

/// Falling off the course is lethal; routed through the normal damage path so
/// the once-per-cycle death handling stays the single authority.
pub fn fall_out_of_bounds(
    q_player: Query<(&Transform, &PlayerVitals), With<Player>>,
    mut damage: MessageWriter<DamagePlayer>,
) {
    let Ok((transform, vitals)) = q_player.single() else {
        return;
    };
    if vitals.life > 0 && transform.translation.y < KILL_PLANE_Y {
        damage.write(DamagePlayer { amount: vitals.life_max });
    }
}

pub fn apply_damage_to_player(
    mut q_player: Query<&mut PlayerVitals, With<Player>>,
    mut ev: MessageReader<DamagePlayer>,
) {
    let Some(mut vitals) = q_player.iter_mut().next() else {
        return;
    };

    for hit in ev.read() {
        if hit.amount <= 0 {
            continue;
        }
        let before = vitals.life;
        vitals.life = (vitals.life - hit.amount).clamp(0, vitals.life_max);
        info!("Player hit for {} -> life {} -> {}", hit.amount, before, vitals.life);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_ignores_surfaces_above_the_feet() {
        let surfaces = [
            (Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.25, 1.0)), // top at 1.25
            (Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 0.25, 1.0)), // overhead
        ];
        let top = support_height(Vec2::ZERO, 1.3, surfaces.iter().copied());
        assert_eq!(top, 1.25);
    }

    #[test]
    fn support_is_open_air_outside_footprint() {
        let surfaces = [(Vec3::new(10.0, 1.0, 0.0), Vec3::new(1.0, 0.25, 1.0))];
        let top = support_height(Vec2::ZERO, 2.0, surfaces.iter().copied());
        assert!(top.is_infinite() && top < 0.0);
    }
}
