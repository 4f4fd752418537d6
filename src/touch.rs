/*
Skytread
*/
use bevy::prelude::*;

use crate::combat::FireRequested;
use crate::player::{LookAngles, Player, PlayerControlLock, PlayerSettings};
use crate::ui::overlay::GamePaused;

/// A finger has to travel this far (pixels, from where it landed) before the
/// press counts as a drag instead of a tap.
const DRAG_THRESHOLD_PX: f32 = 8.0;

/// Touch look is coarser than mouse look; scale the shared sensitivity up.
const TOUCH_LOOK_SCALE: f32 = 1.5;

/// One press-release cycle of the active finger. A tap (never moved) fires;
/// a drag turns the camera and is discarded on release.
#[derive(Resource, Debug, Clone, Default)]
pub struct TouchGesture {
    pub pressed: bool,
    pub finger: u64,
    pub origin: Vec2,
    pub moved: bool,
}

pub fn touch_gestures(
    touches: Res<Touches>,
    settings: Res<PlayerSettings>,
    paused: Res<GamePaused>,
    lock: Res<PlayerControlLock>,
    mut gesture: ResMut<TouchGesture>,
    mut q_player: Query<(&mut Transform, &mut LookAngles), With<Player>>,
    mut fire: MessageWriter<FireRequested>,
) {
    if paused.0 || lock.0 {
        // Whatever was in flight is void once input is suppressed.
        gesture.pressed = false;
        return;
    }

    for touch in touches.iter_just_pressed() {
        if gesture.pressed {
            continue;
        }
        gesture.pressed = true;
        gesture.finger = touch.id();
        gesture.origin = touch.position();
        gesture.moved = false;
    }

    if gesture.pressed {
        if let Some(touch) = touches.get_pressed(gesture.finger) {
            if !gesture.moved
                && (touch.position() - gesture.origin).length() >= DRAG_THRESHOLD_PX
            {
                gesture.moved = true;
            }

            if gesture.moved {
                let delta = touch.delta();
                if delta != Vec2::ZERO {
                    if let Ok((mut transform, mut look)) = q_player.single_mut() {
                        let scale = settings.sensitivity * TOUCH_LOOK_SCALE;
                        look.yaw -= delta.x * scale;
                        look.pitch -= delta.y * scale;
                        look.pitch = look.pitch.clamp(-1.54, 1.54);
                        transform.rotation =
                            Quat::from_euler(EulerRot::YXZ, look.yaw, look.pitch, 0.0);
                    }
                }
            }
        }
    }

    for touch in touches.iter_just_released() {
        if !gesture.pressed || touch.id() != gesture.finger {
            continue;
        }
        if !gesture.moved {
            fire.write(FireRequested);
        }
        gesture.pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_defaults_to_released() {
        let g = TouchGesture::default();
        assert!(!g.pressed);
        assert!(!g.moved);
    }
}
