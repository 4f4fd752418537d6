/*
Skytread
*/
use bevy::prelude::*;

use crate::audio::{PlaySfx, SfxKind};
use crate::level::{self, AdvanceLevelRequested, PLATFORM_HALF, VICTORY_HALF};
use crate::player::{Player, PlayerControlLock};
use crate::session::SessionData;
use crate::ui::overlay::{show_overlay, GamePaused, OverlayKind, OverlayState};
use crate::ui::HudState;

/// Collision box around the player transform (centered at mid-body). The
/// vertical half-extent runs slightly past the feet so standing on a surface
/// counts as touching it.
const PLAYER_BODY_HALF: Vec3 = Vec3::new(0.3, 0.65, 0.3);

/// A scoring platform. The tread bonus is granted at most once per instance,
/// however many frames the player keeps touching it.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Platform {
    pub treaded: bool,
}

/// Crossing one of these ends the level.
#[derive(Component, Debug, Clone, Copy)]
pub struct VictoryPoint;

/// Scoring tunables, injected at app construction.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ScoreRules {
    pub score_per_platform: i32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self { score_per_platform: 10 }
    }
}

pub fn boxes_overlap(a_center: Vec3, a_half: Vec3, b_center: Vec3, b_half: Vec3) -> bool {
    (a_center.x - b_center.x).abs() <= a_half.x + b_half.x
        && (a_center.y - b_center.y).abs() <= a_half.y + b_half.y
        && (a_center.z - b_center.z).abs() <= a_half.z + b_half.z
}

/// First touch of a platform banks its bonus and refreshes the HUD score.
pub fn platform_tread(
    q_player: Query<&Transform, With<Player>>,
    mut q_platforms: Query<(&Transform, &mut Platform), Without<Player>>,
    rules: Res<ScoreRules>,
    lock: Res<PlayerControlLock>,
    mut hud: ResMut<HudState>,
    mut sfx: MessageWriter<PlaySfx>,
) {
    if lock.0 {
        return;
    }
    let Ok(player_tf) = q_player.single() else {
        return;
    };

    for (platform_tf, mut platform) in q_platforms.iter_mut() {
        if platform.treaded {
            continue;
        }
        if !boxes_overlap(
            player_tf.translation,
            PLAYER_BODY_HALF,
            platform_tf.translation,
            PLATFORM_HALF,
        ) {
            continue;
        }

        platform.treaded = true;
        hud.score += rules.score_per_platform;
        sfx.write(PlaySfx {
            kind: SfxKind::PlatformTread,
            pos: platform_tf.translation,
        });
    }
}

/// Crossing a victory point banks the score into the session and either
/// requests the next level or, on the final level, latches the victory
/// overlay until a new game resets everything.
pub fn reach_victory_point(
    q_player: Query<&Transform, With<Player>>,
    q_points: Query<&Transform, (With<VictoryPoint>, Without<Player>)>,
    mut lock: ResMut<PlayerControlLock>,
    mut session: ResMut<SessionData>,
    hud: Res<HudState>,
    mut advance: ResMut<AdvanceLevelRequested>,
    mut overlay: ResMut<OverlayState>,
    mut paused: ResMut<GamePaused>,
    mut sfx: MessageWriter<PlaySfx>,
) {
    if lock.0 || advance.0 {
        return;
    }
    let Ok(player_tf) = q_player.single() else {
        return;
    };

    for point_tf in q_points.iter() {
        if !boxes_overlap(
            player_tf.translation,
            PLAYER_BODY_HALF,
            point_tf.translation,
            VICTORY_HALF,
        ) {
            continue;
        }

        let finished = level::is_final_level(session.current_level);

        session.advance(hud.score);
        info!(
            "Victory point crossed -> level {}, banked score {}",
            session.current_level, session.current_score
        );

        sfx.write(PlaySfx {
            kind: SfxKind::Victory,
            pos: point_tf.translation,
        });

        if finished {
            show_overlay(&mut overlay, &mut paused, OverlayKind::Victory);
            lock.0 = true;
        } else {
            advance.0 = true;
        }
        return;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_symmetric_and_respects_extents() {
        let half = Vec3::splat(0.5);
        assert!(boxes_overlap(Vec3::ZERO, half, Vec3::new(0.9, 0.0, 0.0), half));
        assert!(!boxes_overlap(Vec3::ZERO, half, Vec3::new(1.1, 0.0, 0.0), half));
        assert!(boxes_overlap(Vec3::new(0.9, 0.0, 0.0), half, Vec3::ZERO, half));
    }

    #[test]
    fn overlap_checks_all_three_axes() {
        let half = Vec3::splat(0.5);
        assert!(!boxes_overlap(Vec3::ZERO, half, Vec3::new(0.9, 2.0, 0.0), half));
        assert!(!boxes_overlap(Vec3::ZERO, half, Vec3::new(0.0, 0.0, 3.0), half));
    }
}
