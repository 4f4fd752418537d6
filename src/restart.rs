/*
Skytread
*/
use bevy::prelude::*;

use crate::audio::{PlaySfx, SfxKind};
use crate::combat::projectiles::Projectile;
use crate::level::{self, AdvanceLevelRequested, RestartRequested};
use crate::player::{
    LookAngles,
    Player,
    PlayerControlLock,
    PlayerDeathLatch,
    PlayerMotion,
    PlayerVitals,
};
use crate::session::SessionData;
use crate::ui::menu::MainMenuActive;
use crate::ui::overlay::{
    clear_overlay,
    show_overlay,
    GamePaused,
    OverlayKind,
    OverlayState,
};
use crate::ui::HudState;
use crate::world::{self, LevelEntity};

/// Gap between the defeat overlay coming up and the level rebuilding, so the
/// death is readable before everything snaps back.
#[derive(Resource, Debug, Clone)]
pub struct DeathDelay {
    pub active: bool,
    pub timer: Timer,
}

impl Default for DeathDelay {
    fn default() -> Self {
        let mut t = Timer::from_seconds(1.25, TimerMode::Once);
        // Start finished so it does nothing until activated
        t.set_elapsed(t.duration());
        Self { active: false, timer: t }
    }
}

/// End-of-tick terminal check. Runs after overlap handling, so scoring and a
/// lethal hit in the same tick both land first. The latch guarantees the
/// transition fires once per life-cycle; the reload re-arms it.
pub fn check_player_defeat(
    q_vitals: Query<&PlayerVitals, With<Player>>,
    mut latch: ResMut<PlayerDeathLatch>,
    mut lock: ResMut<PlayerControlLock>,
    mut overlay: ResMut<OverlayState>,
    mut paused: ResMut<GamePaused>,
    mut sfx: MessageWriter<PlaySfx>,
) {
    let Some(vitals) = q_vitals.iter().next() else {
        return;
    };

    if vitals.life > 0 {
        return;
    }
    if latch.0 {
        return;
    }
    latch.0 = true;
    lock.0 = true;

    show_overlay(&mut overlay, &mut paused, OverlayKind::Defeat);
    sfx.write(PlaySfx {
        kind: SfxKind::Defeat,
        pos: Vec3::ZERO,
    });
    info!("Player defeated -> level reload pending");
}

pub fn tick_death_delay(
    time: Res<Time>,
    latch: Res<PlayerDeathLatch>,
    lock: Res<PlayerControlLock>,
    mut death: ResMut<DeathDelay>,
    mut restart: ResMut<RestartRequested>,
) {
    if !latch.0 || !lock.0 {
        return;
    }
    if restart.0 {
        return;
    }

    if !death.active {
        death.active = true;
        death.timer.reset();
    }

    death.timer.tick(time.delta());
    if !death.timer.is_finished() {
        return;
    }

    death.active = false;
    restart.0 = true;
    info!("Death delay finished -> restart requested");
}

/// Services both reload flavors in one place. A restart rebuilds the current
/// level and rolls the score back to the session bank; an advance builds the
/// next level and keeps the run score. Either way the latch, lock, overlay
/// and pause flag come back to a clean alive state.
pub fn process_level_reload(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut restart: ResMut<RestartRequested>,
    mut advance: ResMut<AdvanceLevelRequested>,
    session: Res<SessionData>,
    menu: Res<MainMenuActive>,
    q_level: Query<Entity, With<LevelEntity>>,
    q_projectiles: Query<Entity, With<Projectile>>,
    mut q_player: Query<
        (&mut Transform, &mut PlayerMotion, &mut LookAngles, &mut PlayerVitals),
        With<Player>,
    >,
    mut hud: ResMut<HudState>,
    mut latch: ResMut<PlayerDeathLatch>,
    mut lock: ResMut<PlayerControlLock>,
    mut overlay: ResMut<OverlayState>,
    mut paused: ResMut<GamePaused>,
    mut death: ResMut<DeathDelay>,
) {
    let was_restart = restart.0;
    if !restart.0 && !advance.0 {
        return;
    }

    for e in q_level.iter() {
        commands.entity(e).despawn();
    }
    for e in q_projectiles.iter() {
        commands.entity(e).despawn();
    }

    let def = level::level_def(session.current_level);
    world::spawn_level(&mut commands, &mut meshes, &mut materials, def);

    if let Some((mut tf, mut motion, mut look, mut vitals)) = q_player.iter_mut().next() {
        tf.translation = def.spawn;
        tf.rotation = Quat::IDENTITY;
        *motion = PlayerMotion::default();
        *look = LookAngles::default();
        *vitals = PlayerVitals::default();
    }

    if was_restart {
        // Death rolls the display score back to what the session banked.
        hud.score = session.current_score;
    }
    hud.level = session.current_level;

    latch.0 = false;
    clear_overlay(&mut overlay, &mut paused);
    *death = Default::default();

    // Reloads triggered from the menu leave the menu in charge of input.
    lock.0 = menu.0;
    paused.0 = menu.0;

    restart.0 = false;
    advance.0 = false;
    info!(
        "Level reload: {} -> level {} (score {})",
        if was_restart { "restart" } else { "advance" },
        session.current_level,
        hud.score
    );
}
