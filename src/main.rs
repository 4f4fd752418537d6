use bevy::prelude::*;

use skylib::audio::{play_sfx_events, setup_audio, PlaySfx};
use skylib::combat::projectiles::{fly_projectiles, spawn_projectiles, SpawnProjectile};
use skylib::combat::{fire_input, fire_weapon, FireConfig, FireRequested, WeaponCooldown};
use skylib::level::{AdvanceLevelRequested, RestartRequested};
use skylib::player::{
    apply_damage_to_player, fall_out_of_bounds, gamepad_look, grab_mouse, mouse_look,
    player_move, DamagePlayer, PlayerControlLock, PlayerDeathLatch, PlayerSettings,
};
use skylib::restart::{check_player_defeat, process_level_reload, tick_death_delay, DeathDelay};
use skylib::scoring::{platform_tread, reach_victory_point, ScoreRules};
use skylib::session::{save_session, SessionData};
use skylib::touch::{touch_gestures, TouchGesture};
use skylib::ui::menu::MainMenuActive;
use skylib::ui::overlay::GamePaused;
use skylib::ui::UiPlugin;
use skylib::world::setup;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .insert_resource(Time::<Fixed>::from_seconds(1.0 / 60.0))
        .insert_resource(SessionData::load())
        // Boot into the menu: paused and locked until Play.
        .insert_resource(MainMenuActive(true))
        .insert_resource(GamePaused(true))
        .insert_resource(PlayerControlLock(true))
        .init_resource::<PlayerSettings>()
        .init_resource::<ScoreRules>()
        .init_resource::<FireConfig>()
        .init_resource::<WeaponCooldown>()
        .init_resource::<TouchGesture>()
        .init_resource::<PlayerDeathLatch>()
        .init_resource::<DeathDelay>()
        .init_resource::<RestartRequested>()
        .init_resource::<AdvanceLevelRequested>()
        .add_message::<PlaySfx>()
        .add_message::<DamagePlayer>()
        .add_message::<FireRequested>()
        .add_message::<SpawnProjectile>()
        .add_plugins(UiPlugin)
        .add_systems(Startup, (setup, setup_audio))
        .add_systems(
            Update,
            (
                grab_mouse,
                mouse_look,
                gamepad_look,
                touch_gestures,
                fire_input,
                fire_weapon.after(fire_input).after(touch_gestures),
                spawn_projectiles.after(fire_weapon),
                play_sfx_events,
            ),
        )
        .add_systems(Update, (tick_death_delay, process_level_reload).chain())
        .add_systems(Update, save_session)
        // Overlap handling runs before the end-of-tick defeat check.
        .add_systems(
            FixedUpdate,
            (
                player_move,
                fly_projectiles,
                fall_out_of_bounds,
                apply_damage_to_player,
                platform_tread,
                reach_victory_point,
                check_player_defeat,
            )
                .chain(),
        )
        .run();
}
