//! Headless tests for the overlay coordinator.
//!
//! These use [`MinimalPlugins`], with no window and no rendering, so they
//! run fast and deterministically in CI. The pause-toggle and debug-hotkey systems run
//! against a manually driven `ButtonInput<KeyCode>` (no `InputPlugin`, so
//! just-pressed state is cleared by hand between frames).

use bevy::prelude::*;

use skylib::player::{PlayerControlLock, PlayerDeathLatch};
use skylib::ui::menu::MainMenuActive;
use skylib::ui::overlay::{
    debug_overlay_hotkeys, pause_input, DebugHotkeys, GamePaused, OverlayKind, OverlayRoots,
    OverlayState,
};
use skylib::ui::HudState;

fn overlay_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.init_resource::<ButtonInput<KeyCode>>();
    app.init_resource::<HudState>();
    app.init_resource::<MainMenuActive>();
    app.init_resource::<OverlayState>();
    app.init_resource::<GamePaused>();
    app.init_resource::<PlayerControlLock>();
    app.init_resource::<PlayerDeathLatch>();
    app.insert_resource(DebugHotkeys(true));

    // Pretend every widget spawned; the entities just need to exist.
    let paused = app.world_mut().spawn_empty().id();
    let victory = app.world_mut().spawn_empty().id();
    let defeat = app.world_mut().spawn_empty().id();
    app.insert_resource(OverlayRoots {
        paused: Some(paused),
        victory: Some(victory),
        defeat: Some(defeat),
    });

    app.add_systems(Update, (pause_input, debug_overlay_hotkeys).chain());
    app
}

fn tap_key(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
    app.update();
    let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    input.release(key);
    input.clear();
}

/// ESC raises the pause overlay and the pause flag together.
#[test]
fn escape_pauses_and_raises_pause_flag() {
    let mut app = overlay_app();
    tap_key(&mut app, KeyCode::Escape);

    assert_eq!(*app.world().resource::<OverlayState>(), OverlayState::Paused);
    assert!(app.world().resource::<GamePaused>().0);
}

/// A second ESC hides the overlay and clears the pause flag.
#[test]
fn escape_again_resumes() {
    let mut app = overlay_app();
    tap_key(&mut app, KeyCode::Escape);
    tap_key(&mut app, KeyCode::Escape);

    assert_eq!(*app.world().resource::<OverlayState>(), OverlayState::None);
    assert!(!app.world().resource::<GamePaused>().0);
}

/// With the victory overlay latched, a pause request must be ignored: the
/// terminal overlay stays and the pause flag stays raised.
#[test]
fn pause_request_while_victory_is_ignored() {
    let mut app = overlay_app();
    app.insert_resource(OverlayState::Victory);
    app.insert_resource(GamePaused(true));

    tap_key(&mut app, KeyCode::Escape);

    assert_eq!(*app.world().resource::<OverlayState>(), OverlayState::Victory);
    assert!(app.world().resource::<GamePaused>().0);
}

/// A pause request with no pause widget spawned is dropped entirely:
/// no overlay, no pause flag, no crash.
#[test]
fn missing_pause_widget_makes_pause_a_noop() {
    let mut app = overlay_app();
    app.insert_resource(OverlayRoots::default());

    tap_key(&mut app, KeyCode::Escape);

    assert_eq!(*app.world().resource::<OverlayState>(), OverlayState::None);
    assert!(!app.world().resource::<GamePaused>().0);
}

/// The debug victory hotkey forces the terminal overlay and locks control.
#[test]
fn debug_hotkey_forces_victory_and_locks() {
    let mut app = overlay_app();
    tap_key(&mut app, KeyCode::F10);

    assert_eq!(*app.world().resource::<OverlayState>(), OverlayState::Victory);
    assert!(app.world().resource::<GamePaused>().0);
    assert!(app.world().resource::<PlayerControlLock>().0);
    // Victory is dismissed via the menu, not a reload.
    assert!(!app.world().resource::<PlayerDeathLatch>().0);
}

/// The debug defeat hotkey latches the death cycle so the delayed reload
/// picks it up exactly like a real defeat.
#[test]
fn debug_defeat_hotkey_latches_death_cycle() {
    let mut app = overlay_app();
    tap_key(&mut app, KeyCode::F11);

    assert_eq!(*app.world().resource::<OverlayState>(), OverlayState::Defeat);
    assert!(app.world().resource::<GamePaused>().0);
    assert!(app.world().resource::<PlayerControlLock>().0);
    assert!(app.world().resource::<PlayerDeathLatch>().0);
}

/// With the debug flag off the hotkeys are inert.
#[test]
fn debug_hotkeys_do_nothing_when_disabled() {
    let mut app = overlay_app();
    app.insert_resource(DebugHotkeys(false));

    tap_key(&mut app, KeyCode::F10);
    tap_key(&mut app, KeyCode::F11);

    assert_eq!(*app.world().resource::<OverlayState>(), OverlayState::None);
    assert!(!app.world().resource::<GamePaused>().0);
}

/// While the main menu is up, ESC belongs to the menu, not the pause flow.
#[test]
fn pause_input_is_inert_while_main_menu_is_active() {
    let mut app = overlay_app();
    app.insert_resource(MainMenuActive(true));

    tap_key(&mut app, KeyCode::Escape);

    assert_eq!(*app.world().resource::<OverlayState>(), OverlayState::None);
}
