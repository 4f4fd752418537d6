use bevy::prelude::*;

use super::overlay::{clear_overlay, GamePaused, OverlayState};
use crate::level::RestartRequested;
use crate::player::PlayerControlLock;
use crate::session::SessionData;

/// Pre-game menu. While active the simulation pause flag stays raised and
/// control stays locked; Play drops both.
#[derive(Resource, Debug, Clone, Default)]
pub struct MainMenuActive(pub bool);

#[derive(Component)]
pub struct MainMenuUi;

pub(crate) fn setup_main_menu(mut commands: Commands, asset_server: Res<AssetServer>) {
    let font: Handle<Font> = asset_server.load("fonts/skytread.ttf");

    commands
        .spawn((
            MainMenuUi,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(24.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.02, 0.02, 0.06, 0.92)),
            GlobalZIndex(20),
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("SKYTREAD"),
                TextFont {
                    font: font.clone(),
                    font_size: 80.0,
                    ..default()
                },
                TextColor(Color::srgb(0.35, 0.75, 0.95)),
            ));

            root.spawn((
                Text::new("ENTER - PLAY    N - NEW GAME    ESC - QUIT"),
                TextFont {
                    font,
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
            ));
        });
}

pub fn main_menu_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut menu: ResMut<MainMenuActive>,
    mut paused: ResMut<GamePaused>,
    mut lock: ResMut<PlayerControlLock>,
    mut session: ResMut<SessionData>,
    mut restart: ResMut<RestartRequested>,
    mut q_menu_ui: Query<&mut Visibility, With<MainMenuUi>>,
    mut app_exit: MessageWriter<bevy::app::AppExit>,
) {
    if !menu.0 {
        return;
    }

    if keys.just_pressed(KeyCode::Enter) {
        // Resume the run the session file describes; the world was already
        // built for it at startup (or by a pending rebuild).
        menu.0 = false;
        paused.0 = false;
        lock.0 = false;
        info!("Menu: play (level {}, score {})", session.current_level, session.current_score);
    } else if keys.just_pressed(KeyCode::KeyN) {
        session.reset();
        restart.0 = true;
        menu.0 = false;
        paused.0 = false;
        lock.0 = false;
        info!("Menu: new game");
    } else if keys.just_pressed(KeyCode::Escape) {
        app_exit.write(bevy::app::AppExit::Success);
        return;
    } else {
        return;
    }

    for mut vis in q_menu_ui.iter_mut() {
        *vis = Visibility::Hidden;
    }
}

/// From the latched victory overlay, M returns to the main menu and starts a
/// fresh run; the run that just ended was already banked to disk.
pub fn victory_to_main_menu(
    keys: Res<ButtonInput<KeyCode>>,
    mut menu: ResMut<MainMenuActive>,
    mut overlay: ResMut<OverlayState>,
    mut paused: ResMut<GamePaused>,
    mut session: ResMut<SessionData>,
    mut restart: ResMut<RestartRequested>,
    mut q_menu_ui: Query<&mut Visibility, With<MainMenuUi>>,
) {
    if *overlay != OverlayState::Victory || menu.0 {
        return;
    }
    if !keys.just_pressed(KeyCode::KeyM) {
        return;
    }

    clear_overlay(&mut overlay, &mut paused);
    session.reset();
    restart.0 = true;

    menu.0 = true;
    paused.0 = true;
    for mut vis in q_menu_ui.iter_mut() {
        *vis = Visibility::Visible;
    }
    info!("Victory: run complete, back to menu");
}
