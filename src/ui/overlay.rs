/*
Skytread
*/
use bevy::prelude::*;

use super::menu::MainMenuActive;
use super::HudState;
use crate::player::{PlayerControlLock, PlayerDeathLatch};

/// Blocking overlays the coordinator can be asked to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Paused,
    Victory,
    Defeat,
}

/// Which blocking overlay is up, if any. At most one at a time; a non-`None`
/// value always means the simulation pause flag is raised.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    None,
    Paused,
    Victory,
    Defeat,
}

impl OverlayState {
    pub fn is_blocking(self) -> bool {
        self != OverlayState::None
    }

    /// Victory and defeat stay up until a level reload resets everything.
    pub fn is_terminal(self) -> bool {
        matches!(self, OverlayState::Victory | OverlayState::Defeat)
    }

    pub fn matches(self, kind: OverlayKind) -> bool {
        matches!(
            (self, kind),
            (OverlayState::Paused, OverlayKind::Paused)
                | (OverlayState::Victory, OverlayKind::Victory)
                | (OverlayState::Defeat, OverlayKind::Defeat)
        )
    }
}

/// Mirrors overlay visibility into the simulation; gameplay systems early-out
/// while this is raised.
#[derive(Resource, Debug, Clone, Default)]
pub struct GamePaused(pub bool);

/// Raise `kind`, honoring the conflict policy: pause never replaces a
/// terminal overlay, a terminal overlay replaces anything. Returns whether
/// the request took effect.
pub fn show_overlay(state: &mut OverlayState, paused: &mut GamePaused, kind: OverlayKind) -> bool {
    if kind == OverlayKind::Paused && state.is_terminal() {
        info!("Overlay: pause request ignored, {:?} is active", *state);
        return false;
    }

    *state = match kind {
        OverlayKind::Paused => OverlayState::Paused,
        OverlayKind::Victory => OverlayState::Victory,
        OverlayKind::Defeat => OverlayState::Defeat,
    };
    paused.0 = true;
    true
}

/// Dismiss the pause overlay. Terminal overlays do not hide this way; only a
/// level reload (`clear_overlay`) takes them down.
pub fn hide_overlay(state: &mut OverlayState, paused: &mut GamePaused) -> bool {
    if *state != OverlayState::Paused {
        return false;
    }
    *state = OverlayState::None;
    paused.0 = false;
    true
}

/// Reload path: drops whatever is up, terminal or not, and unpauses.
pub fn clear_overlay(state: &mut OverlayState, paused: &mut GamePaused) {
    *state = OverlayState::None;
    paused.0 = false;
}

/// Spawned overlay widget roots. `None` means that widget failed to build;
/// requests against it are logged and dropped instead of crashing.
#[derive(Resource, Debug, Clone, Default)]
pub struct OverlayRoots {
    pub paused: Option<Entity>,
    pub victory: Option<Entity>,
    pub defeat: Option<Entity>,
}

impl OverlayRoots {
    pub fn get(&self, kind: OverlayKind) -> Option<Entity> {
        match kind {
            OverlayKind::Paused => self.paused,
            OverlayKind::Victory => self.victory,
            OverlayKind::Defeat => self.defeat,
        }
    }
}

#[derive(Component)]
pub struct OverlayRoot(pub OverlayKind);

#[derive(Component)]
pub struct OverlayScoreText(pub OverlayKind);

/// Debug-only win/lose hotkeys are gated behind this explicit flag instead
/// of being always bound.
#[derive(Resource, Debug, Clone)]
pub struct DebugHotkeys(pub bool);

impl Default for DebugHotkeys {
    fn default() -> Self {
        Self(cfg!(debug_assertions))
    }
}

fn spawn_overlay_widget(
    commands: &mut Commands,
    font: &Handle<Font>,
    kind: OverlayKind,
    title: &str,
    tint: Color,
    hint: &str,
) -> Entity {
    commands
        .spawn((
            OverlayRoot(kind),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(18.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.65)),
            Visibility::Hidden,
            GlobalZIndex(10),
        ))
        .with_children(|root| {
            root.spawn((
                Text::new(title),
                TextFont {
                    font: font.clone(),
                    font_size: 64.0,
                    ..default()
                },
                TextColor(tint),
            ));

            root.spawn((
                OverlayScoreText(kind),
                Text::new("SCORE 0"),
                TextFont {
                    font: font.clone(),
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            root.spawn((
                Text::new(hint),
                TextFont {
                    font: font.clone(),
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.7)),
            ));
        })
        .id()
}

pub fn setup_overlays(mut commands: Commands, asset_server: Res<AssetServer>) {
    let font: Handle<Font> = asset_server.load("fonts/skytread.ttf");

    let paused = spawn_overlay_widget(
        &mut commands,
        &font,
        OverlayKind::Paused,
        "PAUSED",
        Color::WHITE,
        "ESC - RESUME",
    );
    let victory = spawn_overlay_widget(
        &mut commands,
        &font,
        OverlayKind::Victory,
        "VICTORY",
        Color::srgb(0.95, 0.85, 0.25),
        "M - MAIN MENU",
    );
    let defeat = spawn_overlay_widget(
        &mut commands,
        &font,
        OverlayKind::Defeat,
        "DEFEAT",
        Color::srgb(0.85, 0.15, 0.15),
        "RELOADING...",
    );

    commands.insert_resource(OverlayRoots {
        paused: Some(paused),
        victory: Some(victory),
        defeat: Some(defeat),
    });
}

/// ESC toggles the pause overlay. While a terminal overlay is up the request
/// is ignored; with no pause widget spawned it is logged and dropped.
pub fn pause_input(
    keys: Res<ButtonInput<KeyCode>>,
    menu: Res<MainMenuActive>,
    roots: Res<OverlayRoots>,
    mut overlay: ResMut<OverlayState>,
    mut paused: ResMut<GamePaused>,
) {
    if menu.0 || !keys.just_pressed(KeyCode::Escape) {
        return;
    }

    if *overlay == OverlayState::Paused {
        hide_overlay(&mut overlay, &mut paused);
        return;
    }

    if roots.get(OverlayKind::Paused).is_none() {
        warn!("Overlay: no pause widget, request dropped");
        return;
    }
    show_overlay(&mut overlay, &mut paused, OverlayKind::Paused);
}

/// F10/F11 force the victory/defeat overlays, bypassing the normal win/lose
/// conditions. Only active when `DebugHotkeys` is enabled.
pub fn debug_overlay_hotkeys(
    keys: Res<ButtonInput<KeyCode>>,
    debug: Res<DebugHotkeys>,
    menu: Res<MainMenuActive>,
    mut overlay: ResMut<OverlayState>,
    mut paused: ResMut<GamePaused>,
    mut lock: ResMut<PlayerControlLock>,
    mut latch: ResMut<PlayerDeathLatch>,
) {
    if !debug.0 || menu.0 {
        return;
    }

    if keys.just_pressed(KeyCode::F10) {
        info!("Debug: forcing victory overlay");
        if show_overlay(&mut overlay, &mut paused, OverlayKind::Victory) {
            lock.0 = true;
        }
    }
    if keys.just_pressed(KeyCode::F11) {
        info!("Debug: forcing defeat overlay");
        if show_overlay(&mut overlay, &mut paused, OverlayKind::Defeat) {
            // Latch the death cycle so the delayed reload services this
            // exactly like a real defeat.
            latch.0 = true;
            lock.0 = true;
        }
    }
}

pub fn sync_overlay_visibility(
    overlay: Res<OverlayState>,
    mut q: Query<(&OverlayRoot, &mut Visibility)>,
    mut warned_missing: Local<bool>,
) {
    if !overlay.is_changed() {
        return;
    }

    let mut shown_exists = !overlay.is_blocking();
    for (root, mut vis) in q.iter_mut() {
        let show = overlay.matches(root.0);
        shown_exists |= show;
        *vis = if show { Visibility::Visible } else { Visibility::Hidden };
    }

    // Widget failed to build earlier: say so once, keep playing without it.
    if !shown_exists && !*warned_missing {
        warn!("Overlay: {:?} has no widget, continuing without it", *overlay);
        *warned_missing = true;
    }
}

/// Push the current score into whichever overlay just came up.
pub fn sync_overlay_score(
    overlay: Res<OverlayState>,
    hud: Res<HudState>,
    mut q: Query<(&OverlayScoreText, &mut Text)>,
) {
    if !overlay.is_changed() && !hud.is_changed() {
        return;
    }

    for (tag, mut text) in q.iter_mut() {
        if overlay.matches(tag.0) {
            *text = Text::new(format!("SCORE {}", hud.score));
        }
    }
}
