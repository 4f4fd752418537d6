use bevy::prelude::*;

use super::HudState;
use crate::player::{Player, PlayerVitals};
use crate::session::SessionData;

#[derive(Component)]
pub(super) struct HudScoreText;

#[derive(Component)]
pub(super) struct HudLifeText;

#[derive(Component)]
pub(super) struct HudLevelText;

pub(crate) fn setup_hud(mut commands: Commands, asset_server: Res<AssetServer>, hud: Res<HudState>) {
    let font: Handle<Font> = asset_server.load("fonts/skytread.ttf");

    const STATUS_BAR_H: f32 = 56.0;
    const UI_PAD: f32 = 8.0;

    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::FlexEnd,
            ..default()
        })
        .with_children(|ui| {
            ui.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Px(STATUS_BAR_H),
                    padding: UiRect::all(Val::Px(UI_PAD)),
                    justify_content: JustifyContent::SpaceBetween,
                    align_items: AlignItems::Center,
                    ..default()
                },
                BackgroundColor(Color::BLACK),
            ))
            .with_children(|bar| {
                bar.spawn((
                    HudScoreText,
                    Text::new(format!("SCORE {}", hud.score)),
                    TextFont {
                        font: font.clone(),
                        font_size: 32.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));

                bar.spawn((
                    HudLevelText,
                    Text::new(format!("LEVEL {}", hud.level + 1)),
                    TextFont {
                        font: font.clone(),
                        font_size: 32.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));

                bar.spawn((
                    HudLifeText,
                    Text::new(format!("LIFE {}", hud.life)),
                    TextFont {
                        font,
                        font_size: 32.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            });
        });
}

/// Vitals are authoritative; the HUD just mirrors them.
pub fn sync_player_life_with_hud(
    mut hud: ResMut<HudState>,
    q_player: Query<&PlayerVitals, With<Player>>,
) {
    let Some(vitals) = q_player.iter().next() else {
        return;
    };
    if hud.life != vitals.life {
        hud.life = vitals.life;
    }
}

/// Same for the level counter, owned by the session.
pub fn sync_level_with_hud(mut hud: ResMut<HudState>, session: Res<SessionData>) {
    if hud.level != session.current_level {
        hud.level = session.current_level;
    }
}

pub(crate) fn sync_hud_text(
    hud: Res<HudState>,
    mut q: Query<(
        &mut Text,
        Option<&HudScoreText>,
        Option<&HudLifeText>,
        Option<&HudLevelText>,
    )>,
) {
    if !hud.is_changed() {
        return;
    }

    for (mut text, score_tag, life_tag, level_tag) in &mut q {
        if score_tag.is_some() {
            *text = Text::new(format!("SCORE {}", hud.score));
        } else if life_tag.is_some() {
            *text = Text::new(format!("LIFE {}", hud.life));
        } else if level_tag.is_some() {
            *text = Text::new(format!("LEVEL {}", hud.level + 1));
        }
    }
}
