use bevy::prelude::*;

mod hud;
mod state;

pub mod menu;
pub mod overlay;

pub use state::HudState;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudState>()
            .init_resource::<menu::MainMenuActive>()
            .init_resource::<overlay::OverlayState>()
            .init_resource::<overlay::OverlayRoots>()
            .init_resource::<overlay::DebugHotkeys>()
            .add_systems(Startup, (hud::setup_hud, overlay::setup_overlays, menu::setup_main_menu))
            .add_systems(
                Update,
                (
                    menu::main_menu_input,
                    menu::victory_to_main_menu,
                    overlay::pause_input,
                    overlay::debug_overlay_hotkeys,
                )
                    .chain(), // one input authority per frame
            )
            .add_systems(
                Update,
                (
                    hud::sync_player_life_with_hud,
                    hud::sync_level_with_hud,
                    hud::sync_hud_text.after(hud::sync_player_life_with_hud),
                    overlay::sync_overlay_visibility,
                    overlay::sync_overlay_score,
                ),
            );
    }
}
