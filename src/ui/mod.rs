//! Terminal rendering for each screen.

pub mod common;
pub mod menu_scene;
pub mod strip_scene;
pub mod victory_scene;

use crate::app::{App, Screen};
use ratatui::Frame;

/// Draw whichever screen the app is on.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.size();
    match &app.screen {
        Screen::Menu(menu) => menu_scene::render_menu_scene(frame, area, *menu),
        Screen::Match(controller) => {
            strip_scene::render_strip_scene(frame, area, &controller.snapshot(), &app.bout_log)
        }
        Screen::Victory(victory) => victory_scene::render_victory_scene(frame, area, victory),
    }
}
