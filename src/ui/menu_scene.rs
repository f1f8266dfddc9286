//! Pre-match menu: title with a Start button, then match length selection.

use super::common::{button, center_rows, create_game_layout, render_status_bar};
use crate::app::MenuScreen;
use fencing::duel::PointsToWin;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const TITLE_ART: [&str; 5] = [
    "  ___ ___ _  _  ___ ___ _  _  ___ ",
    " | __| __| \\| |/ __|_ _| \\| |/ __|",
    " | _|| _|| .` | (__ | || .` | (_ |",
    " |_| |___|_|\\_|\\___|___|_|\\_|\\___|",
    "                                   ",
];

const MENU_COLOR: Color = Color::Yellow;

const START_CONTROLS: &[(&str, &str)] = &[("[Enter]", "Start"), ("[Esc]", "Quit")];

const POINTS_CONTROLS: &[(&str, &str)] = &[
    ("[Left/Right]", "Choose"),
    ("[1-3]", "Quick pick"),
    ("[Enter]", "Fence"),
    ("[Esc]", "Back"),
];

/// Render the menu screen.
pub fn render_menu_scene(frame: &mut Frame, area: Rect, menu: MenuScreen) {
    let layout = create_game_layout(frame, area, " Fencing ", MENU_COLOR, 2, 0);

    let mut lines: Vec<Line> = TITLE_ART
        .iter()
        .map(|row| {
            Line::from(Span::styled(
                *row,
                Style::default()
                    .fg(MENU_COLOR)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    lines.push(Line::from(Span::styled(
        "Two fencers. One strip. First to the touch count wins.",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(""));

    let (status, controls) = match menu {
        MenuScreen::Start => {
            lines.push(Line::from(button("Start", true, Color::Green)));
            ("Press Enter to begin", START_CONTROLS)
        }
        MenuScreen::Points { selected } => {
            lines.push(Line::from(Span::styled(
                "Select Match Points:",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(points_buttons(selected));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                rounds_hint(PointsToWin::from_index(selected)),
                Style::default().fg(Color::DarkGray),
            )));
            ("Choose the match length", POINTS_CONTROLS)
        }
    };

    let height = lines.len() as u16;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        center_rows(layout.content, height),
    );

    render_status_bar(frame, layout.status_bar, status, Color::White, &[controls]);
}

fn points_buttons(selected: usize) -> Line<'static> {
    let mut spans = Vec::new();
    for (index, points) in PointsToWin::ALL.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(button(points.label(), index == selected, Color::Cyan));
    }
    Line::from(spans)
}

fn rounds_hint(points: PointsToWin) -> String {
    match points.total_rounds() {
        1 => "1 round, sudden death on a tie".to_string(),
        rounds => format!("{} rounds, sudden death on a tie", rounds),
    }
}
