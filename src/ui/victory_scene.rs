//! Victory screen: winner, final score and an OK button.

use super::common::{button, center_rows};
use crate::app::VictoryScreen;
use fencing::duel::Side;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the victory screen over the full area.
pub fn render_victory_scene(frame: &mut Frame, area: Rect, victory: &VictoryScreen) {
    frame.render_widget(Clear, area);

    let color = match victory.winner {
        Side::Left => Color::Cyan,
        Side::Right => Color::LightRed,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            format!("Player {} Wins!", victory.winner.player_number()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            final_score(victory),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(button("OK", true, color)),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Back to menu",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let height = lines.len() as u16;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        center_rows(inner, height),
    );
}

fn final_score(victory: &VictoryScreen) -> String {
    format!(
        "Final Score: {} - {}",
        victory.left_score, victory.right_score
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_score_is_left_then_right() {
        let victory = VictoryScreen {
            winner: Side::Right,
            left_score: 3,
            right_score: 5,
        };
        assert_eq!(final_score(&victory), "Final Score: 3 - 5");
    }
}
