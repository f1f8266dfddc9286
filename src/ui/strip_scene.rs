//! Match screen: the strip, both fencers, clock and score.
//!
//! Each strip cell is drawn `CELL_WIDTH` columns wide. A fencer occupies its
//! cell; a lunge or fleche pokes the blade into the next cell toward the
//! opponent.

use super::common::{
    cooldown_bar, create_game_layout, format_clock, render_info_panel_frame, render_status_bar,
};
use crate::input::{PLAYER_ONE_CONTROLS, PLAYER_TWO_CONTROLS};
use fencing::core::constants::{LEFT_START_POSITION, MAX_POSITION, RIGHT_START_POSITION};
use fencing::duel::probability::in_range;
use fencing::duel::{hit_chance, Action, ActionKind, ActorState, MatchPhase, MatchSnapshot, Side};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::collections::VecDeque;

const CELL_WIDTH: usize = 4;
const STRIP_CELLS: usize = MAX_POSITION as usize + 1;

const LEFT_COLOR: Color = Color::Cyan;
const RIGHT_COLOR: Color = Color::LightRed;
const STRIP_COLOR: Color = Color::Rgb(90, 90, 90);

/// Render the match screen.
pub fn render_strip_scene(
    frame: &mut Frame,
    area: Rect,
    snapshot: &MatchSnapshot,
    bout_log: &VecDeque<String>,
) {
    let border = if snapshot.sudden_death {
        Color::Red
    } else {
        Color::Yellow
    };
    let layout = create_game_layout(frame, area, " En Garde ", border, 3, 30);

    render_scoreboard(frame, layout.content, snapshot);
    render_strip(frame, layout.content, snapshot);
    if let Some(label) = snapshot.countdown_label {
        render_countdown(frame, layout.content, label);
    }

    let status = status_text(snapshot);
    let status_color = if snapshot.sudden_death {
        Color::Red
    } else {
        Color::White
    };
    render_status_bar(
        frame,
        layout.status_bar,
        &status,
        status_color,
        &[PLAYER_ONE_CONTROLS, PLAYER_TWO_CONTROLS],
    );

    render_info_panel(frame, layout.info_panel, snapshot, bout_log);
}

fn status_text(snapshot: &MatchSnapshot) -> String {
    match snapshot.phase {
        MatchPhase::Countdown | MatchPhase::SuddenDeathCountdown => {
            "Get ready...  [Esc] Abandon".to_string()
        }
        MatchPhase::MatchEnd => "Match over".to_string(),
        MatchPhase::Active if snapshot.sudden_death => {
            "SUDDEN DEATH - next touch wins  [Esc] Abandon".to_string()
        }
        MatchPhase::Active => format!(
            "First to {} touches  [Esc] Abandon",
            snapshot.points_to_win
        ),
    }
}

/// Round, clock and score across the top of the content area.
fn render_scoreboard(frame: &mut Frame, area: Rect, snapshot: &MatchSnapshot) {
    if area.height < 2 {
        return;
    }

    let round = if snapshot.sudden_death {
        "Sudden Death".to_string()
    } else {
        format!("Round {}/{}", snapshot.current_round, snapshot.total_rounds)
    };

    let line = Line::from(vec![
        Span::styled(
            format!("P1 {:>2}", snapshot.left.score),
            Style::default()
                .fg(LEFT_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(round, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            format_clock(snapshot.time_remaining),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{:<2} P2", snapshot.right.score),
            Style::default()
                .fg(RIGHT_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        Rect { height: 1, ..area },
    );
}

/// Glyph for a fencer in its own cell.
fn fencer_glyph(actor: &ActorState) -> &'static str {
    match (actor.side, actor.action) {
        (Side::Left, Action::Idle) => " o/ ",
        (Side::Left, Action::Lunging { .. }) => " o= ",
        (Side::Left, Action::Fleche { .. }) => ">o> ",
        (Side::Left, Action::Defending { .. }) => " o| ",
        (Side::Right, Action::Idle) => " \\o ",
        (Side::Right, Action::Lunging { .. }) => " =o ",
        (Side::Right, Action::Fleche { .. }) => " <o<",
        (Side::Right, Action::Defending { .. }) => " |o ",
    }
}

/// Blade glyph drawn in the cell in front of an attacking fencer.
fn blade_glyph(actor: &ActorState) -> Option<&'static str> {
    match (actor.side, actor.action.kind()) {
        (Side::Left, Some(ActionKind::Lunge | ActionKind::Fleche)) => Some("──> "),
        (Side::Right, Some(ActionKind::Lunge | ActionKind::Fleche)) => Some(" <──"),
        _ => None,
    }
}

fn actor_color(side: Side) -> Color {
    match side {
        Side::Left => LEFT_COLOR,
        Side::Right => RIGHT_COLOR,
    }
}

/// Build the fencer row cell by cell.
fn fencer_row(snapshot: &MatchSnapshot) -> Line<'static> {
    let mut cells: Vec<Span<'static>> = (0..STRIP_CELLS)
        .map(|_| Span::raw(" ".repeat(CELL_WIDTH)))
        .collect();

    for side in Side::BOTH {
        let actor = snapshot.actor(side);
        let style = Style::default()
            .fg(actor_color(side))
            .add_modifier(Modifier::BOLD);

        if let Some(blade) = blade_glyph(actor) {
            let front = actor.position + side.forward_sign();
            let opponent = snapshot.actor(side.opponent()).position;
            if (0..=MAX_POSITION).contains(&front) && front != opponent {
                cells[front as usize] = Span::styled(blade, style);
            }
        }
        cells[actor.position as usize] = Span::styled(fencer_glyph(actor), style);
    }

    Line::from(cells)
}

/// The piste with start lines and the centre line marked.
fn strip_row() -> Line<'static> {
    let center = MAX_POSITION / 2;
    let spans: Vec<Span<'static>> = (0..STRIP_CELLS as i32)
        .map(|cell| {
            let (glyph, color) = if cell == center {
                ("═╪══", Color::White)
            } else if cell == LEFT_START_POSITION || cell == RIGHT_START_POSITION {
                ("═╧══", Color::Gray)
            } else {
                ("════", STRIP_COLOR)
            };
            Span::styled(glyph, Style::default().fg(color))
        })
        .collect();
    Line::from(spans)
}

/// Action name under each fencer.
fn label_row(snapshot: &MatchSnapshot) -> Line<'static> {
    let mut cells: Vec<Span<'static>> = (0..STRIP_CELLS)
        .map(|_| Span::raw(" ".repeat(CELL_WIDTH)))
        .collect();
    for side in Side::BOTH {
        let actor = snapshot.actor(side);
        let label = match actor.action.kind() {
            Some(ActionKind::Lunge) => "LNG ",
            Some(ActionKind::Fleche) => "FLC ",
            Some(ActionKind::Defense) => "DEF ",
            None => "    ",
        };
        cells[actor.position as usize] =
            Span::styled(label, Style::default().fg(actor_color(side)));
    }
    Line::from(cells)
}

fn render_strip(frame: &mut Frame, area: Rect, snapshot: &MatchSnapshot) {
    let strip_width = (STRIP_CELLS * CELL_WIDTH) as u16;
    if area.height < 6 || area.width < strip_width {
        let warning = Paragraph::new("Terminal too small for the strip")
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(warning, Rect { y: area.y + area.height / 2, height: 1, ..area });
        return;
    }

    let x = area.x + (area.width - strip_width) / 2;
    let y = area.y + area.height / 2 - 1;

    let distance_line = Line::from(vec![
        Span::styled("Distance ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            snapshot.distance.to_string(),
            Style::default().fg(Color::White),
        ),
        Span::styled("  Hit chance ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:.1}%", hit_chance(snapshot.distance)),
            Style::default().fg(if in_range(snapshot.distance) {
                Color::Green
            } else {
                Color::DarkGray
            }),
        ),
    ]);

    let rows = [
        fencer_row(snapshot),
        strip_row(),
        label_row(snapshot),
        Line::from(""),
        distance_line,
    ];
    for (offset, row) in rows.into_iter().enumerate() {
        let row_y = y + offset as u16;
        if row_y >= area.y + area.height {
            break;
        }
        frame.render_widget(
            Paragraph::new(row).alignment(Alignment::Center),
            Rect::new(x, row_y, strip_width, 1),
        );
    }
}

/// "Ready!", "Set!", "GO!" above the strip.
fn render_countdown(frame: &mut Frame, area: Rect, label: &str) {
    if area.height < 6 {
        return;
    }
    let y = area.y + area.height / 2 - 3;
    let text = Paragraph::new(Span::styled(
        label.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(text, Rect { y, height: 1, ..area });
}

fn fencer_lines(actor: &ActorState) -> Vec<Line<'static>> {
    let color = actor_color(actor.side);
    let action = match actor.action.kind() {
        Some(kind) => format!(
            "{} {}/{}",
            kind.name(),
            actor.action.frame() + 1,
            kind.duration()
        ),
        None => "Idle".to_string(),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Player {}", actor.side.player_number()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" Pos ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:<3}", actor.position),
                Style::default().fg(Color::White),
            ),
            Span::styled(action, Style::default().fg(color)),
        ]),
    ];

    for kind in [ActionKind::Lunge, ActionKind::Fleche, ActionKind::Defense] {
        let remaining = actor.cooldowns.get(kind);
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<8}", kind.name()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                cooldown_bar(remaining, kind.cooldown(), 10),
                Style::default().fg(if remaining == 0 { Color::Green } else { Color::Yellow }),
            ),
        ]));
    }
    lines
}

fn render_info_panel(
    frame: &mut Frame,
    area: Rect,
    snapshot: &MatchSnapshot,
    bout_log: &VecDeque<String>,
) {
    let inner = render_info_panel_frame(frame, area, " Bout ");

    let mut lines = fencer_lines(&snapshot.left);
    lines.push(Line::from(""));
    lines.extend(fencer_lines(&snapshot.right));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Log:",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    for entry in bout_log {
        let color = if entry.contains("TOUCHE") {
            Color::Green
        } else {
            Color::Gray
        };
        lines.push(Line::from(Span::styled(
            entry.clone(),
            Style::default().fg(color),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn snapshot() -> MatchSnapshot {
        let game = fencing::MatchController::seeded(fencing::MatchConfig::default(), 1).unwrap();
        game.snapshot()
    }

    #[test]
    fn test_rows_span_the_strip() {
        let snap = snapshot();
        assert_eq!(line_text(&fencer_row(&snap)).chars().count(), STRIP_CELLS * CELL_WIDTH);
        assert_eq!(line_text(&strip_row()).chars().count(), STRIP_CELLS * CELL_WIDTH);
        assert_eq!(line_text(&label_row(&snap)).chars().count(), STRIP_CELLS * CELL_WIDTH);
    }

    #[test]
    fn test_fencers_drawn_at_their_cells() {
        let snap = snapshot();
        let row = fencer_row(&snap);
        assert_eq!(
            row.spans[LEFT_START_POSITION as usize].content,
            fencer_glyph(&snap.left)
        );
        assert_eq!(
            row.spans[RIGHT_START_POSITION as usize].content,
            fencer_glyph(&snap.right)
        );
    }

    #[test]
    fn test_blade_drawn_in_front_of_lunge() {
        let mut snap = snapshot();
        snap.left.action = Action::start(ActionKind::Lunge);
        let row = fencer_row(&snap);
        assert_eq!(
            row.spans[LEFT_START_POSITION as usize + 1].content,
            "──> "
        );
    }

    #[test]
    fn test_status_text_mentions_sudden_death() {
        let mut snap = snapshot();
        snap.phase = MatchPhase::Active;
        snap.sudden_death = true;
        assert!(status_text(&snap).contains("SUDDEN DEATH"));
    }
}
