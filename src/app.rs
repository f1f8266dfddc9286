//! Screen flow for the terminal game: menu, match, victory.

use crate::input::match_intent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fencing::duel::{
    Intent, MatchConfig, MatchController, MatchEvent, PointsToWin, Side, StrikeOutcome,
};
use fencing::error::MatchResult;
use std::collections::VecDeque;

/// Lines kept in the bout log panel.
const BOUT_LOG_LEN: usize = 8;

/// Pre-match menu. The first page only offers "Start"; the second picks the
/// match length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScreen {
    Start,
    Points { selected: usize },
}

/// Final result shown after a decided match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VictoryScreen {
    pub winner: Side,
    pub left_score: u32,
    pub right_score: u32,
}

pub enum Screen {
    Menu(MenuScreen),
    Match(Box<MatchController>),
    Victory(VictoryScreen),
}

pub struct App {
    pub screen: Screen,
    /// Timings applied to every match; points come from the menu.
    base_config: MatchConfig,
    seed: Option<u64>,
    matches_started: u64,
    /// Intents gathered since the last tick.
    pending: Vec<Intent>,
    /// Recent strikes and transitions, newest last.
    pub bout_log: VecDeque<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(base_config: MatchConfig, seed: Option<u64>) -> Self {
        Self {
            screen: Screen::Menu(MenuScreen::Start),
            base_config,
            seed,
            matches_started: 0,
            pending: Vec::new(),
            bout_log: VecDeque::with_capacity(BOUT_LOG_LEN),
            should_quit: false,
        }
    }

    /// Leave the menu and put two fencers on the strip.
    pub fn start_match(&mut self, points: PointsToWin) -> MatchResult<()> {
        let config = self.base_config.with_points(points);
        let controller = match self.seed {
            Some(seed) => MatchController::seeded(config, seed.wrapping_add(self.matches_started))?,
            None => MatchController::new(config)?,
        };
        self.matches_started += 1;
        self.pending.clear();
        self.bout_log.clear();
        self.screen = Screen::Match(Box::new(controller));
        tracing::info!(points = points.points(), "match started from menu");
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> MatchResult<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match &mut self.screen {
            Screen::Menu(MenuScreen::Start) => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.screen = Screen::Menu(MenuScreen::Points { selected: 1 });
                }
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                    self.should_quit = true;
                }
                _ => {}
            },
            Screen::Menu(MenuScreen::Points { selected }) => match key.code {
                KeyCode::Left | KeyCode::Up => {
                    *selected = selected.saturating_sub(1);
                }
                KeyCode::Right | KeyCode::Down => {
                    *selected = (*selected + 1).min(PointsToWin::ALL.len() - 1);
                }
                KeyCode::Char('1') => return self.start_match(PointsToWin::Five),
                KeyCode::Char('2') => return self.start_match(PointsToWin::Ten),
                KeyCode::Char('3') => return self.start_match(PointsToWin::Fifteen),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let points = PointsToWin::from_index(*selected);
                    return self.start_match(points);
                }
                KeyCode::Esc => {
                    self.screen = Screen::Menu(MenuScreen::Start);
                }
                _ => {}
            },
            Screen::Match(_) => {
                if let Some(intent) = match_intent(key) {
                    self.pending.push(intent);
                }
            }
            Screen::Victory(_) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc) {
                    self.screen = Screen::Menu(MenuScreen::Start);
                }
            }
        }
        Ok(())
    }

    /// Advance the current match by one frame of `dt` seconds.
    pub fn update(&mut self, dt: f64) -> MatchResult<()> {
        let Screen::Match(controller) = &mut self.screen else {
            return Ok(());
        };

        let events = controller.tick(&self.pending, dt)?;
        self.pending.clear();

        let mut next = None;
        for event in events {
            match event {
                MatchEvent::MatchWon {
                    winner,
                    left_score,
                    right_score,
                } => {
                    next = Some(Screen::Victory(VictoryScreen {
                        winner,
                        left_score,
                        right_score,
                    }));
                }
                MatchEvent::Abandoned => next = Some(Screen::Menu(MenuScreen::Start)),
                other => {
                    if let Some(line) = describe(&other) {
                        self.push_log(line);
                    }
                }
            }
        }

        if let Some(screen) = next {
            self.screen = screen;
        }
        Ok(())
    }

    fn push_log(&mut self, line: String) {
        if self.bout_log.len() == BOUT_LOG_LEN {
            self.bout_log.pop_front();
        }
        self.bout_log.push_back(line);
    }
}

/// Bout log line for an event, if it is worth showing.
fn describe(event: &MatchEvent) -> Option<String> {
    match event {
        MatchEvent::Strike(strike) => {
            let verdict = match strike.outcome {
                StrikeOutcome::Hit => "TOUCHE",
                StrikeOutcome::Miss => "miss",
                StrikeOutcome::Blocked => "parried",
            };
            Some(format!(
                "P{} {} @{}: {} ({:.1}%)",
                strike.attacker.player_number(),
                strike.kind.name(),
                strike.distance,
                verdict,
                strike.chance
            ))
        }
        MatchEvent::RoundStarted { round } => Some(format!("Round {}", round)),
        MatchEvent::SuddenDeath { extension } => {
            Some(format!("Sudden death! (x{})", extension))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn quick_config() -> MatchConfig {
        MatchConfig {
            countdown_seconds: 0.0,
            ..MatchConfig::default()
        }
    }

    #[test]
    fn test_menu_flow_starts_selected_match() {
        let mut app = App::new(quick_config(), Some(1));
        app.handle_key(press(KeyCode::Enter)).unwrap();
        assert!(matches!(
            app.screen,
            Screen::Menu(MenuScreen::Points { selected: 1 })
        ));

        app.handle_key(press(KeyCode::Left)).unwrap();
        app.handle_key(press(KeyCode::Enter)).unwrap();
        match &app.screen {
            Screen::Match(controller) => {
                assert_eq!(controller.config().points_to_win, PointsToWin::Five)
            }
            _ => panic!("expected match screen"),
        }
    }

    #[test]
    fn test_ctrl_c_quits_from_any_screen() {
        let mut app = App::new(quick_config(), Some(4));
        app.start_match(PointsToWin::Five).unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_escape_on_start_quits() {
        let mut app = App::new(quick_config(), None);
        app.handle_key(press(KeyCode::Esc)).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_keys_are_queued_until_update() {
        let mut app = App::new(quick_config(), Some(2));
        app.start_match(PointsToWin::Ten).unwrap();
        // Zero-length countdown finishes on the first tick.
        app.update(0.0).unwrap();

        app.handle_key(press(KeyCode::Char('d'))).unwrap();
        app.update(1.0 / 30.0).unwrap();

        match &app.screen {
            Screen::Match(controller) => assert_eq!(controller.actor(Side::Left).position, 4),
            _ => panic!("expected match screen"),
        }
    }

    #[test]
    fn test_escape_during_match_returns_to_menu() {
        let mut app = App::new(quick_config(), Some(3));
        app.start_match(PointsToWin::Five).unwrap();
        app.handle_key(press(KeyCode::Esc)).unwrap();
        app.update(1.0 / 30.0).unwrap();
        assert!(matches!(app.screen, Screen::Menu(MenuScreen::Start)));
    }

    #[test]
    fn test_victory_ok_returns_to_menu() {
        let mut app = App::new(quick_config(), None);
        app.screen = Screen::Victory(VictoryScreen {
            winner: Side::Right,
            left_score: 2,
            right_score: 5,
        });
        app.handle_key(press(KeyCode::Enter)).unwrap();
        assert!(matches!(app.screen, Screen::Menu(MenuScreen::Start)));
    }

    #[test]
    fn test_bout_log_is_bounded() {
        let mut app = App::new(quick_config(), None);
        for i in 0..20 {
            app.push_log(format!("line {}", i));
        }
        assert_eq!(app.bout_log.len(), BOUT_LOG_LEN);
        assert_eq!(app.bout_log.back().map(String::as_str), Some("line 19"));
    }
}
