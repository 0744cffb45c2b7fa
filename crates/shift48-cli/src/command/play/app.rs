use std::time::Duration;

use chrono::Utc;
use crossterm::event::{Event, KeyCode};
use log::warn;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Text},
};
use shift48_engine::{
    Difficulty, Direction, GameSession, Position, PowerUpAction, PowerUpKind, SessionEvent,
    SessionState,
};
use shift48_store::{GameResult, ProfileStore};

use crate::{
    tui::{App, Tui},
    ui::widgets::SessionDisplay,
};

const FPS: f64 = 30.0;

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    store: ProfileStore,
    auto_start: Option<Difficulty>,
    /// `Some` while aiming the clear-tile power-up.
    cursor: Option<Position>,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession, store: ProfileStore, auto_start: Option<Difficulty>) -> Self {
        Self {
            session,
            store,
            auto_start,
            cursor: None,
            is_exiting: false,
        }
    }

    /// Forwards pending session events to the store. Persistence is
    /// fire-and-forget: a failed write is logged and the session plays on.
    fn flush_events(&mut self) {
        for event in self.session.drain_events() {
            let outcome = match event {
                SessionEvent::AchievementUnlocked { id } => {
                    self.store.record_achievement_unlock(id, Utc::now())
                }
                SessionEvent::GameFinished {
                    score,
                    difficulty,
                    duration,
                    moves,
                    highest_tile,
                } => self.store.record_game_result(&GameResult {
                    score,
                    difficulty,
                    duration_secs: duration.as_secs(),
                    moves,
                    highest_tile,
                }),
            };
            if let Err(err) = outcome {
                warn!("failed to persist session event: {err:#}");
            }
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('1') => self.session.start(Difficulty::Easy),
            KeyCode::Char('2') | KeyCode::Enter => self.session.start(Difficulty::Medium),
            KeyCode::Char('3') => self.session.start(Difficulty::Hard),
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    fn handle_playing_key(&mut self, code: KeyCode) {
        if let Some(cursor) = self.cursor {
            self.handle_targeting_key(code, cursor);
            return;
        }
        match code {
            KeyCode::Left => _ = self.session.apply_move(Direction::Left),
            KeyCode::Right => _ = self.session.apply_move(Direction::Right),
            KeyCode::Up => _ = self.session.apply_move(Direction::Up),
            KeyCode::Down => _ = self.session.apply_move(Direction::Down),
            KeyCode::Char('u') => _ = self.session.use_power_up(PowerUpAction::Undo),
            KeyCode::Char('m') => _ = self.session.use_power_up(PowerUpAction::ScoreMultiplier),
            KeyCode::Char('c') if self.session.power_ups().is_available(PowerUpKind::ClearTile) => {
                let center = self.session.board().size() / 2;
                self.cursor = Some(Position::new(center, center));
            }
            KeyCode::Char('q') => self.is_exiting = true,
            _ => {}
        }
    }

    fn handle_targeting_key(&mut self, code: KeyCode, cursor: Position) {
        let max = self.session.board().size() - 1;
        match code {
            KeyCode::Left => {
                self.cursor = Some(Position::new(cursor.row, cursor.col.saturating_sub(1)));
            }
            KeyCode::Right => {
                self.cursor = Some(Position::new(cursor.row, (cursor.col + 1).min(max)));
            }
            KeyCode::Up => {
                self.cursor = Some(Position::new(cursor.row.saturating_sub(1), cursor.col));
            }
            KeyCode::Down => {
                self.cursor = Some(Position::new((cursor.row + 1).min(max), cursor.col));
            }
            KeyCode::Enter => {
                _ = self.session.use_power_up(PowerUpAction::ClearTile(cursor));
                self.cursor = None;
            }
            KeyCode::Esc | KeyCode::Char('c') => self.cursor = None,
            _ => {}
        }
    }

    fn handle_game_over_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('r') => self.session.restart(),
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    fn draw_main_menu(&self, frame: &mut Frame) {
        let config = self.session.config();
        let mut lines = vec![
            Line::from("S H I F T 4 8").centered(),
            Line::from(""),
        ];
        for (key, difficulty) in [
            ("1", Difficulty::Easy),
            ("2", Difficulty::Medium),
            ("3", Difficulty::Hard),
        ] {
            let profile = config.profile(difficulty);
            let size = profile.board_size;
            let timed = match profile.time_limit_secs {
                Some(secs) => format!(", {secs}s limit"),
                None => String::new(),
            };
            lines.push(Line::from(format!("{key}) {difficulty} ({size}x{size}{timed})")).centered());
        }
        lines.push(Line::from("").centered());
        lines.push(Line::from("Enter) Start at Medium | Q) Quit").centered());

        #[expect(clippy::cast_possible_truncation)]
        let height = lines.len() as u16;
        let area = frame
            .area()
            .centered(Constraint::Length(40), Constraint::Length(height));
        frame.render_widget(Text::from(lines), area);
    }

    fn draw_game(&self, frame: &mut Frame) {
        let display = SessionDisplay::new(&self.session).cursor(self.cursor);
        let help_text = match self.session.state() {
            SessionState::Playing if self.cursor.is_some() => {
                "Targeting: ← ↑ → ↓ (Aim) | Enter (Clear Tile) | Esc (Cancel)"
            }
            SessionState::Playing => {
                "Controls: ← ↑ → ↓ (Shift) | U (Undo) | M (Multiplier) | C (Clear Tile) | Q (Quit)"
            }
            _ => "Controls: R (Main Menu) | Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(display, main_area);
        frame.render_widget(help_text, help_area);
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(FPS);
        if let Some(difficulty) = self.auto_start.take() {
            self.session.start(difficulty);
        }
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        if let Some(event) = event.as_key_event() {
            match self.session.state().clone() {
                SessionState::MainMenu => self.handle_menu_key(event.code),
                SessionState::Playing => self.handle_playing_key(event.code),
                SessionState::GameOver => self.handle_game_over_key(event.code),
            }
            // Flush here as well as on tick: a quit key may arrive in the
            // same sub-frame that produced a GameFinished event, and exiting
            // must not drop it.
            self.flush_events();
        }
    }

    fn draw(&self, frame: &mut Frame) {
        match self.session.state() {
            SessionState::MainMenu => self.draw_main_menu(frame),
            _ => self.draw_game(frame),
        }
    }

    fn update(&mut self, _tui: &mut Tui, delta: Duration) {
        self.session.tick(delta);
        self.flush_events();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crossterm::event::{KeyEvent, KeyModifiers};
    use shift48_engine::GameConfig;

    use super::*;

    fn temp_store(tag: &str) -> ProfileStore {
        let dir = std::env::temp_dir().join(format!("shift48-play-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        ProfileStore::new(dir)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn quitting_right_after_game_over_still_persists_the_result() {
        let mut config = GameConfig::default();
        config.medium.time_limit_secs = Some(1);
        let store = temp_store("quit");
        let mut app = PlayApp::new(
            GameSession::new(config).unwrap(),
            store.clone(),
            Some(Difficulty::Medium),
        );
        let mut tui = Tui::new();
        app.init(&mut tui);

        // Run the countdown out; the session finishes with an event pending.
        app.session.tick(Duration::from_secs(2));
        assert!(app.session.state().is_game_over());

        // Quit before any further tick could flush.
        app.handle_event(&mut tui, key(KeyCode::Char('q')));

        assert!(app.should_exit());
        assert_eq!(store.recent_scores(1).unwrap().len(), 1);
        assert_eq!(store.load_statistics().unwrap().games_played, 1);
    }

    #[test]
    fn menu_keys_start_a_game_at_the_chosen_difficulty() {
        let mut app = PlayApp::new(
            GameSession::new(GameConfig::default()).unwrap(),
            temp_store("menu"),
            None,
        );
        let mut tui = Tui::new();
        app.init(&mut tui);
        assert!(app.session.state().is_main_menu());

        app.handle_event(&mut tui, key(KeyCode::Char('3')));

        assert!(app.session.state().is_playing());
        assert_eq!(app.session.difficulty(), Difficulty::Hard);
    }
}
