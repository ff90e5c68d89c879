use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};
use tracing::{debug, info};

use crate::assets::Sprites;
use crate::game::{GameConfig, GameEngine, GameState, StepResult};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Refresh rate of the on-screen clock between game events
const CLOCK_REFRESH: Duration = Duration::from_millis(250);

const WINDOW_TITLE: &str = "Snake";

/// Keyboard-controlled play. Owns the one live [`GameState`] and hands it to
/// the engine on ticks, to the input handler on key presses and to the
/// renderer after either.
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Set on restart so the loop re-arms the tick timer
    restarted: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, sprites: &Sprites, seed: Option<u64>) -> Self {
        let mut engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        };
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(sprites),
            input_handler: InputHandler::new(),
            should_quit: false,
            restarted: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, SetTitle(WINDOW_TITLE))
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!("game started");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            games_played = self.metrics.games_played,
            best_score = self.metrics.best_score,
            "session ended"
        );

        result
    }

    /// First tick one period from now; a late tick is pushed back rather
    /// than followed by a burst of catch-up ticks
    fn tick_timer(&self) -> Interval {
        let period = self.engine.config().tick_interval();
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = self.tick_timer();
        let mut clock_timer = interval(CLOCK_REFRESH);

        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, disabled once the game is over
                _ = tick_timer.tick(), if self.state.is_running() => {
                    self.update_game();
                }

                _ = clock_timer.tick() => {
                    self.metrics.update();
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            if self.restarted {
                tick_timer = self.tick_timer();
                self.restarted = false;
            }

            self.draw(terminal)?;
        }

        Ok(())
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        terminal
            .draw(|frame| {
                self.renderer.render(frame, &self.state, &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                if !self.state.set_heading(direction) {
                    debug!(?direction, "reversal ignored");
                }
            }
            KeyAction::Restart => {
                self.reset_game();
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        if !self.state.is_running() {
            return;
        }

        if let StepResult::GameOver(outcome) = self.engine.advance(&mut self.state) {
            info!(?outcome, score = self.state.score, "game over");
            self.metrics.on_game_over(self.state.score);
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_game_start();
        self.restarted = true;
        info!("game restarted");
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Sprite;
    use crate::game::{Direction, GameStatus, Position};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn sprites() -> Sprites {
        Sprites {
            snake: Sprite::solid(0, 255, 0),
            food: Sprite::solid(255, 0, 0),
        }
    }

    fn mode() -> HumanMode {
        HumanMode::new(GameConfig::default(), &sprites(), Some(11))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(mode.state.is_running());
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.heading(), Direction::Right);
    }

    #[test]
    fn test_turn_applies_before_next_tick() {
        let mut mode = mode();
        mode.state.food = Some(Position::new(20, 15));

        mode.handle_event(key(KeyCode::Down));
        assert_eq!(mode.state.heading(), Direction::Down);
        assert_eq!(mode.state.snake.head(), Position::new(5, 5));

        mode.update_game();
        assert_eq!(mode.state.snake.head(), Position::new(5, 6));
    }

    #[test]
    fn test_reverse_key_is_ignored() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Left));
        assert_eq!(mode.state.heading(), Direction::Right);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut mode = mode();
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        mode.handle_event(Event::Key(release));
        assert_eq!(mode.state.heading(), Direction::Right);
    }

    #[test]
    fn test_game_over_records_metrics() {
        let mut mode = mode();
        mode.state.food = Some(Position::new(20, 15));
        mode.handle_event(key(KeyCode::Up));

        // Five cells up from row 5 reaches row 0, the sixth tick hits the wall
        for _ in 0..6 {
            mode.update_game();
        }

        assert!(!mode.state.is_running());
        assert_eq!(mode.metrics.games_played, 1);

        // Further ticks change nothing
        let frozen = mode.state.clone();
        mode.update_game();
        assert_eq!(mode.state, frozen);
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode();
        mode.state.score = 10;
        mode.state.status = GameStatus::Over(crate::game::GameOutcome::BoardFilled);

        mode.handle_event(key(KeyCode::Char('r')));

        assert_eq!(mode.state.score, 0);
        assert!(mode.state.is_running());
        assert!(mode.restarted);
    }

    #[tokio::test]
    async fn test_tick_timer_keeps_fixed_cadence() {
        let mode = mode();
        let timer = mode.tick_timer();

        assert_eq!(timer.period(), Duration::from_millis(100));
        assert_eq!(timer.missed_tick_behavior(), MissedTickBehavior::Delay);
    }

    #[test]
    fn test_title_is_sent_to_terminal() {
        let mut out: Vec<u8> = Vec::new();
        execute!(out, SetTitle(WINDOW_TITLE)).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains(WINDOW_TITLE));
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
