use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::audio::AudioSink;
use crate::game::GameSession;
use crate::input::{InputHandler, KeyAction, NameEntryAction};
use crate::metrics::PlayStats;
use crate::render::{Hud, Renderer};
use crate::storage::{HighScoreStore, ANONYMOUS};

/// Interactive terminal game: keyboard in, ratatui frames out
pub struct PlayApp<S: HighScoreStore> {
    session: GameSession<S>,
    stats: PlayStats,
    renderer: Renderer,
    input_handler: InputHandler,
    audio: Box<dyn AudioSink>,
    should_quit: bool,
    name_buffer: String,
}

impl<S: HighScoreStore> PlayApp<S> {
    pub fn new(session: GameSession<S>, audio: Box<dyn AudioSink>) -> Self {
        Self {
            session,
            stats: PlayStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            audio,
            should_quit: false,
            name_buffer: String::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_ms = self.session.state().tick_interval_ms;
        let mut tick_timer = new_tick_timer(tick_ms);
        let mut last_tick = Instant::now();

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                _ = tick_timer.tick() => {
                    let now = Instant::now();
                    let dt_ms = now.duration_since(last_tick).as_millis() as u64;
                    last_tick = now;

                    if self.session.state().is_running() {
                        self.update_game(dt_ms)?;
                    }

                    // oranges change the pace mid-run
                    let wanted = self.session.state().tick_interval_ms;
                    if wanted != tick_ms {
                        debug!(from = tick_ms, to = wanted, "tick interval changed");
                        tick_ms = wanted;
                        tick_timer = tick_timer_at(now, tick_ms);
                    }
                }

                _ = render_timer.tick() => {
                    let hud = Hud {
                        selected_mode: self.session.selected_mode(),
                        high_score: self.session.high_score(),
                        stats: &self.stats,
                        outcome: self.session.outcome(),
                        name_entry: self
                            .session
                            .awaiting_high_score_name()
                            .then_some(self.name_buffer.as_str()),
                    };
                    let state = self.session.state();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, state, &hud);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // keep a beaten record even if the player quits at the prompt
        if self.session.awaiting_high_score_name() {
            self.session.submit_high_score(&self.name_buffer);
        }
        info!(games = self.stats.games_played, "quitting");

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            if self.session.awaiting_high_score_name() {
                self.handle_name_key(key);
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    self.session.request_direction(direction);
                }
                KeyAction::SelectMode(mode) => {
                    self.session.select_mode(mode);
                }
                KeyAction::Restart => {
                    self.reset_game()?;
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn handle_name_key(&mut self, key: KeyEvent) {
        let len = self.name_buffer.chars().count();
        match self.input_handler.handle_name_key(key, len) {
            NameEntryAction::Push(c) => self.name_buffer.push(c),
            NameEntryAction::Backspace => {
                self.name_buffer.pop();
            }
            NameEntryAction::Submit => {
                let name = std::mem::take(&mut self.name_buffer);
                self.session.submit_high_score(&name);
            }
            NameEntryAction::Skip => {
                self.name_buffer.clear();
                self.session.submit_high_score(ANONYMOUS);
            }
            NameEntryAction::Quit => {
                self.should_quit = true;
            }
            NameEntryAction::None => {}
        }
    }

    fn update_game(&mut self, dt_ms: u64) -> Result<()> {
        let result = self
            .session
            .tick(dt_ms)
            .context("Failed to advance the game")?;

        self.stats.record(&result.events);
        self.audio.on_events(&result.events);

        Ok(())
    }

    fn reset_game(&mut self) -> Result<()> {
        self.session.reset().context("Failed to reset the game")?;
        self.stats.on_game_start();
        self.name_buffer.clear();
        Ok(())
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

fn new_tick_timer(period_ms: u64) -> Interval {
    tick_timer_at(Instant::now(), period_ms)
}

/// First tick one full period after `start`, then every period
fn tick_timer_at(start: Instant, period_ms: u64) -> Interval {
    let period = Duration::from_millis(period_ms.max(1));
    let mut timer = interval_at(start + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
