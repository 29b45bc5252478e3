use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{self, Instant, interval};

use crate::game::{GameConfig, GameEngine, NOTICE_DURATION, TickSchedule};
use crate::input::{InputAction, InputHandler};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::session::{GameSession, SwipeOutcome};
use crate::store::{HighScoreWriter, KeyValueStore, load_high_score};
use crate::tutorial::{TutorialEvent, cue_frame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Game,
}

/// The interactive terminal game: a home screen and the game screen
pub struct PlayMode {
    config: GameConfig,
    screen: Screen,
    session: Option<GameSession>,
    /// Best score on record, kept in step with what was sent to the writer
    high_score: u32,
    writer: HighScoreWriter,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    /// When the current tutorial step began, for the arrow animation
    cue_started: std::time::Instant,
    /// When to take the "new high score" notice down
    notice_deadline: Option<Instant>,
    should_quit: bool,
}

impl PlayMode {
    /// Read the recorded high score and hand the store to the background
    /// writer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: GameConfig, store: Box<dyn KeyValueStore>) -> Self {
        let high_score = load_high_score(store.as_ref());
        let writer = HighScoreWriter::spawn(store, high_score);

        Self {
            input_handler: InputHandler::new(&config),
            config,
            screen: Screen::Home,
            session: None,
            high_score,
            writer,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            cue_started: std::time::Instant::now(),
            notice_deadline: None,
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        let cleanup = self.cleanup_terminal(&mut terminal);

        self.finish(result.and(cleanup)).await
    }

    /// Drain pending high score writes, whatever happened to the loop or
    /// the terminal
    async fn finish(self, result: Result<()>) -> Result<()> {
        let flushed = self.writer.shutdown().await;
        result.and(flushed)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut schedule = TickSchedule::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Board tick
                _ = schedule.tick() => {
                    self.on_tick();
                }

                // Take the high score notice down
                _ = time::sleep_until(self.notice_deadline.unwrap_or_else(Instant::now)),
                    if self.notice_deadline.is_some() => {
                    self.on_notice_elapsed();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.render_frame(frame);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            self.sync_schedule(&mut schedule);

            if self.should_quit {
                break;
            }
        }

        schedule.cancel();
        Ok(())
    }

    /// Re-arm or stop the tick timer to match the current screen
    fn sync_schedule(&self, schedule: &mut TickSchedule) {
        match &self.session {
            Some(session) => {
                schedule.sync(session.schedule_key());
            }
            None => schedule.reset(),
        }
    }

    fn handle_event(&mut self, event: Event) {
        let action = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => self.input_handler.handle_mouse_event(mouse),
            _ => InputAction::None,
        };

        self.dispatch(action);
    }

    fn dispatch(&mut self, action: InputAction) {
        match (self.screen, action) {
            (_, InputAction::Quit) => self.should_quit = true,
            (Screen::Home, InputAction::Start) => self.enter_game(),
            (Screen::Game, InputAction::Back) => self.leave_game(),
            (Screen::Game, InputAction::Restart) => self.restart_game(),
            (Screen::Game, InputAction::Swipe(swipe)) => {
                let Some(session) = self.session.as_mut() else {
                    return;
                };
                match session.swipe(swipe) {
                    SwipeOutcome::Tutorial(TutorialEvent::Advanced(_)) => {
                        self.cue_started = std::time::Instant::now();
                    }
                    SwipeOutcome::Tutorial(TutorialEvent::Completed) => {
                        self.metrics.on_game_start();
                    }
                    SwipeOutcome::Tutorial(TutorialEvent::Ignored) | SwipeOutcome::Steered(_) => {}
                }
            }
            _ => {}
        }
    }

    fn enter_game(&mut self) {
        log::info!("entering game screen, high score {}", self.high_score);
        let engine = GameEngine::new(self.config.clone());
        self.session = Some(GameSession::new(engine, self.high_score));
        self.metrics = GameMetrics::new();
        self.cue_started = std::time::Instant::now();
        self.notice_deadline = None;
        self.screen = Screen::Game;
    }

    fn leave_game(&mut self) {
        log::info!("back to home screen");
        self.session = None;
        self.notice_deadline = None;
        self.screen = Screen::Home;
    }

    fn restart_game(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.tutorial_done() {
            return;
        }
        if !session.state().game_over {
            self.metrics.on_game_over();
        }
        session.restart();
        self.metrics.on_game_start();
        self.notice_deadline = None;
    }

    fn on_tick(&mut self) {
        let Some(report) = self.session.as_mut().and_then(GameSession::tick) else {
            return;
        };

        if let Some(score) = report.step.info.new_high_score {
            self.high_score = score;
            self.writer.record(score);
        }
        if report.notice_fired {
            self.notice_deadline = Some(Instant::now() + NOTICE_DURATION);
        }
        if report.step.terminated {
            self.metrics.on_game_over();
        }
    }

    fn on_notice_elapsed(&mut self) {
        self.notice_deadline = None;
        if let Some(session) = self.session.as_mut() {
            session.dismiss_notice();
        }
    }

    fn render_frame(&self, frame: &mut ratatui::Frame) {
        match (self.screen, &self.session) {
            (Screen::Game, Some(session)) => {
                let cue = (!session.tutorial_done()).then(|| cue_frame(self.cue_started.elapsed()));
                self.renderer
                    .render_game(frame, &session.snapshot(), &self.metrics, cue);
            }
            _ => self.renderer.render_home(frame, self.high_score),
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
