use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tracing::info;

use crate::clock::{TickReceiver, TokioScheduler};
use crate::game::{GameConfig, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;
use crate::score::HighScoreStore;

/// Interactive play: keyboard in, ticks from tokio timers, ratatui out.
///
/// Both event sources are polled from one `select!` loop, so a step and its
/// redraw always finish before the next key or tick is looked at.
pub struct HumanMode<R, H> {
    engine: GameEngine<TokioScheduler, R, H>,
    ticks: TickReceiver,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl<R: Rng, H: HighScoreStore> HumanMode<R, H> {
    /// Fails on an invalid config. Starting a run needs a tokio runtime.
    pub fn new(config: GameConfig, rng: R, store: H) -> Result<Self> {
        let (scheduler, ticks) = TokioScheduler::new();

        Ok(Self {
            engine: GameEngine::new(config, scheduler, rng, store)?,
            ticks,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
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

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            high_score = self.engine.high_score(),
            games_played = self.engine.scores().games_played(),
            "Session ended"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
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

                // Game logic tick
                Some(handle) = self.ticks.recv() => {
                    self.engine.on_tick(handle);
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            self.draw(terminal)?;
        }

        self.finish();

        Ok(())
    }

    /// Record the run in progress, if any
    fn finish(&mut self) {
        self.engine.reset();
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let snapshot = self.engine.snapshot();
        terminal
            .draw(|frame| self.renderer.render(frame, &snapshot))
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self
                .input_handler
                .handle_key_event(key, self.engine.is_running())
            {
                KeyAction::Start => self.engine.start(),
                KeyAction::Turn(direction) => {
                    self.engine.set_direction(direction);
                }
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
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
