use std::time::Duration;

use anyhow::Result;
use rand::Rng;
use tracing::{debug, info};

use super::{
    action::Direction,
    config::GameConfig,
    food::generate_food,
    speed::next_delay,
    state::{CollisionType, GameState, Phase, Position, Snake, Snapshot},
};
use crate::clock::{Scheduler, TickHandle};
use crate::score::{HighScoreStore, ScoreBoard};

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Collision that ended the run, if any
    pub collision_type: Option<CollisionType>,
    /// Score of the run right after the move, before any reset
    pub score: u32,
}

/// The game state machine.
///
/// Owns the board and drives the clock through the injected [`Scheduler`].
/// Food placement draws from `R`; the best score goes through `H`.
pub struct GameEngine<S, R, H> {
    config: GameConfig,
    state: GameState,
    phase: Phase,
    scheduler: S,
    tick: Option<TickHandle>,
    rng: R,
    scores: ScoreBoard<H>,
}

impl<S, R, H> GameEngine<S, R, H>
where
    S: Scheduler,
    R: Rng,
    H: HighScoreStore,
{
    /// Create an idle engine with a fresh board. Fails on an invalid config.
    pub fn new(config: GameConfig, scheduler: S, mut rng: R, store: H) -> Result<Self> {
        config.validate()?;
        let state = initial_state(&config, &mut rng);
        Ok(Self {
            config,
            state,
            phase: Phase::Idle,
            scheduler,
            tick: None,
            rng,
            scores: ScoreBoard::load(store),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn high_score(&self) -> u32 {
        self.scores.high_score()
    }

    pub fn scores(&self) -> &ScoreBoard<H> {
        &self.scores
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Handle of the live tick schedule, if running
    pub fn active_tick(&self) -> Option<TickHandle> {
        self.tick
    }

    /// Begin a run. Does nothing when one is already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.phase = Phase::Running;
        self.tick = Some(self.scheduler.schedule(self.delay()));
        info!(
            grid_size = self.config.grid_size,
            delay_ms = self.state.delay_ms,
            "Game started"
        );
    }

    /// Change heading for the next step. Reversals and idle requests are ignored.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.is_running() || self.state.snake.direction.is_opposite(direction) {
            return false;
        }
        self.state.snake.direction = direction;
        true
    }

    /// Entry point for the clock. Ticks from cancelled schedules are dropped.
    pub fn on_tick(&mut self, handle: TickHandle) -> Option<StepResult> {
        if self.tick != Some(handle) {
            debug!(?handle, "Dropping stale tick");
            return None;
        }
        self.step()
    }

    /// Advance the snake one cell. Returns `None` while idle.
    pub fn step(&mut self) -> Option<StepResult> {
        if !self.is_running() {
            return None;
        }

        let new_head = self.state.snake.advance_head();
        let ate_food = new_head == self.state.food;

        if ate_food {
            self.state.food = generate_food(&mut self.rng, self.config.grid_size);
            self.state.delay_ms = next_delay(self.state.delay_ms);
            self.reschedule();
            debug!(
                score = self.state.score(),
                delay_ms = self.state.delay_ms,
                "Food eaten"
            );
        } else {
            self.state.snake.trim_tail();
        }

        let score = self.state.score();
        let collision_type = self.check_collision(new_head);
        if let Some(kind) = collision_type {
            debug!(?kind, x = new_head.x, y = new_head.y, "Collision");
            self.reset();
        }

        Some(StepResult {
            ate_food,
            collision_type,
            score,
        })
    }

    /// End the run: record the score, stop the clock and restore the defaults.
    /// Safe to call when already idle.
    pub fn reset(&mut self) {
        let was_running = self.is_running();
        let final_score = self.state.score();
        // An idle board always scores 0, so only finished runs are recorded
        let new_record = was_running && self.scores.on_game_over(final_score);

        if let Some(handle) = self.tick.take() {
            self.scheduler.cancel(handle);
        }
        self.phase = Phase::Idle;

        self.state = initial_state(&self.config, &mut self.rng);

        if was_running {
            info!(
                final_score,
                high_score = self.scores.high_score(),
                new_record,
                "Game over"
            );
        }
    }

    /// Read-only copy for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.state.snake.body().to_vec(),
            food: self.state.food,
            score: self.state.score(),
            high_score: self.scores.high_score(),
            started: self.is_running(),
            direction: self.state.snake.direction,
            grid_size: self.config.grid_size,
            delay_ms: self.state.delay_ms,
        }
    }

    /// Replace the board while keeping phase, clock and scores
    #[cfg(test)]
    pub(crate) fn load_state(&mut self, state: GameState) {
        self.state = state;
    }

    fn delay(&self) -> Duration {
        Duration::from_millis(self.state.delay_ms)
    }

    fn reschedule(&mut self) {
        if let Some(handle) = self.tick.take() {
            self.scheduler.cancel(handle);
        }
        self.tick = Some(self.scheduler.schedule(self.delay()));
    }

    /// Check the freshly inserted head against the walls and the rest of the body
    fn check_collision(&self, head: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }
        if self.state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }
        None
    }
}

fn initial_state<R: Rng>(config: &GameConfig, rng: &mut R) -> GameState {
    let snake = Snake::new(Position::from(config.center()), Direction::Right);
    let food = generate_food(rng, config.grid_size);
    GameState::new(snake, food, config.grid_size, config.initial_delay_ms)
}
