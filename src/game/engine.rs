use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::{
    config::GameConfig,
    state::{CollisionType, GameOutcome, GameState, GameStatus, Position, Snake},
};

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The snake moved; `ate_food` is set when it grew this tick
    Continue { ate_food: bool },
    /// The game has ended; the caller should stop ticking
    GameOver(GameOutcome),
}

impl StepResult {
    pub fn is_game_over(&self) -> bool {
        matches!(self, StepResult::GameOver(_))
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh game
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(
            self.config.initial_head,
            self.config.initial_direction,
            self.config.initial_snake_length.max(2),
        );

        let food = self.generate_food(&snake);
        let status = match food {
            Some(_) => GameStatus::Running,
            None => GameStatus::Over(GameOutcome::BoardFilled),
        };

        GameState {
            snake,
            food,
            grid_width: self.config.grid_width,
            grid_height: self.config.grid_height,
            score: 0,
            steps: 0,
            status,
        }
    }

    /// Advance the game by one tick.
    ///
    /// Collisions are checked against the body before it moves. On game over
    /// nothing but the status changes, and later calls keep returning the
    /// same outcome.
    pub fn advance(&mut self, state: &mut GameState) -> StepResult {
        if let GameStatus::Over(outcome) = state.status {
            return StepResult::GameOver(outcome);
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        let ate_food = state.food == Some(new_head);

        if let Some(collision_type) = self.check_collision(state, new_head, ate_food) {
            let outcome = GameOutcome::Collision(collision_type);
            info!(
                ?collision_type,
                score = state.score,
                steps = state.steps,
                "game over"
            );
            state.status = GameStatus::Over(outcome);
            return StepResult::GameOver(outcome);
        }

        state.snake.move_snake(ate_food);
        state.steps += 1;

        if ate_food {
            state.score += 1;
            state.food = self.generate_food(&state.snake);
            debug!(score = state.score, food = ?state.food, "food eaten");

            if state.food.is_none() {
                info!(score = state.score, "no free cell left for food");
                state.status = GameStatus::Over(GameOutcome::BoardFilled);
                return StepResult::GameOver(GameOutcome::BoardFilled);
            }
        }

        StepResult::Continue { ate_food }
    }

    /// Check if the new head position causes a collision
    fn check_collision(
        &self,
        state: &GameState,
        pos: Position,
        growing: bool,
    ) -> Option<CollisionType> {
        // Check wall collision
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // Check self-collision
        if state.snake.would_collide(pos, growing) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a random free cell of the food area.
    ///
    /// Tries a bounded number of uniform samples first, then picks uniformly
    /// among the remaining free cells. Returns `None` when the snake covers
    /// the whole area.
    pub fn generate_food(&mut self, snake: &Snake) -> Option<Position> {
        let area = self.config.food_area;
        if area.is_empty() {
            return None;
        }

        for _ in 0..self.config.food_spawn_attempts {
            let x = self.rng.gen_range(area.min.x..area.max.x);
            let y = self.rng.gen_range(area.min.y..area.max.y);
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = area.cells().filter(|pos| !snake.occupies(*pos)).collect();
        debug!(free = free.len(), "food sampling exhausted, scanning free cells");
        free.choose(&mut self.rng).copied()
    }
}
