use std::time::Duration;

use super::action::Direction;
use super::state::Position;

/// Width of the board in cells
pub const GRID_WIDTH: usize = 30;
/// Height of the board in cells
pub const GRID_HEIGHT: usize = 20;
/// Ticks per second of the game loop
pub const MOVES_PER_SECOND: u64 = 10;

/// Rectangle of cells food may appear in, `min` inclusive and `max` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnArea {
    pub min: Position,
    pub max: Position,
}

impl SpawnArea {
    pub fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    /// Area used by the classic board: the top three rows are kept clear for
    /// the score line and the outer columns are skipped.
    pub fn classic(grid_width: usize, grid_height: usize) -> Self {
        Self {
            min: Position::new(1, 3),
            max: Position::new(grid_width as i32 - 1, grid_height as i32),
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.min.x && pos.x < self.max.x && pos.y >= self.min.y && pos.y < self.max.y
    }

    /// Number of cells in the area
    pub fn cell_count(&self) -> usize {
        let w = (self.max.x - self.min.x).max(0) as usize;
        let h = (self.max.y - self.min.y).max(0) as usize;
        w * h
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// All cells of the area, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (self.min.y..self.max.y)
            .flat_map(move |y| (self.min.x..self.max.x).map(move |x| Position::new(x, y)))
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Head cell of a fresh snake
    pub initial_head: Position,
    /// Heading of a fresh snake
    pub initial_direction: Direction,
    /// Initial length of the snake (at least 2)
    pub initial_snake_length: usize,
    /// Game ticks per second
    pub moves_per_second: u64,
    /// Where food may be placed
    pub food_area: SpawnArea,
    /// Random samples tried before falling back to scanning free cells
    pub food_spawn_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            initial_head: Position::new(5, 5),
            initial_direction: Direction::Right,
            initial_snake_length: 2,
            moves_per_second: MOVES_PER_SECOND,
            food_area: SpawnArea::classic(GRID_WIDTH, GRID_HEIGHT),
            food_spawn_attempts: 64,
        }
    }
}

impl GameConfig {
    /// Time between two game ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / self.moves_per_second.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_head, Position::new(5, 5));
        assert_eq!(config.initial_direction, Direction::Right);
        assert_eq!(config.initial_snake_length, 2);
    }

    #[test]
    fn test_tick_interval() {
        let config = GameConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_classic_spawn_area() {
        let area = SpawnArea::classic(GRID_WIDTH, GRID_HEIGHT);

        assert!(area.contains(Position::new(1, 3)));
        assert!(area.contains(Position::new(28, 19)));
        assert!(!area.contains(Position::new(0, 3)));
        assert!(!area.contains(Position::new(29, 3)));
        assert!(!area.contains(Position::new(5, 2)));
        assert!(!area.contains(Position::new(5, 20)));

        assert_eq!(area.cell_count(), 28 * 17);
        assert_eq!(area.cells().count(), area.cell_count());
        assert!(area.cells().all(|p| area.contains(p)));
    }

    #[test]
    fn test_degenerate_area_is_empty() {
        let area = SpawnArea::new(Position::new(4, 4), Position::new(4, 9));
        assert!(area.is_empty());
        assert_eq!(area.cells().count(), 0);
    }
}
