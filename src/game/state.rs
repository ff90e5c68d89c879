use super::action::Direction;

/// A position on the game grid, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current heading
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit cells, head first. At least two cells.
    pub fn from_cells(cells: impl IntoIterator<Item = Position>, direction: Direction) -> Self {
        let body: Vec<Position> = cells.into_iter().collect();
        debug_assert!(body.len() >= 2, "a snake needs at least two cells");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check whether moving the head onto `pos` runs into the body.
    ///
    /// When the snake is not growing the tail cell is vacated in the same
    /// tick, so it does not count.
    pub fn would_collide(&self, pos: Position, growing: bool) -> bool {
        let blocking = if growing {
            &self.body[..]
        } else {
            &self.body[..self.body.len() - 1]
        };
        blocking.contains(&pos)
    }

    /// Prepend a new head in the current direction and drop the tail unless
    /// `should_grow` is true
    pub fn move_snake(&mut self, should_grow: bool) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Collision(CollisionType),
    /// The snake ate the last food that fit; no free cell is left for another
    BoardFilled,
}

impl GameOutcome {
    pub fn describe(&self) -> &'static str {
        match self {
            GameOutcome::Collision(CollisionType::Wall) => "Hit the wall",
            GameOutcome::Collision(CollisionType::SelfCollision) => "Ran into itself",
            GameOutcome::BoardFilled => "Board filled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Over(GameOutcome),
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Current food cell, `None` only once the board is filled
    pub food: Option<Position>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    pub status: GameStatus,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            food: Some(food),
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            status: GameStatus::Running,
        }
    }

    /// Current heading of the snake
    pub fn heading(&self) -> Direction {
        self.snake.direction
    }

    /// Request a new heading for the next tick.
    ///
    /// A direct reversal of the current heading is ignored. Returns whether
    /// the heading was accepted.
    pub fn set_heading(&mut self, requested: Direction) -> bool {
        if self.snake.direction.is_opposite(requested) {
            return false;
        }
        self.snake.direction = requested;
        true
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.status {
            GameStatus::Running => None,
            GameStatus::Over(outcome) => Some(outcome),
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }
}
