use super::action::Direction;
use serde::{Deserialize, Serialize};

/// A cell on the game grid. Coordinates are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// True when both coordinates lie in `[1, grid_size]`
    pub fn is_within(&self, grid_size: i32) -> bool {
        (1..=grid_size).contains(&self.x) && (1..=grid_size).contains(&self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0. Never empty.
    body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// A single-cell snake
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
        }
    }

    /// Build a snake from explicit segments, head first.
    /// Returns `None` for an empty body.
    pub fn from_body(body: Vec<Position>, direction: Direction) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All segments, head first
    pub fn body(&self) -> &[Position] {
        &self.body
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Push a new head one cell ahead and return it. The tail is untouched.
    pub fn advance_head(&mut self) -> Position {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);
        new_head
    }

    /// Drop the last segment, never the head
    pub fn trim_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the start key
    #[default]
    Idle,
    /// Ticking
    Running,
}

/// Mutable board state owned by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid_size: i32,
    /// Current delay between ticks, in milliseconds
    pub delay_ms: u64,
}

impl GameState {
    pub fn new(snake: Snake, food: Position, grid_size: i32, delay_ms: u64) -> Self {
        Self {
            snake,
            food,
            grid_size,
            delay_ms,
        }
    }

    /// Score is derived from the snake length and never stored
    pub fn score(&self) -> u32 {
        (self.snake.len() - 1) as u32
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.is_within(self.grid_size)
    }
}

/// Read-only copy of the state handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub snake: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub high_score: u32,
    pub started: bool,
    pub direction: Direction,
    pub grid_size: i32,
    pub delay_ms: u64,
}

impl Snapshot {
    /// Orientation of the last segment: the way it points away from the
    /// segment in front of it. A single-cell snake uses its heading.
    pub fn tail_direction(&self) -> Direction {
        match self.snake.as_slice() {
            [.., before, tail] => {
                Direction::between((before.x, before.y), (tail.x, tail.y))
                    .map(|away| away.opposite())
                    .unwrap_or(self.direction)
            }
            _ => self.direction,
        }
    }
}
