use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::mode::GameMode;

/// A position on the game grid
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
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction the next tick moves in
    pub direction: Direction,
    /// Direction of the last completed move; turns are checked against this
    pub heading: Direction,
}

#[allow(clippy::len_without_is_empty)]
impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self {
            body,
            direction,
            heading: direction,
        }
    }

    /// Build a snake from explicit segments, head first
    #[cfg(test)]
    pub(crate) fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self {
            body,
            direction,
            heading: direction,
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        // body always holds at least the head
        self.body[self.body.len() - 1]
    }

    /// Body segments, excluding head
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }
}

/// Kind of food, each with its own score and side effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodKind {
    Apple,
    Banana,
    Orange,
    Mouse,
}

/// What eating a food does besides scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodEffect {
    None,
    /// Temporarily shortens the tick interval
    SpeedUp,
    /// Adds an extra tail segment
    ExtraGrowth,
}

impl FoodKind {
    pub const ALL: [FoodKind; 4] = [
        FoodKind::Apple,
        FoodKind::Banana,
        FoodKind::Orange,
        FoodKind::Mouse,
    ];

    pub fn points(&self) -> u32 {
        match self {
            FoodKind::Apple => 1,
            FoodKind::Banana => 2,
            FoodKind::Orange => 1,
            FoodKind::Mouse => 3,
        }
    }

    pub fn effect(&self) -> FoodEffect {
        match self {
            FoodKind::Apple | FoodKind::Banana => FoodEffect::None,
            FoodKind::Orange => FoodEffect::SpeedUp,
            FoodKind::Mouse => FoodEffect::ExtraGrowth,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FoodKind::Apple => "apple",
            FoodKind::Banana => "banana",
            FoodKind::Orange => "orange",
            FoodKind::Mouse => "mouse",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    pub fn new(position: Position, kind: FoodKind) -> Self {
        Self { position, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    /// Cosmetic only; the snake glows but moves at the usual pace
    Speed,
    /// Collisions are ignored
    Invincibility,
    /// Head is pulled one extra cell towards the food each tick
    Magnet,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Speed,
        PowerUpKind::Invincibility,
        PowerUpKind::Magnet,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "speed",
            PowerUpKind::Invincibility => "invincibility",
            PowerUpKind::Magnet => "magnet",
        }
    }
}

/// A power-up lying on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUp {
    pub position: Position,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(position: Position, kind: PowerUpKind) -> Self {
        Self { position, kind }
    }
}

/// A collected power-up and the session time it wears off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub expires_at_ms: u64,
}

/// Axis-aligned rectangle of blocked cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub origin: Position,
    pub width: i32,
    pub height: i32,
}

impl Obstacle {
    pub fn new(origin: Position, width: i32, height: i32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.origin.x
            && pos.x < self.origin.x + self.width
            && pos.y >= self.origin.y
            && pos.y < self.origin.y + self.height
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |dy| {
            (0..self.width).map(move |dx| self.origin.moved_by(dx, dy))
        })
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into an obstacle
    Obstacle,
    /// Snake hit itself
    SelfCollision,
}

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first direction key
    NotStarted,
    Running,
    /// Terminal until the session is reset
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub power_up: Option<PowerUp>,
    pub obstacles: Vec<Obstacle>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub mode: GameMode,
    pub score: u32,
    /// Current tick interval; the orange shortens it for a while
    pub tick_interval_ms: u64,
    pub active_power_up: Option<ActivePowerUp>,
    /// Session time at which the orange speed-up reverts
    pub speed_effect_until_ms: Option<u64>,
    pub phase: GamePhase,
    /// Simulated milliseconds accumulated from tick deltas
    pub clock_ms: u64,
    pub ticks: u64,
}

impl GameState {
    /// Create a fresh, not yet started game state
    pub fn new(
        snake: Snake,
        food: Food,
        grid_width: usize,
        grid_height: usize,
        mode: GameMode,
    ) -> Self {
        Self {
            snake,
            food,
            power_up: None,
            obstacles: Vec::new(),
            grid_width,
            grid_height,
            mode,
            score: 0,
            tick_interval_ms: mode.base_tick_interval_ms(),
            active_power_up: None,
            speed_effect_until_ms: None,
            phase: GamePhase::NotStarted,
            clock_ms: 0,
            ticks: 0,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    pub fn is_on_obstacle(&self, pos: Position) -> bool {
        self.obstacles.iter().any(|obstacle| obstacle.contains(pos))
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Whether the given power-up is currently in effect
    pub fn power_up_active(&self, kind: PowerUpKind) -> bool {
        self.active_power_up.is_some_and(|active| active.kind == kind)
    }

    /// Milliseconds left on the active power-up, if any
    pub fn power_up_remaining_ms(&self) -> Option<u64> {
        self.active_power_up
            .map(|active| active.expires_at_ms.saturating_sub(self.clock_ms))
    }
}
