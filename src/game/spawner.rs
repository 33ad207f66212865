use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::config::GameConfig;
use super::error::GameError;
use super::mode::GameMode;
use super::state::{Food, FoodKind, Obstacle, Position, PowerUp, PowerUpKind, Snake};

/// Places obstacles, food and power-ups on the grid
pub struct Spawner {
    rng: StdRng,
    grid_width: i32,
    grid_height: i32,
    power_up_chance: f64,
    max_attempts: usize,
}

impl Spawner {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic spawner, for tests and reproducible runs
    pub fn with_seed(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &GameConfig, rng: StdRng) -> Self {
        Self {
            rng,
            grid_width: config.grid_width as i32,
            grid_height: config.grid_height as i32,
            power_up_chance: config.power_up_chance,
            max_attempts: config.max_placement_attempts,
        }
    }

    /// Obstacles may overlap each other and the snake's start cell
    pub fn generate_obstacles(&mut self, mode: GameMode) -> Vec<Obstacle> {
        (0..mode.obstacle_count())
            .map(|_| {
                let origin = self.random_position();
                let width = self.rng.gen_range(1..=3);
                let height = self.rng.gen_range(1..=3);
                Obstacle::new(origin, width, height)
            })
            .collect()
    }

    pub fn generate_food(
        &mut self,
        snake: &Snake,
        obstacles: &[Obstacle],
    ) -> Result<Food, GameError> {
        let position = self.free_position("food", |pos| {
            !snake.contains(pos) && !obstacles.iter().any(|o| o.contains(pos))
        })?;
        let kind = FoodKind::ALL[self.rng.gen_range(0..FoodKind::ALL.len())];
        Ok(Food::new(position, kind))
    }

    /// Returns `Ok(None)` most of the time; a missing power-up is normal
    pub fn generate_power_up(
        &mut self,
        snake: &Snake,
        obstacles: &[Obstacle],
        food: &Food,
    ) -> Result<Option<PowerUp>, GameError> {
        if !self.rng.gen_bool(self.power_up_chance) {
            return Ok(None);
        }

        let position = self.free_position("power-up", |pos| {
            !snake.contains(pos)
                && !obstacles.iter().any(|o| o.contains(pos))
                && pos != food.position
        })?;
        let kind = PowerUpKind::ALL[self.rng.gen_range(0..PowerUpKind::ALL.len())];
        Ok(Some(PowerUp::new(position, kind)))
    }

    fn random_position(&mut self) -> Position {
        Position::new(
            self.rng.gen_range(0..self.grid_width),
            self.rng.gen_range(0..self.grid_height),
        )
    }

    /// Rejection sampling, then a full scan once the attempt budget runs out
    fn free_position(
        &mut self,
        entity: &'static str,
        is_free: impl Fn(Position) -> bool,
    ) -> Result<Position, GameError> {
        for _ in 0..self.max_attempts {
            let pos = self.random_position();
            if is_free(pos) {
                return Ok(pos);
            }
        }

        let free_cells: Vec<Position> = (0..self.grid_height)
            .flat_map(|y| (0..self.grid_width).map(move |x| Position::new(x, y)))
            .filter(|pos| is_free(*pos))
            .collect();

        free_cells
            .choose(&mut self.rng)
            .copied()
            .ok_or(GameError::GenerationExhausted { entity })
    }
}
