use tracing::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    error::GameError,
    mode::GameMode,
    spawner::Spawner,
    state::{
        ActivePowerUp, CollisionType, FoodEffect, FoodKind, GamePhase, GameState, Position,
        PowerUpKind, Snake,
    },
};

/// Something that happened during a tick, for audio and stats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    FoodEaten(FoodKind),
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    SpeedEffectEnded,
    GameOver(CollisionType),
}

/// Result of a game step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepResult {
    /// Events in the order they happened
    pub events: Vec<StepEvent>,
    /// Type of collision if one ended the game
    pub collision: Option<CollisionType>,
}

impl StepResult {
    pub fn ate_food(&self) -> Option<FoodKind> {
        self.events.iter().find_map(|event| match event {
            StepEvent::FoodEaten(kind) => Some(*kind),
            _ => None,
        })
    }

    pub fn is_game_over(&self) -> bool {
        self.collision.is_some()
    }
}

/// The game engine that handles all game rules
pub struct GameEngine {
    config: GameConfig,
    spawner: Spawner,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let spawner = Spawner::new(&config);
        Self { config, spawner }
    }

    /// Engine whose placements are reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let spawner = Spawner::with_seed(&config, seed);
        Self { config, spawner }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh, not yet started game for the given mode
    pub fn reset(&mut self, mode: GameMode) -> Result<GameState, GameError> {
        let snake = Snake::new(
            Position::new(self.config.start_x, self.config.start_y),
            Direction::Right,
            1,
        );

        let obstacles = self.spawner.generate_obstacles(mode);
        let food = self.spawner.generate_food(&snake, &obstacles)?;
        let power_up = self.spawner.generate_power_up(&snake, &obstacles, &food)?;

        let mut state = GameState::new(
            snake,
            food,
            self.config.grid_width,
            self.config.grid_height,
            mode,
        );
        state.obstacles = obstacles;
        state.power_up = power_up;

        info!(
            mode = %mode,
            obstacles = state.obstacles.len(),
            food = state.food.kind.name(),
            power_up = ?state.power_up.map(|p| p.kind),
            "game reset"
        );
        Ok(state)
    }

    /// Advance a running game by one tick, `dt_ms` after the previous one
    pub fn step(&mut self, state: &mut GameState, dt_ms: u64) -> Result<StepResult, GameError> {
        let mut result = StepResult::default();
        if !state.is_running() {
            return Ok(result);
        }

        state.clock_ms = state.clock_ms.saturating_add(dt_ms);
        state.ticks += 1;
        self.expire_effects(state, &mut result.events);

        let direction = state.snake.direction;
        let mut new_head = state.snake.head().moved_in_direction(direction);

        if state.power_up_active(PowerUpKind::Magnet) {
            new_head = pull_towards(new_head, state.food.position);
        }

        state.snake.body.insert(0, new_head);
        state.snake.heading = direction;

        if new_head == state.food.position {
            self.eat_food(state, &mut result.events)?;
        } else {
            state.snake.body.pop();
        }

        if let Some(power_up) = state.power_up {
            if power_up.position == new_head {
                state.active_power_up = Some(ActivePowerUp {
                    kind: power_up.kind,
                    expires_at_ms: state.clock_ms + self.config.effect_duration_ms,
                });
                state.power_up = None;
                result.events.push(StepEvent::PowerUpCollected(power_up.kind));
                debug!(kind = power_up.kind.name(), "power-up collected");
            }
        }

        if let Some(collision) = self.check_collision(state, new_head) {
            state.phase = GamePhase::GameOver;
            result.collision = Some(collision);
            result.events.push(StepEvent::GameOver(collision));
            info!(
                ?collision,
                score = state.score,
                length = state.snake.len(),
                ticks = state.ticks,
                "game over"
            );
        }

        Ok(result)
    }

    /// Clear effects whose expiry has passed on the session clock
    fn expire_effects(&self, state: &mut GameState, events: &mut Vec<StepEvent>) {
        if let Some(active) = state.active_power_up {
            if active.expires_at_ms <= state.clock_ms {
                state.active_power_up = None;
                events.push(StepEvent::PowerUpExpired(active.kind));
                debug!(kind = active.kind.name(), "power-up expired");
            }
        }

        if let Some(until) = state.speed_effect_until_ms {
            if until <= state.clock_ms {
                state.speed_effect_until_ms = None;
                state.tick_interval_ms = state.mode.base_tick_interval_ms();
                events.push(StepEvent::SpeedEffectEnded);
            }
        }
    }

    fn eat_food(
        &mut self,
        state: &mut GameState,
        events: &mut Vec<StepEvent>,
    ) -> Result<(), GameError> {
        let kind = state.food.kind;
        state.score += kind.points();

        match kind.effect() {
            FoodEffect::None => {}
            FoodEffect::SpeedUp => {
                state.tick_interval_ms = state
                    .tick_interval_ms
                    .saturating_sub(self.config.orange_speedup_ms)
                    .max(self.config.min_tick_interval_ms);
                state.speed_effect_until_ms =
                    Some(state.clock_ms + self.config.effect_duration_ms);
            }
            FoodEffect::ExtraGrowth => {
                let tail = state.snake.tail();
                state.snake.body.push(tail);
            }
        }

        events.push(StepEvent::FoodEaten(kind));
        debug!(food = kind.name(), score = state.score, "food eaten");

        state.food = self.spawner.generate_food(&state.snake, &state.obstacles)?;
        state.power_up = self
            .spawner
            .generate_power_up(&state.snake, &state.obstacles, &state.food)?;
        Ok(())
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, head: Position) -> Option<CollisionType> {
        if state.power_up_active(PowerUpKind::Invincibility) {
            return None;
        }

        if !state.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        if state.is_on_obstacle(head) {
            return Some(CollisionType::Obstacle);
        }

        if state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}

/// One extra cell towards `target`, along the axis with the larger gap
fn pull_towards(head: Position, target: Position) -> Position {
    let dx = target.x - head.x;
    let dy = target.y - head.y;
    if dx.abs() > dy.abs() {
        head.moved_by(dx.signum(), 0)
    } else {
        head.moved_by(0, dy.signum())
    }
}
