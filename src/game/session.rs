use tracing::{info, warn};

use super::{
    direction::Direction,
    engine::{GameEngine, StepResult},
    error::GameError,
    mode::GameMode,
    state::{CollisionType, GamePhase, GameState},
};
use crate::storage::{HighScore, HighScoreStore, ANONYMOUS};

/// How a finished run compares to the stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverSummary {
    pub score: u32,
    pub collision: CollisionType,
    pub previous_best: Option<u32>,
    pub is_new_high_score: bool,
}

/// Owns one game at a time and everything around it: mode selection,
/// direction requests and the high score record.
pub struct GameSession<S: HighScoreStore> {
    engine: GameEngine,
    store: S,
    state: GameState,
    mode: GameMode,
    selected_mode: GameMode,
    high_score: Option<HighScore>,
    outcome: Option<GameOverSummary>,
    /// A record was beaten and still needs a holder name
    awaiting_name: bool,
}

impl<S: HighScoreStore> GameSession<S> {
    pub fn new(mut engine: GameEngine, mode: GameMode, store: S) -> Result<Self, GameError> {
        let high_score = match store.load() {
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, "could not load high score, starting without one");
                None
            }
        };
        let state = engine.reset(mode)?;

        Ok(Self {
            engine,
            store,
            state,
            mode,
            selected_mode: mode,
            high_score,
            outcome: None,
            awaiting_name: false,
        })
    }

    /// Throw the current game away and set up a new one in the selected mode
    pub fn reset(&mut self) -> Result<(), GameError> {
        if self.awaiting_name {
            self.submit_high_score(ANONYMOUS);
        }

        self.mode = self.selected_mode;
        self.state = self.engine.reset(self.mode)?;
        self.outcome = None;
        Ok(())
    }

    /// Takes effect on the next reset
    pub fn select_mode(&mut self, mode: GameMode) {
        self.selected_mode = mode;
    }

    /// Returns whether the request was accepted.
    ///
    /// The first direction starts the run. While running, turning back onto
    /// the last move's heading is ignored.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        match self.state.phase {
            GamePhase::NotStarted => {
                self.state.snake.direction = direction;
                self.state.snake.heading = direction;
                self.state.phase = GamePhase::Running;
                info!(?direction, mode = %self.mode, "run started");
                true
            }
            GamePhase::Running => {
                if self.state.snake.heading.is_opposite(direction) {
                    return false;
                }
                self.state.snake.direction = direction;
                true
            }
            GamePhase::GameOver => false,
        }
    }

    /// Advance the game; does nothing unless a run is in progress
    pub fn tick(&mut self, dt_ms: u64) -> Result<StepResult, GameError> {
        let result = self.engine.step(&mut self.state, dt_ms)?;
        if let Some(collision) = result.collision {
            self.finish(collision);
        }
        Ok(result)
    }

    fn finish(&mut self, collision: CollisionType) {
        let score = self.state.score;
        let previous_best = self.high_score.as_ref().map(|record| record.score);
        let is_new_high_score = score > previous_best.unwrap_or(0);

        self.outcome = Some(GameOverSummary {
            score,
            collision,
            previous_best,
            is_new_high_score,
        });
        self.awaiting_name = is_new_high_score;

        if is_new_high_score {
            info!(score, ?previous_best, "new high score");
        }
    }

    /// Record the holder of a freshly beaten high score.
    ///
    /// Returns false when the last run did not beat the record. A failing
    /// store is logged; the record is still kept for this process.
    pub fn submit_high_score(&mut self, name: &str) -> bool {
        if !self.awaiting_name {
            return false;
        }
        let Some(outcome) = self.outcome else {
            return false;
        };

        let record = HighScore::new(outcome.score, name);
        self.awaiting_name = false;

        match self.store.save(&record) {
            Ok(()) => info!(score = record.score, name = %record.name, "high score saved"),
            Err(err) => warn!(error = %err, score = record.score, "failed to save high score"),
        }
        self.high_score = Some(record);
        true
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mode of the game currently on the board
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Mode the next reset will use
    pub fn selected_mode(&self) -> GameMode {
        self.selected_mode
    }

    pub fn high_score(&self) -> Option<&HighScore> {
        self.high_score.as_ref()
    }

    pub fn outcome(&self) -> Option<&GameOverSummary> {
        self.outcome.as_ref()
    }

    pub fn awaiting_high_score_name(&self) -> bool {
        self.awaiting_name
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{Food, FoodKind, Position};
    use crate::game::GameConfig;
    use crate::storage::MemoryStore;

    fn session_with(store: MemoryStore) -> GameSession<MemoryStore> {
        let engine = GameEngine::with_seed(GameConfig::default(), 5);
        GameSession::new(engine, GameMode::Classic, store).unwrap()
    }

    fn session() -> GameSession<MemoryStore> {
        session_with(MemoryStore::new())
    }

    /// Start heading up from (10, 10) and run into the top wall
    fn crash(session: &mut GameSession<MemoryStore>, score: u32) -> StepResult {
        session.state.food = Food::new(Position::new(35, 25), FoodKind::Apple);
        session.state.power_up = None;
        session.state.score = score;
        assert!(session.request_direction(Direction::Up));

        let mut last = StepResult::default();
        for _ in 0..11 {
            last = session.tick(100).unwrap();
        }
        last
    }

    #[test]
    fn test_new_session_is_not_started() {
        let session = session();
        let state = session.state();
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.snake.body, vec![Position::new(10, 10)]);
        assert_eq!(state.score, 0);
        assert_eq!(session.mode(), GameMode::Classic);
        assert!(session.high_score().is_none());
    }

    #[test]
    fn test_loads_existing_high_score() {
        let session = session_with(MemoryStore::with_record(HighScore::new(30, "ada")));
        assert_eq!(session.high_score(), Some(&HighScore::new(30, "ada")));
    }

    #[test]
    fn test_offline_store_does_not_block_play() {
        let mut session = session_with(MemoryStore::offline());
        assert!(session.high_score().is_none());

        let result = crash(&mut session, 4);
        assert!(result.is_game_over());

        assert!(session.submit_high_score("ada"));
        assert_eq!(session.high_score(), Some(&HighScore::new(4, "ada")));
        assert!(session.reset().is_ok());
    }

    #[test]
    fn test_reset_twice_is_valid_each_time() {
        let mut session = session();
        for _ in 0..2 {
            session.reset().unwrap();
            let state = session.state();
            assert_eq!(state.phase, GamePhase::NotStarted);
            assert_eq!(state.snake.len(), 1);
            assert_eq!(state.snake.head(), Position::new(10, 10));
            assert_eq!(state.score, 0);
            assert_eq!(state.clock_ms, 0);
            assert!(!state.snake.contains(state.food.position));
        }
    }

    #[test]
    fn test_tick_before_start_does_nothing() {
        let mut session = session();
        let before = session.state().clone();
        let result = session.tick(100).unwrap();
        assert!(result.events.is_empty());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_first_direction_starts_even_if_reversed() {
        let mut session = session();
        assert!(session.request_direction(Direction::Left));
        assert_eq!(session.state().phase, GamePhase::Running);
        assert_eq!(session.state().snake.direction, Direction::Left);
    }

    #[test]
    fn test_reverse_rejected_while_running() {
        let mut session = session();
        session.request_direction(Direction::Right);

        assert!(!session.request_direction(Direction::Left));
        assert_eq!(session.state().snake.direction, Direction::Right);

        // two quick turns within one tick cannot fold back either
        assert!(session.request_direction(Direction::Up));
        assert!(!session.request_direction(Direction::Left));
        assert_eq!(session.state().snake.direction, Direction::Up);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut session = session();
        crash(&mut session, 0);
        let state = session.state().clone();
        assert!(state.is_over());

        assert!(!session.request_direction(Direction::Down));
        let result = session.tick(100).unwrap();
        assert!(result.events.is_empty());
        assert_eq!(session.state(), &state);
    }

    #[test]
    fn test_new_high_score_is_saved_with_name() {
        let mut session = session_with(MemoryStore::with_record(HighScore::new(3, "old")));
        let result = crash(&mut session, 5);

        assert_eq!(result.collision, Some(CollisionType::Wall));
        let outcome = *session.outcome().unwrap();
        assert_eq!(outcome.score, 5);
        assert_eq!(outcome.previous_best, Some(3));
        assert!(outcome.is_new_high_score);
        assert!(session.awaiting_high_score_name());

        assert!(session.submit_high_score("  new  "));
        assert!(!session.awaiting_high_score_name());
        assert_eq!(session.store().record(), Some(&HighScore::new(5, "new")));
        assert_eq!(session.high_score(), Some(&HighScore::new(5, "new")));

        // only one save per record
        assert!(!session.submit_high_score("again"));
        assert_eq!(session.store().saves(), 1);
    }

    #[test]
    fn test_score_not_beating_record_is_not_saved() {
        let mut session = session_with(MemoryStore::with_record(HighScore::new(10, "old")));
        crash(&mut session, 10);

        let outcome = session.outcome().unwrap();
        assert!(!outcome.is_new_high_score);
        assert!(!session.awaiting_high_score_name());
        assert!(!session.submit_high_score("me"));
        assert_eq!(session.store().saves(), 0);
    }

    #[test]
    fn test_zero_score_never_sets_record() {
        let mut session = session();
        crash(&mut session, 0);
        assert!(!session.outcome().unwrap().is_new_high_score);
    }

    #[test]
    fn test_reset_saves_unnamed_record_as_anonymous() {
        let mut session = session();
        crash(&mut session, 2);
        assert!(session.awaiting_high_score_name());

        session.reset().unwrap();

        assert_eq!(session.store().record(), Some(&HighScore::new(2, ANONYMOUS)));
        assert!(session.outcome().is_none());
        assert!(!session.awaiting_high_score_name());
    }

    #[test]
    fn test_mode_change_applies_on_reset() {
        let mut session = session();
        session.request_direction(Direction::Down);
        session.select_mode(GameMode::Maze);

        assert_eq!(session.mode(), GameMode::Classic);
        assert!(session.state().obstacles.is_empty());

        session.reset().unwrap();
        assert_eq!(session.mode(), GameMode::Maze);
        assert_eq!(session.selected_mode(), GameMode::Maze);
        assert_eq!(session.state().obstacles.len(), 10);
        assert_eq!(session.state().tick_interval_ms, 100);
    }
}
