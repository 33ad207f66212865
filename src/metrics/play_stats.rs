use crate::game::{FoodKind, StepEvent};

/// Counters for the current run plus a tally of finished games
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayStats {
    pub games_played: u32,
    pub power_ups_collected: u32,
    food_eaten: [u32; 4],
}

impl PlayStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the per-run counters; the game tally is kept
    pub fn on_game_start(&mut self) {
        self.power_ups_collected = 0;
        self.food_eaten = Default::default();
    }

    pub fn on_game_over(&mut self) {
        self.games_played += 1;
    }

    pub fn record(&mut self, events: &[StepEvent]) {
        for event in events {
            match event {
                StepEvent::FoodEaten(kind) => self.food_eaten[food_index(*kind)] += 1,
                StepEvent::PowerUpCollected(_) => self.power_ups_collected += 1,
                StepEvent::GameOver(_) => self.on_game_over(),
                StepEvent::PowerUpExpired(_) | StepEvent::SpeedEffectEnded => {}
            }
        }
    }

    pub fn food_eaten(&self, kind: FoodKind) -> u32 {
        self.food_eaten[food_index(kind)]
    }

    pub fn total_food_eaten(&self) -> u32 {
        self.food_eaten.iter().sum()
    }
}

fn food_index(kind: FoodKind) -> usize {
    match kind {
        FoodKind::Apple => 0,
        FoodKind::Banana => 1,
        FoodKind::Orange => 2,
        FoodKind::Mouse => 3,
    }
}

/// MM:SS for a millisecond count
pub fn format_clock(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, PowerUpKind};

    #[test]
    fn test_clock_formatting() {
        assert_eq!(format_clock(125_000), "02:05");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(999), "00:00");
        assert_eq!(format_clock(3_661_000), "61:01");
    }

    #[test]
    fn test_food_index_matches_table_order() {
        for (i, kind) in FoodKind::ALL.iter().enumerate() {
            assert_eq!(food_index(*kind), i);
        }
    }

    #[test]
    fn test_records_events() {
        let mut stats = PlayStats::new();
        stats.record(&[
            StepEvent::FoodEaten(FoodKind::Apple),
            StepEvent::FoodEaten(FoodKind::Mouse),
            StepEvent::PowerUpCollected(PowerUpKind::Magnet),
        ]);
        stats.record(&[StepEvent::FoodEaten(FoodKind::Apple)]);

        assert_eq!(stats.food_eaten(FoodKind::Apple), 2);
        assert_eq!(stats.food_eaten(FoodKind::Mouse), 1);
        assert_eq!(stats.food_eaten(FoodKind::Banana), 0);
        assert_eq!(stats.total_food_eaten(), 3);
        assert_eq!(stats.power_ups_collected, 1);
        assert_eq!(stats.games_played, 0);
    }

    #[test]
    fn test_game_start_keeps_tally() {
        let mut stats = PlayStats::new();
        stats.record(&[
            StepEvent::FoodEaten(FoodKind::Orange),
            StepEvent::GameOver(CollisionType::Wall),
        ]);
        assert_eq!(stats.games_played, 1);

        stats.on_game_start();
        assert_eq!(stats.total_food_eaten(), 0);
        assert_eq!(stats.games_played, 1);
    }
}
