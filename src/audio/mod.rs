//! Sound cues for game events
//!
//! The engine only reports [`StepEvent`]s; sinks decide what, if anything,
//! to play. Playing never feeds back into the simulation.

use std::io::Write;

use tracing::trace;

use crate::game::StepEvent;

/// The three sounds the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Eat,
    PowerUp,
    GameOver,
}

impl SoundCue {
    pub fn for_event(event: &StepEvent) -> Option<SoundCue> {
        match event {
            StepEvent::FoodEaten(_) => Some(SoundCue::Eat),
            StepEvent::PowerUpCollected(_) => Some(SoundCue::PowerUp),
            StepEvent::GameOver(_) => Some(SoundCue::GameOver),
            StepEvent::PowerUpExpired(_) | StepEvent::SpeedEffectEnded => None,
        }
    }
}

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);

    fn on_events(&mut self, events: &[StepEvent]) {
        for cue in events.iter().filter_map(SoundCue::for_event) {
            self.play(cue);
        }
    }
}

/// Plays nothing
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Rings the terminal bell for power-ups and game over.
///
/// Eating is too frequent to beep on.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) {
        if cue == SoundCue::Eat {
            return;
        }
        // a lost beep is not worth interrupting the game for
        if let Err(err) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            trace!(error = %err, "terminal bell failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, FoodKind, PowerUpKind};

    #[derive(Default)]
    struct Recorder(Vec<SoundCue>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue) {
            self.0.push(cue);
        }
    }

    #[test]
    fn test_events_map_to_cues() {
        let mut recorder = Recorder::default();
        recorder.on_events(&[
            StepEvent::PowerUpExpired(PowerUpKind::Magnet),
            StepEvent::FoodEaten(FoodKind::Mouse),
            StepEvent::PowerUpCollected(PowerUpKind::Speed),
            StepEvent::SpeedEffectEnded,
            StepEvent::GameOver(CollisionType::Wall),
        ]);

        assert_eq!(
            recorder.0,
            vec![SoundCue::Eat, SoundCue::PowerUp, SoundCue::GameOver]
        );
    }

    #[test]
    fn test_bell_skips_eat() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.on_events(&[
            StepEvent::FoodEaten(FoodKind::Apple),
            StepEvent::GameOver(CollisionType::SelfCollision),
        ]);
        assert_eq!(bell.into_inner(), b"\x07".to_vec());
    }
}
