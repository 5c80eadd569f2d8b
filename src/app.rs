//! Application context and event dispatch

use crate::audio::{Player, SoundTable, VoiceId};
use crate::fretboard::{Fretboard, Position};
use crate::input::InputEvent;

/// Lifecycle of the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Terminal: the loop exits after the current frame
    Stopped,
}

/// Result of a press that landed on the board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pluck {
    pub position: Position,
    /// Frequency of the sound that was started (or dropped)
    pub frequency: f64,
    /// `None` when the player had no free channel
    pub voice: Option<VoiceId>,
}

/// Everything the frame loop needs, built once at startup
pub struct App<P: Player> {
    table: SoundTable,
    board: Fretboard,
    player: P,
    state: RunState,
}

impl<P: Player> App<P> {
    pub fn new(table: SoundTable, board: Fretboard, player: P) -> Self {
        Self {
            table,
            board,
            player,
            state: RunState::Running,
        }
    }

    pub fn board(&self) -> &Fretboard {
        &self.board
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Apply one input event.
    ///
    /// Presses outside the board are ignored. Once stopped, further events
    /// are ignored too.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<Pluck> {
        if self.state == RunState::Stopped {
            return None;
        }
        match event {
            InputEvent::Quit => {
                self.state = RunState::Stopped;
                None
            }
            InputEvent::Press { x, y } => {
                let position = self.board.locate(x, y)?;
                let sound = self.table.get(position.string, position.fret)?;
                let voice = self.player.play(sound);
                Some(Pluck { position, frequency: sound.frequency(), voice })
            }
        }
    }

    /// Apply a frame's worth of events in order, returning the plucks
    pub fn handle_events(&mut self, events: &[InputEvent]) -> Vec<Pluck> {
        events.iter().filter_map(|&e| self.handle_event(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{PluckSynth, Sound};

    /// Records the frequency of every sound it is asked to play
    #[derive(Default)]
    struct RecordingPlayer {
        played: Vec<f64>,
        capacity: Option<usize>,
    }

    impl Player for RecordingPlayer {
        fn play(&mut self, sound: &Sound) -> Option<VoiceId> {
            if self.capacity.is_some_and(|c| self.played.len() >= c) {
                return None;
            }
            self.played.push(sound.frequency());
            Some(VoiceId(self.played.len() - 1))
        }
    }

    const STANDARD: [f64; 6] = [82.41, 110.00, 146.83, 196.00, 246.94, 329.63];

    fn app() -> App<RecordingPlayer> {
        // Tiny samples: only the table lookup matters here
        let table = SoundTable::build(&STANDARD, 12, &PluckSynth::new(1000, 0.01));
        App::new(table, Fretboard::new(900, 400, 6, 12), RecordingPlayer::default())
    }

    #[test]
    fn test_press_at_origin_plays_low_open_string() {
        let mut app = app();
        let pluck = app.handle_event(InputEvent::Press { x: 0.0, y: 0.0 });
        assert_eq!(
            pluck,
            Some(Pluck {
                position: Position { string: 0, fret: 0 },
                frequency: 82.41,
                voice: Some(VoiceId(0)),
            })
        );
        assert_eq!(app.player().played, [82.41]);
    }

    #[test]
    fn test_press_plays_matching_fret() {
        let mut app = app();
        // string 4 (B3), fret 5
        app.handle_event(InputEvent::Press { x: 5.0 * 69.0 + 1.0, y: 4.0 * 57.0 + 1.0 });
        let expected = 246.94 * 2f64.powf(5.0 / 12.0);
        assert_eq!(app.player().played.len(), 1);
        assert!((app.player().played[0] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_press_is_ignored() {
        let mut app = app();
        let events = [
            InputEvent::Press { x: 897.0, y: 10.0 },
            InputEvent::Press { x: 10.0, y: 342.0 },
            InputEvent::Press { x: -5.0, y: 10.0 },
        ];
        assert!(app.handle_events(&events).is_empty());
        assert!(app.player().played.is_empty());
        assert!(app.is_running());
    }

    #[test]
    fn test_quit_stops() {
        let mut app = app();
        assert_eq!(app.state, RunState::Running);
        app.handle_events(&[InputEvent::Press { x: 1.0, y: 1.0 }, InputEvent::Quit]);
        assert_eq!(app.state, RunState::Stopped);
        assert_eq!(app.player().played.len(), 1);

        // Stopped is terminal
        assert_eq!(app.handle_event(InputEvent::Press { x: 1.0, y: 1.0 }), None);
        assert_eq!(app.player().played.len(), 1);
        assert!(!app.is_running());
    }

    #[test]
    fn test_busy_player_still_reports_position() {
        let mut app = app();
        app.player.capacity = Some(0);
        let pluck = app.handle_event(InputEvent::Press { x: 70.0, y: 60.0 }).unwrap();
        assert_eq!(pluck.position, Position { string: 1, fret: 1 });
        assert!((pluck.frequency - 110.0 * 2f64.powf(1.0 / 12.0)).abs() < 1e-9);
        assert_eq!(pluck.voice, None);
    }
}
