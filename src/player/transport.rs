//! Audio transport clock

/// Event emitted by the transport while advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportEvent {
    /// Playback reached the end of the clip. Fires once per play-through.
    Ended,
}

/// Models the audio element's clock: a position that advances monotonically
/// while playing, freezes while paused, and clamps at the clip duration.
///
/// The transport does not decode or output audio; the real clip lives at the
/// asset boundary and this clock mirrors its playback position.
#[derive(Debug, Clone)]
pub struct AudioTransport {
    duration: f64,
    position: f64,
    playing: bool,
    ended: bool,
}

impl AudioTransport {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            position: 0.0,
            playing: false,
            ended: false,
        }
    }

    /// Current playback position in seconds.
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Seek back to 0 and re-arm the end-of-clip event.
    pub fn rewind(&mut self) {
        self.position = 0.0;
        self.ended = false;
    }

    /// Advance the clock by `dt` seconds. Returns `Ended` exactly once when
    /// the position reaches the clip duration while playing.
    pub fn advance(&mut self, dt: f64) -> Option<TransportEvent> {
        if !self.playing {
            return None;
        }

        self.position = (self.position + dt).min(self.duration);

        if self.position >= self.duration && !self.ended {
            self.ended = true;
            self.playing = false;
            return Some(TransportEvent::Ended);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frozen_while_paused() {
        let mut t = AudioTransport::new(2.0);
        assert_eq!(t.advance(0.5), None);
        assert_eq!(t.position(), 0.0);

        t.play();
        t.advance(0.5);
        assert_eq!(t.position(), 0.5);

        t.pause();
        t.advance(0.5);
        assert_eq!(t.position(), 0.5);
    }

    #[test]
    fn test_ended_fires_once() {
        let mut t = AudioTransport::new(1.0);
        t.play();
        assert_eq!(t.advance(0.6), None);
        assert_eq!(t.advance(0.6), Some(TransportEvent::Ended));
        assert!(!t.is_playing());
        assert_eq!(t.position(), 1.0);

        // Clock stays clamped and silent afterwards.
        t.play();
        assert_eq!(t.advance(0.6), None);
        assert_eq!(t.position(), 1.0);
    }

    #[test]
    fn test_rewind_rearms_ended() {
        let mut t = AudioTransport::new(1.0);
        t.play();
        t.advance(2.0);

        t.rewind();
        assert_eq!(t.position(), 0.0);
        t.play();
        assert_eq!(t.advance(0.5), None);
        assert_eq!(t.advance(0.6), Some(TransportEvent::Ended));
    }

    #[test]
    fn test_rewind_mid_play_restarts_from_zero() {
        let mut t = AudioTransport::new(3.0);
        t.play();
        t.advance(1.5);
        t.rewind();
        t.advance(0.1);
        assert!(t.position() <= 0.1 + f64::EPSILON);
    }
}
