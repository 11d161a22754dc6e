use beep::beep;
use std::error::Error;

/// the machine only exposes "tone on / tone off"; how that becomes audio is
/// the host's problem
pub trait Sound {
    fn set_tone(&mut self, on: bool) -> Result<(), Box<dyn Error>>;
}

const SIMPLEBEEP_PITCH: u16 = 2093; // C

/// square-wave beeper via the pc speaker
pub struct SimpleBeep {
    is_beeping: bool,
}

impl SimpleBeep {
    /// fails where there is no speaker to program, so the host can fall
    /// back to Mute
    pub fn new() -> Result<Self, Box<dyn Error>> {
        beep(0)?;
        Ok(SimpleBeep { is_beeping: false })
    }

    /// the pitch to program next, or None when the speaker is already in
    /// the requested state; keeps set_tone from re-programming the speaker
    /// every frame
    fn transition(&mut self, on: bool) -> Option<u16> {
        if on == self.is_beeping {
            return None;
        }
        self.is_beeping = on;
        Some(if on { SIMPLEBEEP_PITCH } else { 0 })
    }
}

impl Sound for SimpleBeep {
    fn set_tone(&mut self, on: bool) -> Result<(), Box<dyn Error>> {
        if let Some(pitch) = self.transition(on) {
            beep(pitch)?;
        }
        Ok(())
    }
}

/// silence, for machines without a speaker or tests
pub struct Mute;

impl Mute {
    pub fn new() -> Self {
        Mute {}
    }
}

impl Default for Mute {
    fn default() -> Self {
        Self::new()
    }
}

impl Sound for Mute {
    fn set_tone(&mut self, _on: bool) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_transitions() {
        let mut b = SimpleBeep { is_beeping: false };
        // tone off while already off: nothing to program
        assert_eq!(b.transition(false), None);
        assert_eq!(b.transition(true), Some(SIMPLEBEEP_PITCH));
        // holding the tone across frames doesn't re-program the speaker
        assert_eq!(b.transition(true), None);
        assert_eq!(b.transition(false), Some(0));
        assert_eq!(b.transition(false), None);
    }

    #[test]
    fn test_mute_swallows_everything() {
        let mut m = Mute::new();
        assert!(m.set_tone(true).is_ok());
        assert!(m.set_tone(false).is_ok());
    }
}
