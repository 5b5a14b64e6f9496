//! Card state: reveal workflow, personalization, music flag.
//!
//! The card starts hidden behind an opening popup. Revealing it flips the
//! visible flag the auto-burst trigger consults and is the moment the
//! auto-launch timer starts. Music playback itself is external; the card
//! only tracks whether it should be playing.

/// Sender/recipient personalization, set from CLI flags or environment
/// variables at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Greeting {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl Greeting {
    /// Display line for the window title.
    pub fn headline(&self) -> String {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => format!("Happy New Year, {to}! From {from}"),
            (None, Some(to)) => format!("Happy New Year, {to}!"),
            (Some(from), None) => format!("Happy New Year! From {from}"),
            (None, None) => "Happy New Year!".to_string(),
        }
    }
}

/// Mutable card state shared by the event wiring.
#[derive(Debug)]
pub struct Card {
    pub greeting: Greeting,
    visible: bool,
    music_playing: bool,
}

impl Card {
    pub fn new(greeting: Greeting) -> Self {
        Self {
            greeting,
            visible: false,
            music_playing: true,
        }
    }

    /// Whether the main card has been revealed. Read-only for the
    /// auto-burst trigger.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Reveal the main card. Idempotent; returns `true` on the first call
    /// so the caller can start the launch timers exactly once.
    pub fn reveal(&mut self) -> bool {
        if self.visible {
            return false;
        }
        self.visible = true;
        true
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Toggle the music flag, returning the new state.
    pub fn toggle_music(&mut self) -> bool {
        self.music_playing = !self.music_playing;
        self.music_playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_is_idempotent() {
        let mut card = Card::new(Greeting::default());
        assert!(!card.is_visible());
        assert!(card.reveal());
        assert!(card.is_visible());
        assert!(!card.reveal());
        assert!(card.is_visible());
    }

    #[test]
    fn test_music_toggle() {
        let mut card = Card::new(Greeting::default());
        assert!(card.music_playing());
        assert!(!card.toggle_music());
        assert!(card.toggle_music());
    }

    #[test]
    fn test_greeting_headlines() {
        let both = Greeting {
            from: Some("Ana".into()),
            to: Some("Iva".into()),
        };
        assert_eq!(both.headline(), "Happy New Year, Iva! From Ana");
        assert_eq!(Greeting::default().headline(), "Happy New Year!");
    }
}
