//! Presence state machine.
//!
//! Offline -> Online requires a location sample (live or cached); Online ->
//! Offline is unconditional. Starts Offline on every mount and is never
//! written back to the store.

use std::fmt;

/// Blocking message the host shows as an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub message: String,
}

impl Prompt {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn location_required() -> Self {
        Self::new("Location Required", "Enable location to go online")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    #[default]
    Offline,
    Online,
}

impl Presence {
    pub fn is_online(self) -> bool {
        self == Presence::Online
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Presence::Offline => "Offline",
            Presence::Online => "Online",
        }
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Changed(Presence),
    Rejected(Prompt),
}

#[derive(Debug, Default)]
pub struct PresenceMachine {
    state: Presence,
}

impl PresenceMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Presence {
        self.state
    }

    pub fn go_online(&mut self, has_location: bool) -> ToggleOutcome {
        if self.state.is_online() {
            return ToggleOutcome::Changed(self.state);
        }
        if !has_location {
            return ToggleOutcome::Rejected(Prompt::location_required());
        }
        self.state = Presence::Online;
        ToggleOutcome::Changed(self.state)
    }

    pub fn go_offline(&mut self) -> ToggleOutcome {
        self.state = Presence::Offline;
        ToggleOutcome::Changed(self.state)
    }

    /// The single status button: flips the current state.
    pub fn toggle(&mut self, has_location: bool) -> ToggleOutcome {
        match self.state {
            Presence::Offline => self.go_online(has_location),
            Presence::Online => self.go_offline(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_offline() {
        assert_eq!(PresenceMachine::new().state(), Presence::Offline);
    }

    #[test]
    fn test_go_online_without_location_rejected() {
        let mut machine = PresenceMachine::new();
        let outcome = machine.toggle(false);
        assert_eq!(outcome, ToggleOutcome::Rejected(Prompt::location_required()));
        assert_eq!(machine.state(), Presence::Offline);
    }

    #[test]
    fn test_go_online_with_location() {
        let mut machine = PresenceMachine::new();
        assert_eq!(machine.toggle(true), ToggleOutcome::Changed(Presence::Online));
        assert!(machine.state().is_online());
    }

    #[test]
    fn test_go_offline_unconditional() {
        let mut machine = PresenceMachine::new();
        machine.toggle(true);
        assert_eq!(machine.toggle(false), ToggleOutcome::Changed(Presence::Offline));
        assert_eq!(machine.toggle(true), ToggleOutcome::Changed(Presence::Online));
        assert_eq!(machine.go_offline(), ToggleOutcome::Changed(Presence::Offline));
    }
}
