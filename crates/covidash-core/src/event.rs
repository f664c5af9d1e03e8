use crossterm::event::KeyEvent;

/// Terminal events produced by the runtime's event loop.
///
/// Delivered through the
/// [`terminal_events`](crate::subscriptions::terminal_events) subscription,
/// which maps each event into the application's `Message` type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Bracketed paste content.
    Paste(String),
}

impl TerminalEvent {
    /// Convert a crossterm event, dropping the kinds the dashboard ignores
    /// (mouse and focus changes).
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        match event {
            crossterm::event::Event::Key(k) => Some(TerminalEvent::Key(k)),
            crossterm::event::Event::Resize(w, h) => Some(TerminalEvent::Resize(w, h)),
            crossterm::event::Event::Paste(s) => Some(TerminalEvent::Paste(s)),
            crossterm::event::Event::Mouse(_)
            | crossterm::event::Event::FocusGained
            | crossterm::event::Event::FocusLost => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{Event, KeyCode, KeyModifiers};

    #[test]
    fn key_events_pass_through() {
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            TerminalEvent::from_crossterm(Event::Key(key)),
            Some(TerminalEvent::Key(key))
        );
    }

    #[test]
    fn focus_events_are_dropped() {
        assert_eq!(TerminalEvent::from_crossterm(Event::FocusGained), None);
        assert_eq!(TerminalEvent::from_crossterm(Event::FocusLost), None);
    }
}
