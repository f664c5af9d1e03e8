//! The country selector every data widget is driven by.
//!
//! A [`Selector`] turns "the parent handed me a country" into at most one
//! fetch. Each change that matters bumps a request generation; results are
//! only applied when they carry the latest generation, so a slow response
//! for an earlier country can never overwrite a newer one.

/// The outcome of handing a new value to a [`Selector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Same value as before; nothing to do.
    Unchanged,
    /// The selector became blank. No fetch may be issued.
    Cleared,
    /// A non-blank country was selected; fetch it.
    Requested(Ticket),
}

/// Permission to fetch one country, stamped with its request generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    country: String,
}

impl Ticket {
    /// The generation to echo back with the result.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The country to fetch.
    pub fn country(&self) -> &str {
        &self.country
    }
}

/// Current selection plus the generation of the latest request.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    current: String,
    generation: u64,
}

impl Selector {
    /// A blank selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `value` means "no selection".
    pub fn is_blank(value: &str) -> bool {
        value.trim().is_empty()
    }

    /// The value last handed to [`set`](Selector::set).
    pub fn current(&self) -> &str {
        &self.current
    }

    /// The generation of the most recent change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Record a new selector value.
    pub fn set(&mut self, value: impl Into<String>) -> Change {
        let value = value.into();
        if value == self.current {
            return Change::Unchanged;
        }

        self.current = value;
        self.generation += 1;

        if Self::is_blank(&self.current) {
            Change::Cleared
        } else {
            Change::Requested(Ticket {
                generation: self.generation,
                country: self.current.clone(),
            })
        }
    }

    /// Whether a result stamped with `generation` may still be applied.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation && !Self::is_blank(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(change: Change) -> Ticket {
        match change {
            Change::Requested(ticket) => ticket,
            other => panic!("expected a request, got {other:?}"),
        }
    }

    #[test]
    fn blank_values_never_request() {
        let mut selector = Selector::new();
        assert_eq!(selector.set(""), Change::Unchanged);
        assert_eq!(selector.set("   "), Change::Cleared);
        assert_eq!(selector.set("\t\n"), Change::Cleared);
    }

    #[test]
    fn new_value_requests_once() {
        let mut selector = Selector::new();
        let t = ticket(selector.set("France"));
        assert_eq!(t.country(), "France");
        assert!(selector.is_current(t.generation()));
        assert_eq!(selector.set("France"), Change::Unchanged);
    }

    #[test]
    fn round_trip_through_blank_requests_again() {
        let mut selector = Selector::new();
        let first = ticket(selector.set("France"));
        assert_eq!(selector.set(""), Change::Cleared);
        let second = ticket(selector.set("France"));
        assert!(second.generation() > first.generation());
    }

    #[test]
    fn only_latest_generation_is_current() {
        let mut selector = Selector::new();
        let usa = ticket(selector.set("USA"));
        let canada = ticket(selector.set("Canada"));
        assert!(!selector.is_current(usa.generation()));
        assert!(selector.is_current(canada.generation()));
    }

    #[test]
    fn clearing_invalidates_in_flight_request() {
        let mut selector = Selector::new();
        let t = ticket(selector.set("Peru"));
        selector.set("");
        assert!(!selector.is_current(t.generation()));
    }
}
