use crate::subscription::{SubscriptionId, SubscriptionSource};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::time::{Duration, Instant};

/// A repeating timer that fires at a fixed interval.
///
/// Each tick emits the current [`Instant`]. The `id` keeps several timers
/// (one per spinner) distinct when the runtime diffs subscriptions.
///
/// # Example
///
/// ```rust,ignore
/// let sub = subscribe(Every::new(Duration::from_millis(80), "table-spinner"))
///     .map(|_| Message::Tick);
/// ```
pub struct Every {
    /// The interval between ticks.
    pub interval: Duration,
    /// A string identifier used to distinguish this timer from others.
    pub id: &'static str,
}

impl Every {
    /// Create a new repeating timer with the given interval and identifier.
    pub fn new(interval: Duration, id: &'static str) -> Self {
        Self { interval, id }
    }
}

impl SubscriptionSource for Every {
    type Output = Instant;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::with_str::<Self>(self.id)
    }

    fn stream(self) -> BoxStream<'static, Instant> {
        let stream = tokio_stream::wrappers::IntervalStream::new(tokio::time::interval(
            self.interval,
        ))
        .map(|tick| tick.into_std());
        Box::pin(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_with_distinct_ids_differ() {
        let a = Every::new(Duration::from_millis(80), "table-spinner");
        let b = Every::new(Duration::from_millis(80), "chart-spinner");
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn every_emits_ticks() {
        let mut stream = Every::new(Duration::from_millis(1), "test").stream();
        assert!(stream.next().await.is_some());
        assert!(stream.next().await.is_some());
    }
}
