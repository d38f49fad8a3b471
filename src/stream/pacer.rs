//! Paced report stream

use futures::{Stream, ready};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval};
use tokio_stream::wrappers::IntervalStream;

use crate::provider::PositionSource;
use crate::types::PositionReport;

/// Shortest period [`Paced::every`] accepts
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Extension trait to pull one report per tick from a source
pub trait PaceExt: Stream {
    /// Yield `source.next_report()` each time this stream yields
    ///
    /// The source is only called when a tick arrives, so a consumer that stops
    /// polling never advances it.
    fn pace<S>(self, source: S) -> Paced<Self, S>
    where
        Self: Sized,
        S: PositionSource,
    {
        Paced { ticks: self, source }
    }
}

impl<T: Stream> PaceExt for T {}

pin_project! {
    /// A stream of reports driven by a tick stream
    pub struct Paced<T, S> {
        #[pin]
        ticks: T,
        source: S,
    }
}

impl<S: PositionSource> Paced<IntervalStream, S> {
    /// Reports every `period`, the first one immediately
    ///
    /// Late ticks are delayed rather than bursted, so a slow collector never
    /// causes back-to-back sends. Periods shorter than [`MIN_PERIOD`] are
    /// raised to it.
    pub fn every(source: S, period: Duration) -> Self {
        let mut ticker = interval(period.max(MIN_PERIOD));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        IntervalStream::new(ticker).pace(source)
    }
}

impl<T, S> Paced<T, S> {
    /// Release the source
    pub fn into_source(self) -> S {
        self.source
    }
}

impl<T, S> Stream for Paced<T, S>
where
    T: Stream<Item = Instant>,
    S: PositionSource,
{
    type Item = PositionReport;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        match ready!(this.ticks.poll_next(cx)) {
            Some(_) => Poll::Ready(Some(this.source.next_report())),
            None => Poll::Ready(None),
        }
    }
}
