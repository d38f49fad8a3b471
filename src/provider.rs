//! Position source trait

use crate::types::PositionReport;

/// Trait for position data sources
///
/// Sources abstract over how fixes are produced (fixed position, replayed
/// backlog, missing fix). The session only ever calls [`next_report`] from a
/// single task and never inspects which source it holds.
///
/// [`next_report`]: PositionSource::next_report
pub trait PositionSource: Send {
    /// Produce the next report
    ///
    /// Each call may advance internal state, for example the position in a
    /// backlog of historical timestamps.
    fn next_report(&mut self) -> PositionReport;
}

impl<S: PositionSource + ?Sized> PositionSource for Box<S> {
    fn next_report(&mut self) -> PositionReport {
        (**self).next_report()
    }
}

impl<S: PositionSource + ?Sized> PositionSource for &mut S {
    fn next_report(&mut self) -> PositionReport {
        (**self).next_report()
    }
}
