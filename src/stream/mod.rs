//! Stream utilities

mod pacer;

pub use pacer::{MIN_PERIOD, PaceExt, Paced};
