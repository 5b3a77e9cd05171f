//! Scaling modes for the thread pool.
//!
//! This module defines marker types for the two scaling policies a pool can
//! run under. The policy is chosen at build time through the typed-state
//! builder and cannot change while the pool is running.

/// A trait representing a thread-scaling policy.
pub trait ScalingMode {
    /// Returns the name of the scaling mode.
    fn mode(&self) -> &'static str;
}

/// A scaling policy with a constant worker count.
///
/// The pool keeps exactly the initial number of workers for its entire
/// lifetime; workers never self-terminate except at pool shutdown.
pub struct FixedMode;

impl ScalingMode for FixedMode {
    fn mode(&self) -> &'static str {
        "Fixed"
    }
}

/// A scaling policy where the worker count grows under load and shrinks
/// under sustained idleness.
///
/// Growth happens at submission time when pending tasks exceed idle workers,
/// bounded above by the configured maximum. Workers beyond the initial count
/// retire after idling past the configured idle timeout; the pool never
/// shrinks below its initial count.
pub struct ElasticMode;

impl ScalingMode for ElasticMode {
    fn mode(&self) -> &'static str {
        "Elastic"
    }
}
