//! Timer collaborator contract.

/// Timers the receive path arms or cancels.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerId {
    /// Guards the wait for a response after a poll.
    PollWait,
    /// Bounds the duration of the running scan.
    ScanDuration,
    /// Fires ahead of the next tracked beacon.
    BeaconTracking,
    /// Declares beacon loss after too many silent intervals.
    MissedBeacon,
}

/// When a timer fires, in symbol periods.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    Absolute(u32),
    Relative(u32),
}

/// The provider could not arm the timer right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerStartError;

/// External timer service. Expiry is delivered as a separate event by the
/// provider; nothing in this core blocks on a timer. Stopping a timer that
/// is not running is a no-op.
pub trait TimerService {
    fn start(&mut self, id: TimerId, timeout: Timeout) -> Result<(), TimerStartError>;
    fn stop(&mut self, id: TimerId);
    fn is_running(&self, id: TimerId) -> bool;
}
