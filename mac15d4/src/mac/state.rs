//! Device operating state the dispatch matrix routes on.

use super::constants::BROADCAST_PAN_ID;

/// Steady MAC sublayer super-states.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MacState {
    /// Not associated to any PAN.
    #[default]
    Idle,
    /// Associated to a coordinator as an end device.
    Associated,
    /// Started as a coordinator within an existing PAN.
    Coordinator,
    /// Started as the PAN coordinator.
    PanCoordinator,
}

/// Transient states around polling a coordinator for pending frames.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollState {
    #[default]
    Idle,
    /// Waiting for data after an explicit poll request.
    ExplicitPoll,
    /// Waiting for data after a poll implied by a pending-address match.
    ImplicitPoll,
    /// Waiting for the response to an association request.
    AwaitAssocResponse,
}

/// Progress of a channel scan.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    EnergyDetect,
    Active,
    Passive,
    Orphan,
}

/// Beacon synchronisation mode of a device with a beaconing parent.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// Not synchronising on beacons.
    #[default]
    Never,
    /// Synchronise on the next beacon, then stop.
    Once,
    /// Track every beacon of the parent.
    TrackingBeacon,
    /// Tracking beacons to synchronise before associating.
    BeforeAssoc,
}

/// The operating state the receive path routes on. The state triple is
/// owned by the request/confirm machinery and its timers; this core only
/// reads it, apart from finishing a poll and retiring a one-shot
/// synchronisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceState {
    pub mac: MacState,
    pub poll: PollState,
    pub scan: ScanState,
    pub sync: SyncState,
    /// Set while a command/response transaction is outstanding. Data and
    /// beacon requests received meanwhile are deferred, not dropped.
    pub busy: bool,
    /// PAN identifier recorded when the current scan started.
    pub scan_origin_pan_id: u16,
    /// The last tracked beacon announced pending broadcast data, so the
    /// device has to stay awake for it.
    pub broadcast_pending: bool,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            mac: MacState::default(),
            poll: PollState::default(),
            scan: ScanState::default(),
            sync: SyncState::default(),
            busy: false,
            scan_origin_pan_id: BROADCAST_PAN_ID,
            broadcast_pending: false,
        }
    }
}

impl DeviceState {
    /// True while the device is neither scanning nor polling.
    pub fn is_quiet(&self) -> bool {
        self.scan == ScanState::Idle && self.poll == PollState::Idle
    }
}
