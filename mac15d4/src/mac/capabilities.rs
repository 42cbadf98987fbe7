//! Runtime capability set replacing build-time protocol selection.

use bitflags::bitflags;

bitflags! {
    /// The protocol paths this device services. The dispatch matrix
    /// consults these at each decision point, so its shape stays the same
    /// across configurations; a cleared flag only downgrades the affected
    /// leaves.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u16 {
        /// Run energy-detect, active, passive and orphan scans.
        const SCAN = 1 << 0;
        /// Answer association requests (coordinator side).
        const ASSOCIATION_RESPONDER = 1 << 1;
        /// Issue association requests and poll for the response
        /// (device side).
        const ASSOCIATION_INITIATOR = 1 << 2;
        /// Handle disassociation notifications.
        const DISASSOCIATION = 1 << 3;
        /// Poll a coordinator for indirect data (device side).
        const POLLING = 1 << 4;
        /// Queue indirect transactions and serve data requests
        /// (coordinator side).
        const INDIRECT_DATA = 1 << 5;
        /// Start a PAN and answer beacon requests.
        const COORDINATOR = 1 << 6;
        /// Track parent beacons for synchronisation.
        const BEACON_SYNC = 1 << 7;
        /// Handle coordinator realignment and sync-loss signalling.
        const REALIGNMENT = 1 << 8;
        /// Answer orphan notifications.
        const ORPHAN_RESPONDER = 1 << 9;
        /// Detect PAN-Id conflicts as the PAN coordinator.
        const PAN_ID_CONFLICT_PC = 1 << 10;
        /// Detect PAN-Id conflicts as an associated device.
        const PAN_ID_CONFLICT_DEVICE = 1 << 11;
        /// The network is beacon-enabled; slotted CSMA-CA applies.
        const BEACON_NETWORK = 1 << 12;
        /// Frames with the security-enabled bit can be unsecured.
        const SECURITY = 1 << 13;
    }
}

impl Default for Capabilities {
    /// Everything a full-function device does, without security.
    fn default() -> Self {
        Self::all().difference(Self::SECURITY)
    }
}
