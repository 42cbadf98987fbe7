//! MAC sublayer constants (IEEE 802.15.4-2006, Table 85) and timing
//! helpers.

/// The PAN identifier denoting "all PANs" and unassociated devices.
pub const BROADCAST_PAN_ID: u16 = 0xffff;
/// The number of symbols forming a superframe slot when the superframe
/// order is equal to zero.
pub const BASE_SLOT_DURATION: u32 = 60;
/// The number of slots contained in any superframe.
pub const NUM_SUPERFRAME_SLOTS: u32 = 16;
/// The number of symbols forming a superframe when the superframe order is
/// equal to zero.
pub const BASE_SUPERFRAME_DURATION: u32 = BASE_SLOT_DURATION * NUM_SUPERFRAME_SLOTS;
/// The number of consecutive lost beacons that will cause the MAC sublayer
/// of a receiving device to declare a loss of synchronization.
pub const MAX_LOST_BEACONS: u32 = 4;
/// Beacon order value announcing a nonbeacon-enabled network.
pub const NON_BEACON_ORDER: u8 = 15;
/// Beacon order used for persistence timing when the network itself does
/// not beacon.
pub const PERSISTENCE_BEACON_ORDER: u8 = 15;
/// Symbol duration of the 2.4 GHz O-QPSK PHY, in microseconds.
pub const SYMBOL_DURATION_US: u32 = 16;
/// Lead time the radio needs to wake from sleep, in symbols.
pub const RADIO_WAKEUP_SYMBOLS: u32 = 32;
/// Upper bound on re-trying a timer start the provider refused.
pub const MAX_TIMER_START_RETRIES: usize = 4;
/// Frames the ingestion queue can hold.
pub const RX_QUEUE_CAPACITY: usize = 8;

/// Beacon interval of a beacon order, in symbols. The beacon order is a
/// 4-bit field.
pub const fn beacon_interval_symbols(beacon_order: u8) -> u32 {
    BASE_SUPERFRAME_DURATION << (beacon_order as u32 & 0x0f)
}

/// Convert a microsecond timestamp into symbol periods.
pub const fn symbols_from_us(us: u32) -> u32 {
    us / SYMBOL_DURATION_US
}
