//! Parent-beacon tracking bookkeeping.

use crate::frame::MpduRepr;
use crate::phy::{FramePool, RawFrame, Transmitter};

use super::capabilities::Capabilities;
use super::constants::{
    beacon_interval_symbols, symbols_from_us, MAX_LOST_BEACONS, MAX_TIMER_START_RETRIES,
    NON_BEACON_ORDER, PERSISTENCE_BEACON_ORDER, RADIO_WAKEUP_SYMBOLS,
};
use super::handlers::ProtocolHandlers;
use super::state::{MacState, SyncState};
use super::timer::{TimerId, TimerService, Timeout};
use super::MacCore;

impl<H, T, X, P> MacCore<H, T, X, P>
where
    H: ProtocolHandlers,
    T: TimerService,
    X: Transmitter,
    P: FramePool,
{
    /// A beacon from the recorded parent arrived in a steady in-network
    /// state: update the beacon transmission time, deliver it per
    /// synchronisation mode and re-arm tracking. Returns the buffer when
    /// the frame is not consumed.
    pub(crate) fn track_parent_beacon(
        &mut self,
        frame: &MpduRepr,
        buffer: RawFrame,
    ) -> Option<RawFrame> {
        if let Some(timestamp) = buffer.timestamp {
            self.pib.beacon_tx_time = symbols_from_us(timestamp);
        }

        match self.state.sync {
            SyncState::TrackingBeacon | SyncState::BeforeAssoc => {
                self.state.broadcast_pending = frame.frame_control.frame_pending;
                self.handlers.beacon_frame(frame, buffer);

                self.restart_beacon_tracking();
                self.start_missed_beacon_timer();

                // A device that is neither scanning nor polling sleeps
                // through the inactive period, unless the beacon announced
                // broadcast data it has to stay awake for.
                if self.state.mac != MacState::Coordinator
                    && self.state.is_quiet()
                    && !self.state.broadcast_pending
                {
                    self.handlers.sleep_transition();
                }
                None
            }
            SyncState::Once => {
                self.handlers.beacon_frame(frame, buffer);
                // One-shot synchronisation is done after this beacon.
                self.state.sync = SyncState::Never;
                None
            }
            SyncState::Never => Some(buffer),
        }
    }

    /// Beacon order the tracking timers run on: the network's own order in
    /// a beacon-enabled network, the persistence order otherwise.
    fn tracked_beacon_order(&self) -> u8 {
        if self.caps.contains(Capabilities::BEACON_NETWORK)
            && self.pib.beacon_order < NON_BEACON_ORDER
        {
            self.pib.beacon_order
        } else {
            PERSISTENCE_BEACON_ORDER
        }
    }

    /// Re-arm the tracking timer at the predicted next beacon, minus the
    /// lead the radio needs to wake up. A refused start is retried at the
    /// following beacon, a bounded number of times.
    fn restart_beacon_tracking(&mut self) {
        let interval = beacon_interval_symbols(self.tracked_beacon_order());
        let wakeup_lead = RADIO_WAKEUP_SYMBOLS << ((self.pib.beacon_order as u32 & 0x0f) + 2);

        self.timers.stop(TimerId::BeaconTracking);
        debug_assert!(!self.timers.is_running(TimerId::BeaconTracking));

        let mut next_beacon = self.pib.beacon_tx_time;
        for _ in 0..MAX_TIMER_START_RETRIES {
            next_beacon = next_beacon.wrapping_add(interval);
            let expiry = next_beacon.wrapping_sub(wakeup_lead);
            if self
                .timers
                .start(TimerId::BeaconTracking, Timeout::Absolute(expiry))
                .is_ok()
            {
                break;
            }
        }
    }

    fn start_missed_beacon_timer(&mut self) {
        let interval = beacon_interval_symbols(self.tracked_beacon_order());
        let duration = interval.saturating_mul(MAX_LOST_BEACONS);

        self.timers.stop(TimerId::MissedBeacon);
        for _ in 0..MAX_TIMER_START_RETRIES {
            if self
                .timers
                .start(TimerId::MissedBeacon, Timeout::Relative(duration))
                .is_ok()
            {
                break;
            }
        }
    }
}
