use crate::*;

#[test]
fn parse_beacon() {
    // Beacon with two GTS descriptors, one pending short and one pending
    // extended address, and a four-octet application payload.
    let mpdu = [
        0x00, 0x80, // frame control: beacon, source short addressing
        0x2f, // sequence number
        0xcd, 0xab, // source PAN id
        0x22, 0x11, // source short address
        0xff, 0x4f, // superframe specification
        0x82, // GTS specification: two descriptors, GTS permitted
        0x05, 0x34, 0x12, // GTS directions and address list (skipped)
        0x11, // pending address specification: one short, one extended
        0x78, 0x56, // pending short address
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, // pending extended address
        0xde, 0xad, 0xbe, 0xef, // beacon payload
        0x00, 0x00, // FCS
    ];

    let frame = MpduRepr::parse(&mpdu).unwrap();

    assert_eq!(frame.frame_control.frame_type, FrameType::Beacon);
    assert_eq!(frame.sequence_number, 0x2f);
    assert_eq!(frame.addressing.dst_pan_id, None);
    assert_eq!(frame.addressing.dst_address, Address::Absent);
    assert_eq!(frame.addressing.src_pan_id, Some(0xabcd));
    assert_eq!(frame.addressing.src_address, Address::Short(0x1122));
    assert_eq!(frame.mac_payload_len, 21);

    let MacPayload::Beacon(beacon) = frame.payload else {
        unreachable!()
    };

    assert!(beacon.superframe_spec.pan_coordinator());
    assert!(!beacon.superframe_spec.association_permit());
    assert_eq!(beacon.superframe_spec.beacon_order(), 15);
    assert_eq!(beacon.superframe_spec.superframe_order(), 15);

    assert_eq!(beacon.gts_spec.descriptor_count(), 2);
    assert!(beacon.gts_spec.gts_permit());

    assert_eq!(beacon.pending_addr_spec.short_pending(), 1);
    assert_eq!(beacon.pending_addr_spec.extended_pending(), 1);
    let pending = beacon.pending_addresses.unwrap();
    assert_eq!(
        pending.of(&mpdu),
        &[0x78, 0x56, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
    );

    assert_eq!(beacon.payload.of(&mpdu), &[0xde, 0xad, 0xbe, 0xef]);
}

#[test]
fn parse_minimal_beacon() {
    let mpdu = [
        0x00, 0x80, // frame control: beacon, source short addressing
        0x01, // sequence number
        0xcd, 0xab, // source PAN id
        0x22, 0x11, // source short address
        0xff, 0xcf, // superframe specification
        0x00, // GTS specification: no descriptors
        0x00, // pending address specification: nothing pending
        0x00, 0x00, // FCS
    ];

    let frame = MpduRepr::parse(&mpdu).unwrap();
    assert_eq!(frame.mac_payload_len, 4);

    let MacPayload::Beacon(beacon) = frame.payload else {
        unreachable!()
    };

    assert!(beacon.superframe_spec.pan_coordinator());
    assert!(beacon.superframe_spec.association_permit());
    assert_eq!(beacon.gts_spec.descriptor_count(), 0);
    assert_eq!(beacon.pending_addresses, None);
    assert!(beacon.payload.is_empty());
}

#[test]
fn truncated_gts_fields_fail() {
    // The GTS specification announces seven descriptors, but the payload
    // ends right behind it.
    let mpdu = [
        0x00, 0x80, 0x01, 0xcd, 0xab, 0x22, 0x11, // header
        0xff, 0x4f, // superframe specification
        0x87, // GTS specification: seven descriptors
        0x00, 0x00, // FCS
    ];

    assert_eq!(MpduRepr::parse(&mpdu), Err(Error::UnexpectedEnd));
}
