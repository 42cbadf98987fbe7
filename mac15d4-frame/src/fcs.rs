//! Frame Check Sequence computation.

/// The FCS field contains a 16-bit ITU-T CRC, using the x^16 + x^12 + x^5 + 1
/// polynomial. Unlike most CRCs, the initial and final values are both
/// 0x0000, instead of 0xFFFF as defined by the ITU-T CRC-16 standard. The
/// CRC is calculated over the entire frame, excluding the FCS field itself.
const CRC_16_IEEE802154: crc::Algorithm<u16> = crc::Algorithm {
    width: 16,
    poly: 0x1021,
    init: 0x0000,
    refin: true,
    refout: true,
    xorout: 0x0000,
    check: 0x2189,
    residue: 0x0000,
};

/// Compute the FCS over the MHR and MAC payload octets of a frame.
pub fn compute_fcs(content: &[u8]) -> u16 {
    crc::Crc::<u16>::new(&CRC_16_IEEE802154).checksum(content)
}

/// Check an MPDU whose last two octets carry the FCS in little-endian
/// order.
pub fn check_fcs(mpdu: &[u8]) -> bool {
    if mpdu.len() < 2 {
        return false;
    }

    let (content, fcs) = mpdu.split_at(mpdu.len() - 2);
    compute_fcs(content) == u16::from_le_bytes([fcs[0], fcs[1]])
}
