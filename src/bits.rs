//! Self-delimiting byte packing for bit sequences.
//!
//! Every byte carries up to 7 payload bits below a single guard bit set to 1.
//! The guard is always the most significant set bit, so a short final group
//! keeps its exact length without any bit-count field.

use bitvec::prelude::*;

/// Payload bits per packed byte.
pub const GROUP_BITS: usize = 7;

/// Packs `bits` into guard-bit bytes. An empty sequence packs to no bytes.
pub fn pack(bits: &BitSlice<u8, Msb0>) -> Vec<u8> {
    bits.chunks(GROUP_BITS)
        .map(|group| {
            group
                .iter()
                .by_vals()
                .fold(1u8, |acc, bit| (acc << 1) | bit as u8)
        })
        .collect()
}

/// Inverse of [`pack`]. Each byte yields the bits below its most significant
/// set bit; `0x00` has no guard and yields nothing.
pub fn unpack(bytes: &[u8]) -> BitVec<u8, Msb0> {
    let mut out = BitVec::with_capacity(bytes.len() * GROUP_BITS);
    for byte in bytes {
        let lead = byte.leading_zeros() as usize;
        if lead < 8 {
            out.extend_from_bitslice(&byte.view_bits::<Msb0>()[lead + 1..]);
        }
    }
    out
}

/// Number of bytes [`pack`] produces for `bit_count` bits.
pub fn packed_len(bit_count: usize) -> usize {
    bit_count.div_ceil(GROUP_BITS)
}
