//! Property tests for the codec.

use bitvec::prelude::*;
use proptest::prelude::*;

use texthuff::bits::{pack, unpack};
use texthuff::{build_tree, compress, decompress, split_blob, CodeTable, Error, FrequencyTable};

/// Text over a small alphabet, so symbols repeat and trees get deep.
fn small_alphabet_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'c', 'd', ' ', 'é', '\0']), 1..300)
        .prop_map(|chars| chars.into_iter().collect())
}

fn any_text() -> impl Strategy<Value = String> {
    prop_oneof![small_alphabet_text(), "\\PC{1,200}", ".{1,200}"]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_round_trip(text in any_text()) {
        let blob = compress(&text).unwrap();
        prop_assert_eq!(decompress(&blob).unwrap(), text);
    }

    #[test]
    fn prop_deterministic(text in any_text()) {
        prop_assert_eq!(compress(&text).unwrap(), compress(&text).unwrap());
    }

    #[test]
    fn prop_prefix_free(counts in prop::collection::btree_map(any::<char>(), 1u64..1000, 1..64)) {
        let table: FrequencyTable = counts.into_iter().collect();
        let codes = CodeTable::from_tree(&build_tree(&table).unwrap());
        prop_assert_eq!(codes.len(), table.len());
        prop_assert!(codes.is_prefix_free());
    }

    #[test]
    fn prop_pack_unpack(bits in prop::collection::vec(any::<bool>(), 0..200)) {
        let bits: BitVec<u8, Msb0> = bits.into_iter().collect();
        let packed = pack(&bits);
        prop_assert!(packed.iter().all(|&b| b != 0));
        prop_assert_eq!(unpack(&packed), bits);
    }

    #[test]
    fn prop_header_counts_and_guarded_body(text in any_text()) {
        let blob = compress(&text).unwrap();
        let (table, body) = split_blob(&blob).unwrap();
        prop_assert_eq!(table, FrequencyTable::from_text(&text));
        prop_assert!(!body.contains(&0));
    }

    #[test]
    fn prop_bit_flip_is_detected_or_differs(
        text in small_alphabet_text(),
        pick in any::<prop::sample::Index>(),
        bit in 0u32..8,
    ) {
        let mut blob = compress(&text).unwrap();
        let body_start = blob.iter().position(|&b| b == 0).unwrap() + 1;
        prop_assume!(body_start < blob.len());

        let at = body_start + pick.index(blob.len() - body_start);
        blob[at] ^= 1 << bit;

        match decompress(&blob) {
            Ok(decoded) => prop_assert_ne!(decoded, text),
            Err(Error::CorruptStream { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
