//! Set algebra laws for `ByteSet`, checked against `BTreeSet<u8>`.

use std::collections::BTreeSet;

use bytematch::ByteSet;
use proptest::prelude::*;

fn model(set: &ByteSet) -> BTreeSet<u8> {
    (0..=255u8).filter(|&b| set.contains(b)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(250))]

    #[test]
    fn matches_btreeset_model(
        xs in prop::collection::vec(any::<u8>(), 0..64),
        ys in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let a: ByteSet = xs.iter().copied().collect();
        let b: ByteSet = ys.iter().copied().collect();
        let ma: BTreeSet<u8> = xs.iter().copied().collect();
        let mb: BTreeSet<u8> = ys.iter().copied().collect();

        prop_assert_eq!(model(&a), ma.clone());
        prop_assert_eq!(a.count(), ma.len());
        prop_assert_eq!(model(&a.union(&b)), &ma | &mb);
        prop_assert_eq!(model(&a.intersection(&b)), &ma & &mb);
        prop_assert_eq!(a.iter().collect::<BTreeSet<u8>>(), ma);
    }

    #[test]
    fn invert_is_an_involution_and_complement(xs in prop::collection::vec(any::<u8>(), 0..300)) {
        let a: ByteSet = xs.iter().copied().collect();
        prop_assert_eq!(a.invert().invert(), a);
        prop_assert!(a.union(&a.invert()) == ByteSet::full());
        prop_assert!(a.intersection(&a.invert()).is_empty());
        prop_assert_eq!(a.count() + a.invert().count(), 256);
    }
}
