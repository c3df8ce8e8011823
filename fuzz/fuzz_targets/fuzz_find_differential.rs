#![no_main]

use libfuzzer_sys::fuzz_target;
use memchr::memmem;

use bytematch::{find, find_byteset, rfind, rfind_byteset, ByteSet};

// Splits the input into a needle and a haystack and compares every search
// entry point against `memchr`.
//
// Byte layout:
// - Byte 0 → needle length (`byte * 2`, clamped to the remaining input), so
//   needles reach past the 256-byte shift-table limit
// - Next `needle length` bytes → needle
// - Remaining bytes → haystack
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let rest = &data[1..];
    let n_len = (data[0] as usize * 2).min(rest.len());
    let (needle, haystack) = rest.split_at(n_len);

    assert_eq!(find(haystack, needle), memmem::find(haystack, needle));
    assert_eq!(rfind(haystack, needle), memmem::rfind(haystack, needle));

    // Reuse the needle as a byte set.
    let set: ByteSet = needle.iter().copied().collect();
    assert_eq!(
        find_byteset(haystack, &set),
        haystack.iter().position(|&b| set.contains(b))
    );
    assert_eq!(
        rfind_byteset(haystack, &set),
        haystack.iter().rposition(|&b| set.contains(b))
    );
});
