//! Fixed 256-slot membership bitmap over byte values.
//!
//! A [`ByteSet`] stores one bit per possible `u8` in four `u64` words. Every
//! value in `0..=255` is addressable, so unlike the general bitsets there are
//! no padding bits to keep clear.
//!
//! # Layout
//! - Word index is `byte >> 6`, bit index is `byte & 63`.
//! - `words()[0]` covers `0..64`, `words()[3]` covers `192..256`.
//!
//! All operations are O(1) (or O(4) words) and total: there is no input that
//! makes any of them fail.

use std::fmt;

/// Number of `u64` words backing a [`ByteSet`].
pub const BYTESET_WORDS: usize = 4;

/// Set of byte values, used by the character-set searches.
///
/// # Examples
/// ```
/// use bytematch::ByteSet;
///
/// let mut vowels = ByteSet::empty();
/// for &b in b"aeiou" {
///     vowels.add(b);
/// }
/// assert!(vowels.contains(b'e'));
/// assert!(!vowels.contains(b'z'));
/// assert!(vowels.invert().contains(b'z'));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteSet {
    words: [u64; BYTESET_WORDS],
}

#[inline(always)]
const fn slot(byte: u8) -> (usize, u64) {
    ((byte >> 6) as usize, 1u64 << (byte & 63))
}

impl ByteSet {
    /// Creates a set with no members.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            words: [0; BYTESET_WORDS],
        }
    }

    /// Creates a set containing all 256 byte values.
    #[inline]
    pub const fn full() -> Self {
        Self {
            words: [u64::MAX; BYTESET_WORDS],
        }
    }

    /// Creates a set with every 7-bit ASCII value (`0..=127`).
    #[inline]
    pub const fn ascii() -> Self {
        Self {
            words: [u64::MAX, u64::MAX, 0, 0],
        }
    }

    /// Creates a set from raw words, using the layout described in the module docs.
    #[inline]
    pub const fn from_words(words: [u64; BYTESET_WORDS]) -> Self {
        Self { words }
    }

    /// Creates a set holding every byte of `bytes`.
    pub const fn from_bytes(bytes: &[u8]) -> Self {
        let mut set = Self::empty();
        let mut i = 0;
        while i < bytes.len() {
            set.add(bytes[i]);
            i += 1;
        }
        set
    }

    #[inline]
    pub const fn words(&self) -> &[u64; BYTESET_WORDS] {
        &self.words
    }

    /// Marks `byte` as a member.
    #[inline]
    pub const fn add(&mut self, byte: u8) {
        let (word, mask) = slot(byte);
        self.words[word] |= mask;
    }

    /// Clears `byte` from the set.
    #[inline]
    pub const fn remove(&mut self, byte: u8) {
        let (word, mask) = slot(byte);
        self.words[word] &= !mask;
    }

    #[inline(always)]
    pub const fn contains(&self, byte: u8) -> bool {
        let (word, mask) = slot(byte);
        self.words[word] & mask != 0
    }

    /// Returns the complement: every byte not in `self`.
    #[inline]
    #[must_use]
    pub const fn invert(&self) -> Self {
        Self {
            words: [
                !self.words[0],
                !self.words[1],
                !self.words[2],
                !self.words[3],
            ],
        }
    }

    #[inline]
    #[must_use]
    pub const fn union(&self, other: &Self) -> Self {
        Self {
            words: [
                self.words[0] | other.words[0],
                self.words[1] | other.words[1],
                self.words[2] | other.words[2],
                self.words[3] | other.words[3],
            ],
        }
    }

    #[inline]
    #[must_use]
    pub const fn intersection(&self, other: &Self) -> Self {
        Self {
            words: [
                self.words[0] & other.words[0],
                self.words[1] & other.words[1],
                self.words[2] & other.words[2],
                self.words[3] & other.words[3],
            ],
        }
    }

    /// Number of member bytes; never exceeds 256.
    #[inline]
    pub const fn count(&self) -> usize {
        (self.words[0].count_ones()
            + self.words[1].count_ones()
            + self.words[2].count_ones()
            + self.words[3].count_ones()) as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        (self.words[0] | self.words[1] | self.words[2] | self.words[3]) == 0
    }

    /// Iterates members in ascending byte order without allocating.
    pub fn iter(&self) -> ByteSetIter {
        ByteSetIter {
            words: self.words,
            word_idx: 0,
        }
    }
}

impl fmt::Debug for ByteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|b| b.escape_ascii().to_string()))
            .finish()
    }
}

impl From<&[u8]> for ByteSet {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl<const N: usize> From<&[u8; N]> for ByteSet {
    fn from(bytes: &[u8; N]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl FromIterator<u8> for ByteSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::empty();
        for b in iter {
            set.add(b);
        }
        set
    }
}

impl Extend<u8> for ByteSet {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        for b in iter {
            self.add(b);
        }
    }
}

/// Ascending iterator over the members of a [`ByteSet`].
///
/// Works on a copy of the words and clears each visited bit, so the cost is
/// proportional to the number of members plus four word checks.
pub struct ByteSetIter {
    words: [u64; BYTESET_WORDS],
    word_idx: usize,
}

impl Iterator for ByteSetIter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        while self.word_idx < BYTESET_WORDS {
            let word = self.words[self.word_idx];
            if word != 0 {
                let bit = word.trailing_zeros() as usize;
                self.words[self.word_idx] = word & (word - 1);
                return Some((self.word_idx * 64 + bit) as u8);
            }
            self.word_idx += 1;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining: usize = self.words[self.word_idx.min(BYTESET_WORDS)..]
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ByteSetIter {}
