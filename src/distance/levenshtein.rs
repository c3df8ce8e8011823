//! Levenshtein edit distance over bytes or decoded runes.
//!
//! # Plan
//! 1. Put the shorter input on the inner dimension and strip the common
//!    prefix and suffix.
//! 2. Resolve degenerate shapes without allocating: an empty side, or a
//!    length gap that already reaches `bound`.
//! 3. Otherwise take one scratch block and run either
//!    - three rolling anti-diagonals, when unbounded and both sides have
//!      equal length, or
//!    - two rolling Wagner-Fischer rows with a per-row minimum check that
//!      stops once the whole row has reached `bound`.
//!
//! Both kernels are generic over the compared unit so the byte and rune
//! variants share them.

use std::mem::{size_of, swap};

use super::utf8::{export_units, Units};
use super::DistanceError;
use crate::scratch_memory::{ScratchAllocator, ScratchBuffer};

#[inline]
fn clamp_to_bound(distance: usize, bound: usize) -> usize {
    if bound == 0 {
        distance
    } else {
        distance.min(bound)
    }
}

/// What is left to compute after trimming.
enum Shape<'x, T> {
    Done(usize),
    Diagonals { a: &'x [T], b: &'x [T] },
    Rows { short: &'x [T], long: &'x [T], bound: usize },
}

impl<'x, T: Copy + PartialEq> Shape<'x, T> {
    fn of(a: &'x [T], b: &'x [T], bound: usize) -> Self {
        let (mut short, mut long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

        let prefix = short.iter().zip(long).take_while(|(x, y)| x == y).count();
        short = &short[prefix..];
        long = &long[prefix..];
        let suffix = short
            .iter()
            .rev()
            .zip(long.iter().rev())
            .take_while(|(x, y)| x == y)
            .count();
        short = &short[..short.len() - suffix];
        long = &long[..long.len() - suffix];

        if short.is_empty() {
            return Self::Done(clamp_to_bound(long.len(), bound));
        }
        if bound != 0 && long.len() - short.len() >= bound {
            return Self::Done(bound);
        }
        if bound == 0 && short.len() == long.len() {
            return Self::Diagonals { a: short, b: long };
        }
        Self::Rows { short, long, bound }
    }

    /// `usize` cells the kernel needs.
    fn scratch_len(&self) -> usize {
        match self {
            Self::Done(_) => 0,
            Self::Diagonals { a, .. } => 3 * (a.len() + 1),
            Self::Rows { short, .. } => 2 * (short.len() + 1),
        }
    }

    fn run(self, scratch: &mut [usize]) -> usize {
        match self {
            Self::Done(distance) => distance,
            Self::Diagonals { a, b } => {
                tracing::trace!(len = a.len(), "edit distance: skewed diagonals");
                skewed_diagonals(a, b, scratch)
            }
            Self::Rows { short, long, bound } => {
                tracing::trace!(
                    short = short.len(),
                    long = long.len(),
                    bound,
                    "edit distance: rows"
                );
                wagner_fischer(short, long, bound, scratch)
            }
        }
    }
}

/// Unbounded distance between equal-length `a` and `b`, one anti-diagonal
/// at a time.
///
/// Each diagonal buffer is indexed by the absolute row `i`, so cell
/// `(i, k - i)` reads `(i - 1, j - 1)` from two diagonals back and
/// `(i - 1, j)`, `(i, j - 1)` from the previous one.
fn skewed_diagonals<T: Copy + PartialEq>(a: &[T], b: &[T], scratch: &mut [usize]) -> usize {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len();
    let (older, rest) = scratch.split_at_mut(n + 1);
    let (prev, rest) = rest.split_at_mut(n + 1);
    let curr = &mut rest[..n + 1];
    let (mut older, mut prev, mut curr) = (older, prev, curr);

    for k in 0..=2 * n {
        let lo = k.saturating_sub(n);
        let hi = k.min(n);
        for i in lo..=hi {
            let j = k - i;
            curr[i] = if i == 0 {
                j
            } else if j == 0 {
                i
            } else {
                let substitute = older[i - 1] + usize::from(a[i - 1] != b[j - 1]);
                substitute.min(prev[i - 1] + 1).min(prev[i] + 1)
            };
        }
        swap(&mut older, &mut prev);
        swap(&mut prev, &mut curr);
    }
    prev[n]
}

/// Two-row Wagner-Fischer with the shorter input along the row.
///
/// Row minima never decrease, so once a full row (column 0 included) sits
/// at or above a non-zero `bound` the answer is `bound`.
fn wagner_fischer<T: Copy + PartialEq>(
    short: &[T],
    long: &[T],
    bound: usize,
    scratch: &mut [usize],
) -> usize {
    let width = short.len() + 1;
    let (prev, rest) = scratch.split_at_mut(width);
    let curr = &mut rest[..width];
    let (mut prev, mut curr) = (prev, curr);

    for (j, cell) in prev.iter_mut().enumerate() {
        *cell = j;
    }

    for (i, y) in long.iter().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];
        for (j, x) in short.iter().enumerate() {
            let substitute = prev[j] + usize::from(x != y);
            let delete = prev[j + 1] + 1;
            let insert = curr[j] + 1;
            let cell = substitute.min(delete).min(insert);
            curr[j + 1] = cell;
            row_min = row_min.min(cell);
        }
        if bound != 0 && row_min >= bound {
            return bound;
        }
        swap(&mut prev, &mut curr);
    }
    clamp_to_bound(prev[short.len()], bound)
}

fn scratch_for<'a, A: ScratchAllocator + ?Sized>(
    alloc: &'a A,
    cells: usize,
) -> Result<ScratchBuffer<'a, usize, A>, DistanceError> {
    ScratchBuffer::filled(alloc, cells, 0).map_err(|_| DistanceError::AllocationFailure {
        bytes: cells.saturating_mul(size_of::<usize>()),
    })
}

/// Byte-wise Levenshtein distance.
///
/// `bound == 0` is unbounded; otherwise the result is
/// `min(distance, bound)` and work stops as soon as `bound` is certain.
///
/// # Errors
/// `AllocationFailure` if `alloc` refuses the scratch block. Inputs that
/// need no scratch (identical after trimming, one side empty, or a length
/// gap at least `bound`) never touch the allocator.
///
/// # Examples
/// ```
/// use bytematch::{edit_distance, SystemAllocator};
/// assert_eq!(edit_distance(b"kitten", b"sitting", 0, &SystemAllocator), Ok(3));
/// assert_eq!(edit_distance(b"kitten", b"sitting", 2, &SystemAllocator), Ok(2));
/// ```
pub fn edit_distance<A: ScratchAllocator + ?Sized>(
    a: &[u8],
    b: &[u8],
    bound: usize,
    alloc: &A,
) -> Result<usize, DistanceError> {
    let shape = Shape::of(a, b, bound);
    if let Shape::Done(distance) = shape {
        return Ok(distance);
    }
    let mut scratch = scratch_for(alloc, shape.scratch_len())?;
    Ok(shape.run(&mut scratch))
}

/// Rune-wise Levenshtein distance; the result counts runes, not bytes.
///
/// Malformed bytes are compared as single units (see
/// [`crate::distance::utf8`]). Pure-ASCII inputs take the byte path. The
/// decoded runes and the DP rows share one scratch block.
///
/// # Errors
/// `AllocationFailure` if `alloc` refuses the scratch block.
pub fn edit_distance_utf8<A: ScratchAllocator + ?Sized>(
    a: &[u8],
    b: &[u8],
    bound: usize,
    alloc: &A,
) -> Result<usize, DistanceError> {
    if a.is_ascii() && b.is_ascii() {
        return edit_distance(a, b, bound, alloc);
    }

    let runes_a = Units::new(a).count();
    let runes_b = Units::new(b).count();
    if runes_a == 0 || runes_b == 0 {
        return Ok(clamp_to_bound(runes_a.max(runes_b), bound));
    }

    // Three rows of the shorter side cover either kernel.
    let cells = runes_a
        .checked_add(runes_b)
        .and_then(|n| n.checked_add(3 * (runes_a.min(runes_b) + 1)))
        .ok_or(DistanceError::AllocationFailure { bytes: usize::MAX })?;
    let mut scratch = scratch_for(alloc, cells)?;

    let (units_a, rest) = scratch.split_at_mut(runes_a);
    let (units_b, rows) = rest.split_at_mut(runes_b);
    export_units(a, units_a);
    export_units(b, units_b);

    Ok(Shape::of(&*units_a, &*units_b, bound).run(rows))
}
