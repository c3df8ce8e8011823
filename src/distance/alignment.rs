//! Needleman-Wunsch global alignment score.
//!
//! Costs are signed 8-bit values, accumulated in `i64` so no realistic
//! input length can overflow the running score. The shorter input sits on
//! the inner dimension for memory, but the table is always indexed as
//! `costs[a_byte][b_byte]`, so `score(a, b)` keeps the caller's orientation
//! even when the table is asymmetric.

use std::fmt;
use std::mem::{size_of, swap};

use super::DistanceError;
use crate::scratch_memory::{ScratchAllocator, ScratchBuffer};

/// A 256 x 256 table of substitution costs, indexed `[from][to]`.
#[derive(Clone, PartialEq, Eq)]
pub struct SubstitutionMatrix {
    rows: Box<[[i8; 256]]>,
}

impl SubstitutionMatrix {
    /// Table with `cost(x, y)` at every `[x][y]`.
    pub fn from_fn(mut cost: impl FnMut(u8, u8) -> i8) -> Self {
        let mut rows = vec![[0i8; 256]; 256].into_boxed_slice();
        for (x, row) in rows.iter_mut().enumerate() {
            for (y, cell) in row.iter_mut().enumerate() {
                *cell = cost(x as u8, y as u8);
            }
        }
        Self { rows }
    }

    /// `on_match` on the diagonal, `on_mismatch` everywhere else.
    pub fn uniform(on_match: i8, on_mismatch: i8) -> Self {
        Self::from_fn(|x, y| if x == y { on_match } else { on_mismatch })
    }

    /// The table under which alignment with a gap of `-1` scores exactly
    /// minus the Levenshtein distance.
    pub fn unit_levenshtein() -> Self {
        Self::uniform(0, -1)
    }

    #[inline]
    pub fn get(&self, from: u8, to: u8) -> i8 {
        self.rows[from as usize][to as usize]
    }

    pub fn set(&mut self, from: u8, to: u8, cost: i8) {
        self.rows[from as usize][to as usize] = cost;
    }

    /// `true` when `get(x, y) == get(y, x)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..=255u8).all(|x| (x..=255u8).all(|y| self.get(x, y) == self.get(y, x)))
    }
}

impl fmt::Debug for SubstitutionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubstitutionMatrix")
            .field("symmetric", &self.is_symmetric())
            .finish_non_exhaustive()
    }
}

/// Best global alignment score of `a` against `b`.
///
/// Each cell takes the maximum of a gap from above, a gap from the left, or
/// a substitution `costs[a[i]][b[j]]` from the diagonal. With
/// [`SubstitutionMatrix::unit_levenshtein`] and `gap == -1` the result is
/// `-edit_distance(a, b, 0)`.
///
/// An empty side scores `len(other) * gap` without allocating.
///
/// # Errors
/// `AllocationFailure` if `alloc` refuses the two-row scratch block.
pub fn alignment_score<A: ScratchAllocator + ?Sized>(
    a: &[u8],
    b: &[u8],
    costs: &SubstitutionMatrix,
    gap: i8,
    alloc: &A,
) -> Result<i64, DistanceError> {
    let gap = i64::from(gap);
    if a.is_empty() || b.is_empty() {
        return Ok(a.len().max(b.len()) as i64 * gap);
    }

    let cells = 2 * (a.len().min(b.len()) + 1);
    let bytes = cells.saturating_mul(size_of::<i64>());
    let mut scratch = ScratchBuffer::<i64, A>::filled(alloc, cells, 0)
        .map_err(|_| DistanceError::AllocationFailure { bytes })?;

    let score = if a.len() <= b.len() {
        score_rows(a, b, gap, &mut scratch, |inner, outer| costs.get(inner, outer))
    } else {
        score_rows(b, a, gap, &mut scratch, |inner, outer| costs.get(outer, inner))
    };
    Ok(score)
}

/// Two-row Needleman-Wunsch with `inner` along the row. `cost` receives
/// `(inner_byte, outer_byte)` and maps it back to the caller's orientation.
fn score_rows(
    inner: &[u8],
    outer: &[u8],
    gap: i64,
    scratch: &mut [i64],
    cost: impl Fn(u8, u8) -> i8,
) -> i64 {
    let width = inner.len() + 1;
    let (prev, rest) = scratch.split_at_mut(width);
    let curr = &mut rest[..width];
    let (mut prev, mut curr) = (prev, curr);

    let mut edge = 0i64;
    for cell in prev.iter_mut() {
        *cell = edge;
        edge += gap;
    }

    let mut column = 0i64;
    for &y in outer {
        column += gap;
        curr[0] = column;
        for (j, &x) in inner.iter().enumerate() {
            let substitute = prev[j] + i64::from(cost(x, y));
            let from_above = prev[j + 1] + gap;
            let from_left = curr[j] + gap;
            curr[j + 1] = substitute.max(from_above).max(from_left);
        }
        swap(&mut prev, &mut curr);
    }
    prev[inner.len()]
}
