// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use ndarray::prelude::*;
use ndarray::{RemoveAxis, Zip};

use thiserror::Error;

use crate::perm::Permutation;

/// Errors from row reordering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrambleError {
    /// The permutation does not cover the input's rows.
    #[error("input has {rows} rows but permutation covers {perm}")]
    RowCountMismatch {
        /// Rows in the input array.
        rows: usize,
        /// Rows covered by the permutation.
        perm: usize,
    },
}

/// Scrambles rows: source row `i` moves to row `perm.forward()[i]`.
///
/// The input can be multidimensional; rows are `Axis(0)`. Columns and
/// everything below them move with their row, untouched. The input view
/// is never modified; output is freshly allocated with the same shape.
///
/// # Errors
///
/// [`ScrambleError::RowCountMismatch`] if the permutation length differs
/// from the input's row count. Nothing is allocated in that case.
pub fn scramble_rows<A, D>(
    arr: ArrayView<'_, A, D>,
    perm: &Permutation,
) -> Result<Array<A, D>, ScrambleError>
where
    A: Clone + Send + Sync,
    D: Dimension + RemoveAxis,
{
    // Scatter out[forward[i]] = in[i], run as a gather through the
    // inverse table so each output row has exactly one writer.
    gather_rows(arr, perm, perm.inverse())
}

/// Unscrambles rows: row `i` is recovered from row `perm.forward()[i]`.
///
/// Exact inverse of [`scramble_rows`] under the same permutation; the
/// round trip is pixel-for-pixel identical.
///
/// # Errors
///
/// Same as [`scramble_rows`].
pub fn unscramble_rows<A, D>(
    arr: ArrayView<'_, A, D>,
    perm: &Permutation,
) -> Result<Array<A, D>, ScrambleError>
where
    A: Clone + Send + Sync,
    D: Dimension + RemoveAxis,
{
    gather_rows(arr, perm, perm.forward())
}

fn gather_rows<A, D>(
    arr: ArrayView<'_, A, D>,
    perm: &Permutation,
    source: &[usize],
) -> Result<Array<A, D>, ScrambleError>
where
    A: Clone + Send + Sync,
    D: Dimension + RemoveAxis,
{
    let rows = arr.len_of(Axis(0));
    if perm.len() != rows {
        return Err(ScrambleError::RowCountMismatch {
            rows,
            perm: perm.len(),
        });
    }

    let mut out = arr.to_owned();
    Zip::from(out.axis_iter_mut(Axis(0)))
        .and(ArrayView1::from(source))
        .par_for_each(|mut dest, &src| dest.assign(&arr.index_axis(Axis(0), src)));

    Ok(out)
}
