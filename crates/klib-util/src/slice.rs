// SPDX-License-Identifier: MIT OR Apache-2.0

use klib_error::{Error, ErrorCode, status};
use tracing::trace;

/// Identifier of the record returned for an out-of-bounds insertion index.
pub const INDEX_OUT_OF_BOUNDS_ID: &str = "c0548791-56ff-4ab2-a996-f04b59caa089";

/// Insert `element` into `slice` at `index`.
///
/// A negative index is treated as `index + len + 1`, so `-1` appends and
/// `-(len + 1)` prepends. Any index outside `0..=len` after that adjustment
/// is rejected.
///
/// ```
/// use klib_util::insert_slice_elem;
///
/// let v = insert_slice_elem(vec!['a', 'c'], 'b', -2).unwrap();
/// assert_eq!(v, ['a', 'b', 'c']);
/// ```
///
/// # Errors
///
/// Returns an [`ErrorCode::InvalidValue`] record with status 400 when the
/// index is out of bounds.
pub fn insert_slice_elem<T>(mut slice: Vec<T>, element: T, index: isize) -> Result<Vec<T>, Error> {
    let len = slice.len();
    let adjusted = if index < 0 {
        isize::try_from(len)
            .ok()
            .and_then(|l| index.checked_add(l))
            .and_then(|i| i.checked_add(1))
    } else {
        Some(index)
    };

    let Some(position) = adjusted
        .and_then(|i| usize::try_from(i).ok())
        .filter(|i| *i <= len)
    else {
        trace!(target: "klib.util", index, len, "insert index out of bounds");
        return Err(Error::new()
            .with_id(INDEX_OUT_OF_BOUNDS_ID)
            .with_status(status::BAD_REQUEST)
            .with_code(ErrorCode::InvalidValue)
            .with_detail("Index is out of bounds."));
    };

    slice.insert(position, element);
    Ok(slice)
}
