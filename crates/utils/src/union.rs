//! Schema-aligning vertical union.

use polars::prelude::*;

use crate::UtilsError;

/// Vertically stack frames whose column sets may differ.
///
/// The output schema is the union of the input columns in first-seen order.
/// A column missing from a frame is added as a typed null column, never as
/// zeros, so "not applicable" stays distinguishable from a measured zero.
/// A column present in several frames takes the dtype of its first
/// occurrence; later occurrences are cast to it.
///
/// # Arguments
/// * `frames` - Frames to stack, in output order
///
/// # Returns
/// The stacked frame, or an empty frame when `frames` is empty.
///
/// # Errors
/// Returns `UtilsError::Polars` if a column cannot be cast to the shared dtype.
pub fn align_and_union(frames: &[DataFrame]) -> Result<DataFrame, UtilsError> {
    let mut schema: Vec<(PlSmallStr, DataType)> = Vec::new();
    for frame in frames {
        for column in frame.get_columns() {
            if !schema.iter().any(|(name, _)| name == column.name()) {
                schema.push((column.name().clone(), column.dtype().clone()));
            }
        }
    }

    let mut stacked: Option<DataFrame> = None;
    for frame in frames {
        let height = frame.height();
        let columns = schema
            .iter()
            .map(|(name, dtype)| match frame.column(name) {
                Ok(column) if column.dtype() == dtype => Ok(column.clone()),
                Ok(column) => column.cast(dtype),
                Err(_) => Ok(Column::full_null(name.clone(), height, dtype)),
            })
            .collect::<PolarsResult<Vec<Column>>>()?;
        let aligned = DataFrame::new(columns)?;

        stacked = Some(match stacked {
            Some(mut acc) => {
                acc.vstack_mut(&aligned)?;
                acc
            }
            None => aligned,
        });
    }

    Ok(stacked.unwrap_or_default())
}
