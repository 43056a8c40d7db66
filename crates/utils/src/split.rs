//! Per-role separation of a unified feature frame.

use polars::prelude::*;
use statline_primitives::Role;

use crate::UtilsError;

/// Name of the role column in feature frames.
pub const ROLE_COLUMN: &str = "role";

/// A unified frame split by role.
#[derive(Debug, Clone, Default)]
pub struct RoleFrames {
    /// Rows whose role is batter.
    pub batters: DataFrame,
    /// Rows whose role is pitcher.
    pub pitchers: DataFrame,
    /// Rows with a missing or unrecognized role.
    pub unassigned: usize,
}

impl RoleFrames {
    /// Frame for one role.
    #[must_use]
    pub const fn get(&self, role: Role) -> &DataFrame {
        match role {
            Role::Batter => &self.batters,
            Role::Pitcher => &self.pitchers,
        }
    }
}

/// Split a frame into batter rows and pitcher rows.
///
/// Roles are compared case-insensitively. Row order within each role is
/// preserved.
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if there is no `role` column, or
/// `UtilsError::Polars` if it is not a string column.
pub fn split_by_role(df: &DataFrame) -> Result<RoleFrames, UtilsError> {
    let labels = df
        .column(ROLE_COLUMN)
        .map_err(|_| UtilsError::MissingColumn(ROLE_COLUMN.to_string()))?
        .str()?;

    let roles: Vec<Option<Role>> =
        labels.into_iter().map(|label| label.and_then(Role::parse_label)).collect();
    let mask_for = |role: Role| -> BooleanChunked {
        roles.iter().map(|r| *r == Some(role)).collect()
    };

    let batters = df.filter(&mask_for(Role::Batter))?;
    let pitchers = df.filter(&mask_for(Role::Pitcher))?;
    let unassigned = roles.iter().filter(|r| r.is_none()).count();

    Ok(RoleFrames { batters, pitchers, unassigned })
}
