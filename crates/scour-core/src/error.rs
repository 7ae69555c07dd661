use thiserror::Error as ThisError;

///
/// Error
///
/// Caller contract violations only. Malformed or unauthorized *user* input
/// never surfaces here — unrecognized keys, unknown attributes, and empty
/// groups are dropped silently (with debug-level diagnostics) so a query
/// can never be steered onto disallowed columns by bad input.
///

#[derive(Debug, ThisError)]
pub enum Error {
    /// The `_groups` control key must carry a sequence of group objects.
    #[error("`_groups` must be a sequence of group objects")]
    InvalidGroups,
}
