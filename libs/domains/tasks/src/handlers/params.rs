use crate::error::{INVALID_ID, TaskError, TaskResult};

/// Parse a path id. Anything that is not a whole `i32` is rejected, so
/// "12.5" never turns into 12.
pub fn parse_id(raw: &str) -> TaskResult<i32> {
    raw.parse::<i32>()
        .map_err(|_| TaskError::validation(INVALID_ID))
}

/// [`parse_id`] behind an explicit guard against `.` and `,` in the raw
/// segment. Used by the completion route.
pub fn parse_strict_id(raw: &str) -> TaskResult<i32> {
    if raw.contains(['.', ',']) {
        return Err(TaskError::validation(INVALID_ID));
    }
    parse_id(raw)
}
