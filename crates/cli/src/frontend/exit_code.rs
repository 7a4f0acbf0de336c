use std::process::ExitCode;

/// The run completed and no file failed.
pub const EXIT_OK: i32 = 0;

/// Usage or configuration error, or a traversal error under the abort policy.
pub const EXIT_CONFIG: i32 = 1;

/// The run completed but at least one file failed.
pub const EXIT_PARTIAL: i32 = 2;

/// The run was interrupted (128 + SIGINT).
pub const EXIT_CANCELLED: i32 = 130;

/// Converts a status returned by [`run`](crate::run) into an [`ExitCode`],
/// clamping values a process cannot report.
#[must_use]
pub fn exit_code_from(status: i32) -> ExitCode {
    u8::try_from(status).map_or(ExitCode::FAILURE, ExitCode::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representable_codes_pass_through() {
        assert_eq!(exit_code_from(EXIT_OK), ExitCode::SUCCESS);
        assert_eq!(exit_code_from(EXIT_CANCELLED), ExitCode::from(130));
    }

    #[test]
    fn out_of_range_codes_become_failure() {
        assert_eq!(exit_code_from(-1), ExitCode::FAILURE);
        assert_eq!(exit_code_from(256), ExitCode::FAILURE);
    }
}
