//! # Output and Exit Codes
//!
//! Results go to stdout as pretty JSON (or raw CSV for reports). Failures
//! are reduced to one line for stderr plus a process exit code:
//!
//! | Class        | Exit |
//! |--------------|------|
//! | success      | 0    |
//! | internal     | 1    |
//! | bad request  | 2    |
//! | not found    | 3    |

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use upkeep_core::{ErrorClass, UpkeepError};

pub const EXIT_INTERNAL: u8 = 1;
pub const EXIT_BAD_REQUEST: u8 = 2;
pub const EXIT_NOT_FOUND: u8 = 3;

pub fn print_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    writeln!(out, "{text}")?;
    Ok(())
}

pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<UpkeepError>().map(UpkeepError::class) {
        Some(ErrorClass::BadRequest) => EXIT_BAD_REQUEST,
        Some(ErrorClass::NotFound) => EXIT_NOT_FOUND,
        Some(ErrorClass::Internal) | None => EXIT_INTERNAL,
    }
}

/// The line shown on stderr. Store faults collapse to the generic message;
/// CLI-level failures (unreadable config, output directory) keep their
/// context chain.
pub fn user_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<UpkeepError>() {
        Some(e) => e.user_message(),
        None => format!("{err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use upkeep_core::EntityKind;

    #[test]
    fn test_exit_codes_follow_error_class() {
        let bad: anyhow::Error = UpkeepError::validation("Title is required").into();
        let missing: anyhow::Error = UpkeepError::NotFound(EntityKind::WorkOrder).into();
        let storage: anyhow::Error = UpkeepError::Storage("disk full".into()).into();
        let other = anyhow::anyhow!("boom");
        assert_eq!(exit_code(&bad), EXIT_BAD_REQUEST);
        assert_eq!(exit_code(&missing), EXIT_NOT_FOUND);
        assert_eq!(exit_code(&storage), EXIT_INTERNAL);
        assert_eq!(exit_code(&other), EXIT_INTERNAL);
    }

    #[test]
    fn test_messages() {
        let bad: anyhow::Error = UpkeepError::validation("Title is required").into();
        assert_eq!(user_message(&bad), "Title is required");
        let missing: anyhow::Error = UpkeepError::NotFound(EntityKind::WorkOrder).into();
        assert_eq!(user_message(&missing), "Work order not found");
        let storage: anyhow::Error = UpkeepError::Storage("disk full".into()).into();
        assert_eq!(user_message(&storage), "An unknown error occurred");
    }

    #[test]
    fn test_context_does_not_hide_class() {
        let err = Err::<(), _>(UpkeepError::NotFound(EntityKind::Property))
            .context("loading property")
            .unwrap_err();
        assert_eq!(exit_code(&err), EXIT_NOT_FOUND);
    }

    #[test]
    fn test_print_json_is_pretty() {
        let mut buf = Vec::new();
        print_json(&mut buf, &serde_json::json!({"a": 1})).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\n  \"a\": 1\n}\n");
    }
}
