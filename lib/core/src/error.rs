//! Error handling foundation for flowdeck.
//!
//! Library crates return their own typed error enums. Callers that cross a
//! layer boundary (the shell binary, host integrations) wrap those in a
//! rootcause `Report` through this alias.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct LoadFailed;

    impl fmt::Display for LoadFailed {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "load failed")
        }
    }

    impl std::error::Error for LoadFailed {}

    fn load(ok: bool) -> Result<u32, LoadFailed> {
        if ok {
            Ok(7)
        } else {
            Err(LoadFailed)?
        }
    }

    #[test]
    fn result_type_works() {
        assert_eq!(load(true).expect("should be ok"), 7);
    }

    #[test]
    fn typed_context_converts_into_report() {
        assert!(load(false).is_err());
    }
}
