use crate::error::ApiError;

pub const INCENTIVES_PATH: &str = "/api/v1/incentives";

/// Two ASCII uppercase letters, e.g. `CA` or `DC`.
pub fn validate_state(state: &str) -> Result<(), ApiError> {
    if state.len() == 2 && state.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(ApiError::InvalidState(state.to_string()))
    }
}

/// Path and query for one state's incentives.
pub fn incentives_path(state: &str) -> Result<String, ApiError> {
    validate_state(state)?;
    Ok(format!("{INCENTIVES_PATH}?state={state}"))
}

/// Absolute request URL under `base`; a trailing slash on `base` is ignored.
pub fn incentives_url(base: &str, state: &str) -> Result<String, ApiError> {
    Ok(format!("{}{}", base.trim_end_matches('/'), incentives_path(state)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_state_query() {
        assert_eq!(
            incentives_url("https://api.example.org/", "CA").as_deref(),
            Ok("https://api.example.org/api/v1/incentives?state=CA")
        );
        assert_eq!(incentives_path("DC").as_deref(), Ok("/api/v1/incentives?state=DC"));
    }

    #[test]
    fn rejects_non_abbreviations() {
        assert_eq!(
            incentives_path("California"),
            Err(ApiError::InvalidState("California".to_string()))
        );
        assert!(incentives_path("ca").is_err());
        assert!(incentives_path("C&").is_err());
    }
}
