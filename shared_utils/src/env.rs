use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// Empty values count as missing: a blank `APCA_API_KEY_ID=` in a `.env` file
/// should fail the same way an unset variable does.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    get_env_var_opt(name).ok_or_else(|| MissingEnvVarError(name.to_string()))
}

/// Reads an optional environment variable. Unset and blank both yield `None`.
pub fn get_env_var_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VAR: &str = "SHARED_UTILS_TEST_VAR";

    #[test]
    #[serial]
    fn reads_present_variable() {
        unsafe { std::env::set_var(VAR, " value ") };
        assert_eq!(get_env_var(VAR).unwrap(), "value");
        unsafe { std::env::remove_var(VAR) };
    }

    #[test]
    #[serial]
    fn blank_variable_is_missing() {
        unsafe { std::env::set_var(VAR, "   ") };
        let err = get_env_var(VAR).unwrap_err();
        assert_eq!(err.to_string(), format!("Missing environment variable: {VAR}"));
        unsafe { std::env::remove_var(VAR) };
    }

    #[test]
    #[serial]
    fn unset_variable_is_none() {
        unsafe { std::env::remove_var(VAR) };
        assert!(get_env_var_opt(VAR).is_none());
    }
}
