//! Shared-passphrase gate in front of every command.
//!
//! Keeps casual users of a shared deployment out; it is not an
//! authentication system.

use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_env_var;
use thiserror::Error;
use tracing::debug;

use crate::config::AccessConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("access gate is configured but ${var} is not set")]
    SecretNotSet { var: String },

    #[error("a passphrase is required (--passphrase or STOCK_DASHBOARD_PASSPHRASE)")]
    PassphraseRequired,

    #[error("wrong passphrase")]
    Denied,
}

/// Lets the call through when no gate is configured or `supplied` matches.
pub fn check(cfg: &AccessConfig, supplied: Option<&SecretString>) -> Result<(), AccessError> {
    let Some(var) = cfg.passphrase_env.as_deref() else {
        return Ok(());
    };
    let expected = get_env_var(var)
        .map(SecretString::from)
        .map_err(|_| AccessError::SecretNotSet { var: var.to_string() })?;
    let supplied = supplied.ok_or(AccessError::PassphraseRequired)?;

    if supplied.expose_secret() == expected.expose_secret() {
        debug!("access granted");
        Ok(())
    } else {
        Err(AccessError::Denied)
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const VAR: &str = "STOCK_DASHBOARD_TEST_SECRET";

    fn gated() -> AccessConfig {
        AccessConfig {
            passphrase_env: Some(VAR.to_string()),
        }
    }

    #[test]
    fn open_when_not_configured() {
        assert_eq!(check(&AccessConfig::default(), None), Ok(()));
    }

    #[test]
    #[serial]
    fn matches_and_mismatches() {
        unsafe { std::env::set_var(VAR, "open sesame") };
        let good = SecretString::from("open sesame");
        let bad = SecretString::from("let me in");
        assert_eq!(check(&gated(), Some(&good)), Ok(()));
        assert_eq!(check(&gated(), Some(&bad)), Err(AccessError::Denied));
        assert_eq!(check(&gated(), None), Err(AccessError::PassphraseRequired));
        unsafe { std::env::remove_var(VAR) };
    }

    #[test]
    #[serial]
    fn missing_secret_refuses() {
        unsafe { std::env::remove_var(VAR) };
        let any = SecretString::from("x");
        assert_eq!(
            check(&gated(), Some(&any)),
            Err(AccessError::SecretNotSet { var: VAR.to_string() })
        );
    }
}
