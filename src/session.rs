use std::{fmt::Debug, process::Command};

use color_eyre::{eyre::eyre, Result};
use derive_deref::Deref;
use tracing::{debug, warn};

use crate::config::authconfig::AuthConfig;

/// Credential proving the current user is authenticated against the import API.
/// The value is never printed, so the token cannot leak into the log file.
#[derive(Clone, PartialEq, Eq, Deref)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: String) -> Self {
        Self(token)
    }
}

impl Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<AuthToken>,
}

impl Session {
    pub fn new(token: Option<AuthToken>) -> Self {
        Self { token }
    }

    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Token priority:
    /// 1. Token given with --token
    /// 2. Output of `auth.token_command`
    /// 3. `auth.token`
    ///
    /// Blank values are treated as if they were not set at all.
    pub fn resolve(cli_token: Option<String>, auth: &AuthConfig) -> Result<Self> {
        if let Some(token) = cli_token.and_then(non_blank) {
            debug!("Using token from the command line");
            return Ok(Self::new(Some(AuthToken::new(token))));
        }
        if let Some(cmd) = auth.token_command.as_deref().and_then(|c| non_blank(c.to_string())) {
            let token = run_token_command(&cmd)?;
            debug!("Using token from token_command");
            return Ok(Self::new(Some(AuthToken::new(token))));
        }
        if let Some(token) = auth.token.clone().and_then(non_blank) {
            debug!("Using token from the config");
            return Ok(Self::new(Some(AuthToken::new(token))));
        }
        warn!("No token configured, starting without a session");
        Ok(Self::anonymous())
    }
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn run_token_command(cmd: &str) -> Result<String> {
    let output = Command::new("sh").arg("-c").arg(cmd).output()?;
    if !output.status.success() {
        return Err(eyre!(
            "token_command exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }
    let token = String::from_utf8(output.stdout)?;
    non_blank(token).ok_or_else(|| eyre!("token_command did not print a token"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn auth(token: Option<&str>, token_command: Option<&str>) -> AuthConfig {
        AuthConfig {
            token: token.map(String::from),
            token_command: token_command.map(String::from),
        }
    }

    #[test]
    fn cli_token_wins() {
        let s = Session::resolve(Some("cli".into()), &auth(Some("cfg"), Some("echo cmd"))).unwrap();
        assert_eq!(s.token().map(|t| t.as_str()), Some("cli"));
    }

    #[test]
    fn command_wins_over_plain_token() {
        let s = Session::resolve(None, &auth(Some("cfg"), Some("echo '  cmd  '"))).unwrap();
        assert_eq!(s.token().map(|t| t.as_str()), Some("cmd"));
    }

    #[test]
    fn plain_token_is_used_last() {
        let s = Session::resolve(Some("   ".into()), &auth(Some("cfg"), None)).unwrap();
        assert_eq!(s.token().map(|t| t.as_str()), Some("cfg"));
    }

    #[test]
    fn nothing_configured_is_anonymous() {
        let s = Session::resolve(None, &auth(None, Some(""))).unwrap();
        assert!(!s.is_authenticated());
    }

    #[test]
    fn failing_command_is_an_error() {
        assert!(Session::resolve(None, &auth(None, Some("exit 3"))).is_err());
        assert!(Session::resolve(None, &auth(None, Some("true"))).is_err());
    }

    #[test]
    fn debug_hides_token() {
        let t = AuthToken::new("secret".to_string());
        assert_eq!(format!("{t:?}"), "AuthToken(***)");
    }
}
