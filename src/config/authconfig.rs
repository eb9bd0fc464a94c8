use serde::Deserialize;

/// Where the session token comes from. `token_command` is preferred so that the token does not
/// have to be stored in plain text.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub token: Option<String>,
    /// Shell command whose output is used as the token, e.g. `pass show listenbrainz`
    #[serde(default)]
    pub token_command: Option<String>,
}
