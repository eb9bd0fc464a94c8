use serde::Deserialize;

fn default_api_url() -> String {
    "https://api.listenbrainz.org/1".to_string()
}

fn default_service_name() -> String {
    "Spotify".to_string()
}

fn default_service_slug() -> String {
    "spotify".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the import API. Endpoint paths are appended to it.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Name of the service playlists are imported from, used in titles and messages
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Path segment of the service in the import endpoints, as in `playlist/<slug>/import`
    #[serde(default = "default_service_slug")]
    pub service_slug: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            service_name: default_service_name(),
            service_slug: default_service_slug(),
            timeout_secs: default_timeout(),
        }
    }
}
