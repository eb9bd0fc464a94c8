use derive_deref::Deref;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Clone, Deref)]
pub struct PlaylistID(String);

impl PlaylistID {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackCount {
    pub total: u32,
}

/// A playlist as listed by the remote service. Fields other than these are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: PlaylistID,
    pub name: String,
    #[serde(default)]
    pub tracks: Option<TrackCount>,
}

impl PlaylistSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: PlaylistID::new(id),
            name: name.into(),
            tracks: None,
        }
    }

    pub fn track_count(&self) -> Option<u32> {
        self.tracks.as_ref().map(|t| t.total)
    }
}

/// Playlist created on the host service by an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedPlaylist {
    /// Link to the new playlist
    pub identifier: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl ImportedPlaylist {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: None,
        }
    }
}

/// The import endpoint answers with either the bare playlist or a JSPF envelope.
#[derive(Deserialize)]
#[serde(untagged)]
pub(super) enum ImportResponse {
    Wrapped { playlist: ImportedPlaylist },
    Bare(ImportedPlaylist),
}

impl From<ImportResponse> for ImportedPlaylist {
    fn from(value: ImportResponse) -> Self {
        match value {
            ImportResponse::Wrapped { playlist } => playlist,
            ImportResponse::Bare(playlist) => playlist,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::from_str;

    use super::*;

    #[test]
    fn summary_ignores_unknown_fields() {
        let p: Vec<PlaylistSummary> = from_str(
            r#"[
                {"id": "p1", "name": "Road Trip", "tracks": {"href": "x", "total": 12}, "public": true},
                {"id": "p2", "name": "Chill"}
            ]"#,
        )
        .unwrap();
        assert_eq!(p[0].track_count(), Some(12));
        assert_eq!(p[1], PlaylistSummary::new("p2", "Chill"));
    }

    #[test]
    fn import_response_shapes() {
        let wrapped: ImportResponse = from_str(
            r#"{"playlist": {"identifier": "https://listenbrainz.org/playlist/99", "title": "Road Trip"}}"#,
        )
        .unwrap();
        let wrapped = ImportedPlaylist::from(wrapped);
        assert_eq!(wrapped.identifier, "https://listenbrainz.org/playlist/99");
        assert_eq!(wrapped.title.as_deref(), Some("Road Trip"));

        let bare: ImportResponse = from_str(r#"{"identifier": "/playlist/99"}"#).unwrap();
        assert_eq!(ImportedPlaylist::from(bare), ImportedPlaylist::new("/playlist/99"));
    }
}
