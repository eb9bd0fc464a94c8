use crate::{compid::CompID, playlistservice::types::PlaylistID, session::AuthToken};

/// [`HighLevelQuery`] are sort of a wrapper of normal HTTP queries. These correspond more closely
/// to the actual user actions rather than HTTP request endpoints. As a result, these contain the
/// following information:
///   - The component the response should go to
///   - The endpoint that should be invoked
///   - Everything needed to handle the response, even if the requester is gone by then
#[derive(Debug, Clone, PartialEq)]
pub enum HighLevelQuery {
    /// Fetches the playlists of the user on the remote service to display them in the import
    /// modal
    ListRemotePlaylists { token: AuthToken },
    /// Imports one remote playlist
    ImportPlaylist {
        token: AuthToken,
        id: PlaylistID,
        name: String,
    },
    /// Stops the worker. This is the only query that does not have any reply.
    Stop,
}

impl HighLevelQuery {
    pub fn get_dest(&self) -> CompID {
        match self {
            HighLevelQuery::ListRemotePlaylists { .. } | HighLevelQuery::ImportPlaylist { .. } => {
                CompID::ImportModal
            }
            HighLevelQuery::Stop => CompID::None,
        }
    }
}
