pub mod error;
pub mod http;
pub mod types;

use std::future::Future;

use crate::{
    playlistservice::{
        error::ServiceError,
        types::{ImportedPlaylist, PlaylistID, PlaylistSummary},
    },
    session::AuthToken,
};

/// Remote capabilities the import modal relies on. Every call carries the session token.
pub trait PlaylistService: Send + Sync + 'static {
    /// Lists the playlists of the user on the remote service, in the order the service returns
    /// them.
    fn list_playlists(
        &self,
        token: &AuthToken,
    ) -> impl Future<Output = Result<Vec<PlaylistSummary>, ServiceError>> + Send;

    /// Imports a single remote playlist and returns the playlist that was created from it.
    fn import_playlist(
        &self,
        token: &AuthToken,
        id: &PlaylistID,
    ) -> impl Future<Output = Result<ImportedPlaylist, ServiceError>> + Send;
}
