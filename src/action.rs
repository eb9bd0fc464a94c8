pub mod localaction;

use crate::{
    components::home::modalhost::ModalID,
    notifier::Notification,
    playlistservice::types::ImportedPlaylist,
    queryworker::query::{FromQueryWorker, ToQueryWorker},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ModalAction {
    /// Hide the modal and schedule its removal
    Close,
    /// Drop the modal instance for good
    Remove(ModalID),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    ClearScreen,
    /// Request for the query worker
    ToQuery(ToQueryWorker),
    /// Reply from the query worker
    FromQuery(FromQueryWorker),
    Notify(Notification),
    Modal(ModalAction),
    /// The import modal resolved with a playlist
    PlaylistImported(ImportedPlaylist),
}
