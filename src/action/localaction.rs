use std::fmt::Display;

use serde::Deserialize;

/// Actions available on the main screen, regardless of whether the import modal is open.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub enum HomeAction {
    /// Open the import modal and fetch the remote playlists
    OpenImport,
    /// Dismiss the most recent notification
    DismissNotification,
    /// Dismiss every notification
    DismissAll,
    Suspend,
    Quit,
}

impl Display for HomeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            HomeAction::OpenImport => "Import playlists",
            HomeAction::DismissNotification => "Dismiss notification",
            HomeAction::DismissAll => "Dismiss all notifications",
            HomeAction::Suspend => "Suspend",
            HomeAction::Quit => "Quit",
        })
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub enum ImportModalAction {
    Up,
    Down,
    Top,
    Bottom,
    /// Import the highlighted playlist
    Import,
    Close,
}

impl Display for ImportModalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ImportModalAction::Up => "Move up",
            ImportModalAction::Down => "Move down",
            ImportModalAction::Top => "Move to top",
            ImportModalAction::Bottom => "Move to bottom",
            ImportModalAction::Import => "Import playlist",
            ImportModalAction::Close => "Close",
        })
    }
}
