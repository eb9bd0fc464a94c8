use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    compid::CompID,
    playlistservice::types::{ImportedPlaylist, PlaylistID, PlaylistSummary},
    queryworker::highlevelquery::HighLevelQuery,
};

static COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Returns a unique ticket number. Every request sent to the query worker carries one, and the
/// reply carries the same number back.
pub fn get_ticket() -> usize {
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToQueryWorker {
    pub dest: CompID,
    pub ticket: usize,
    pub query: HighLevelQuery,
}

impl ToQueryWorker {
    pub fn new(query: HighLevelQuery) -> Self {
        Self {
            dest: query.get_dest(),
            ticket: get_ticket(),
            query,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseType {
    ListRemotePlaylists(Result<Vec<PlaylistSummary>, String>),
    ImportPlaylist {
        id: PlaylistID,
        name: String,
        res: Result<ImportedPlaylist, String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FromQueryWorker {
    pub dest: CompID,
    pub ticket: usize,
    pub res: ResponseType,
}

impl FromQueryWorker {
    pub fn new(dest: CompID, ticket: usize, res: ResponseType) -> Self {
        Self { dest, ticket, res }
    }
}
