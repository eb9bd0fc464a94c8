pub mod highlevelquery;
pub mod query;

use std::sync::Arc;

use color_eyre::Result;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::{
    action::Action,
    playlistservice::PlaylistService,
    queryworker::{
        highlevelquery::HighLevelQuery,
        query::{FromQueryWorker, ResponseType, ToQueryWorker},
    },
    trace_dbg,
};

/// Runs every remote call off the UI loop. Each query gets its own task, so a slow import does
/// not hold up the others; replies go back through the action channel.
pub struct QueryWorker<S: PlaylistService> {
    service: Arc<S>,
    req_tx: UnboundedSender<ToQueryWorker>,
    req_rx: UnboundedReceiver<ToQueryWorker>,
    action_tx: UnboundedSender<Action>,
}

impl<S: PlaylistService> QueryWorker<S> {
    pub fn new(action_tx: UnboundedSender<Action>, service: S) -> Self {
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        Self {
            service: Arc::new(service),
            req_tx,
            req_rx,
            action_tx,
        }
    }

    pub fn get_tx(&self) -> UnboundedSender<ToQueryWorker> {
        self.req_tx.clone()
    }

    #[cfg(test)]
    pub fn service(&self) -> Arc<S> {
        self.service.clone()
    }

    fn spawn_reply<F>(&self, request: &ToQueryWorker, fut: F)
    where
        F: std::future::Future<Output = ResponseType> + Send + 'static,
    {
        let tx = self.action_tx.clone();
        let dest = request.dest.clone();
        let ticket = request.ticket;
        tokio::spawn(async move {
            let res = fut.await;
            if tx
                .send(Action::FromQuery(FromQueryWorker::new(dest, ticket, res)))
                .is_err()
            {
                warn!("Reply to ticket {ticket} dropped, action channel is closed");
            }
        });
    }

    pub async fn run(&mut self) -> Result<()> {
        trace_dbg!("Starting QueryWorker...");
        while let Some(request) = self.req_rx.recv().await {
            debug!("Query #{}: {:?}", request.ticket, request.query);
            match &request.query {
                HighLevelQuery::ListRemotePlaylists { token } => {
                    let service = self.service.clone();
                    let token = token.clone();
                    self.spawn_reply(&request, async move {
                        ResponseType::ListRemotePlaylists(
                            service
                                .list_playlists(&token)
                                .await
                                .map_err(|e| e.to_string()),
                        )
                    });
                }
                HighLevelQuery::ImportPlaylist { token, id, name } => {
                    let service = self.service.clone();
                    let (token, id, name) = (token.clone(), id.clone(), name.clone());
                    self.spawn_reply(&request, async move {
                        let res = service
                            .import_playlist(&token, &id)
                            .await
                            .map_err(|e| e.to_string());
                        ResponseType::ImportPlaylist { id, name, res }
                    });
                }
                HighLevelQuery::Stop => break,
            }
        }
        info!("QueryWorker stopped");
        Ok(())
    }
}
