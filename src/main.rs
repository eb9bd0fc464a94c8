use clap::Parser;
use cli::Cli;
use color_eyre::{eyre::eyre, Result};
use tokio::{sync::mpsc, task::JoinSet};
use tracing::{error, info};

use crate::{
    app::App,
    config::{
        pathconfig::{PathConfig, PathType},
        Config,
    },
    playlistservice::http::HttpPlaylistService,
    queryworker::{highlevelquery::HighLevelQuery, query::ToQueryWorker, QueryWorker},
    session::Session,
};

mod action;
mod app;
mod cli;
mod compid;
mod components;
mod config;
mod errors;
mod logging;
mod notifier;
mod playlistservice;
mod queryworker;
mod session;
#[cfg(test)]
mod tests;
mod tui;

#[tokio::main]
async fn main() -> Result<()> {
    crate::errors::init()?;

    let args = Cli::parse();
    if let Some(msg) = args.is_valid() {
        return Err(eyre!(msg));
    }

    let paths = PathConfig::new(
        PathType::from_args(args.data.clone(), false),
        PathType::from_args(args.config.clone(), args.no_config),
    );
    crate::logging::init(paths.data.as_deref())?;

    let config = Config::new(&paths)?;
    let session = Session::resolve(args.token.clone(), &config.auth)?;
    let service = HttpPlaylistService::new(&config.service)?;
    info!(
        "Starting with {} at {}",
        config.service.service_name, config.service.api_url
    );

    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let mut qw = QueryWorker::new(action_tx.clone(), service);
    let query_tx = qw.get_tx();

    let mut set = JoinSet::new();
    set.spawn(async move { qw.run().await });

    let mut app = App::new(
        config,
        session,
        action_tx,
        action_rx,
        query_tx.clone(),
        args.tick_rate,
        args.frame_rate,
    );
    let res = app.run().await;

    if query_tx
        .send(ToQueryWorker::new(HighLevelQuery::Stop))
        .is_err()
    {
        error!("QueryWorker was already gone");
    }
    while let Some(joined) = set.join_next().await {
        joined??;
    }
    res
}
