pub mod importmodal;
pub mod modalhost;
pub mod toasts;

use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use importmodal::ImportPlaylistModal;
use modalhost::{ModalHost, ModalID};
use ratatui::{
    layout::{Constraint, Layout},
    prelude::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, List, ListItem, Paragraph, Wrap},
    Frame,
};
use toasts::Toasts;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::{
    action::{localaction::HomeAction, Action, ModalAction},
    app::delayer::Delayer,
    components::{
        lib::centered::Centered,
        traits::{
            component::Component,
            handlekeyseq::{HandleKeySeq, KeySeqResult, PassKeySeq},
            handlequery::HandleQuery,
            ontick::OnTick,
            renderable::Renderable,
        },
    },
    config::{keybindings::KeyBindings, Config},
    notifier::{ActionNotifier, Notifier},
    playlistservice::types::ImportedPlaylist,
    session::Session,
};

pub struct Home {
    action_tx: UnboundedSender<Action>,
    config: Config,
    session: Session,
    notifier: Arc<dyn Notifier>,
    host: ModalHost,
    toasts: Toasts,
    /// Most recent first
    imported: Vec<ImportedPlaylist>,
}

impl Home {
    pub fn new(
        action_tx: UnboundedSender<Action>,
        config: Config,
        session: Session,
        tick_rate: f64,
    ) -> Self {
        let notifier: Arc<dyn Notifier> = Arc::new(ActionNotifier::new(action_tx.clone()));
        let host = ModalHost::new(
            Delayer::new(action_tx.clone()),
            config.behaviour.close_delay(),
            notifier.clone(),
            config.service.service_name.clone(),
        );
        let toasts = Toasts::new(config.behaviour.notification_ticks(tick_rate));
        Self {
            action_tx,
            config,
            session,
            notifier,
            host,
            toasts,
            imported: vec![],
        }
    }

    pub fn imported(&self) -> &[ImportedPlaylist] {
        &self.imported
    }

    pub fn host(&self) -> &ModalHost {
        &self.host
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    /// Shows a fresh import modal. Its result is forwarded as [`Action::PlaylistImported`].
    fn open_import(&mut self) -> Option<Action> {
        if self.host.is_visible() {
            debug!("Import modal is already open");
            return None;
        }
        let (modal, result, action) = ImportPlaylistModal::new(
            ModalID::next(),
            self.session.clone(),
            self.notifier.clone(),
            self.config.keybindings.import_modal.clone(),
            self.config.service.service_name.clone(),
        );
        self.host.show(modal);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            if let Ok(playlist) = result.await {
                let _ = tx.send(Action::PlaylistImported(playlist));
            }
        });
        action
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let status = if self.session.is_authenticated() {
            Line::from(vec![Span::raw("Logged in").green()])
        } else {
            Line::from(vec![
                Span::raw("Not logged in").red(),
                Span::raw(". Set auth.token or auth.token_command, or start with --token.").dim(),
            ])
        };
        let title = format!("Import from {}", self.config.service.service_name);
        frame.render_widget(
            Paragraph::new(status).block(Block::bordered().title(title.bold())),
            area,
        );
    }

    fn draw_body(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().title("Imported playlists");
        if self.imported.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let hint = match self.config.keybindings.home.find_action_str(&HomeAction::OpenImport)
            {
                Some(k) => format!("Press {k} to import playlists."),
                None => "Nothing imported yet.".to_string(),
            };
            Centered::new(vec![hint]).draw(frame, inner);
            return;
        }
        let rows: Vec<ListItem> = self
            .imported
            .iter()
            .map(|p| {
                let name = p.title.clone().unwrap_or_else(|| p.identifier.clone());
                ListItem::new(Line::from(vec![
                    Span::raw(name),
                    Span::raw("  "),
                    Span::raw(p.identifier.clone()).underlined().dim(),
                ]))
            })
            .collect();
        frame.render_widget(List::new(rows).block(block), area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![];
        for help in self.get_help() {
            spans.push(Span::raw(help.keyseq).bold());
            spans.push(Span::raw(format!(" {}  ", help.desc)));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true }),
            area,
        );
    }
}

impl Renderable for Home {
    fn draw(&mut self, frame: &mut Frame, area: Rect) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);
        self.draw_header(frame, header);
        self.draw_body(frame, body);
        self.draw_footer(frame, footer);
        if self.host.is_modal_open() {
            frame
                .buffer_mut()
                .set_style(area, Style::new().fg(Color::DarkGray));
        }
        self.host.draw(frame, area);
        self.toasts.draw(frame, area);
    }
}

impl HandleKeySeq<HomeAction> for Home {
    fn pass_to_lower_comp(&mut self, keyseq: &[KeyEvent]) -> Option<KeySeqResult> {
        self.host.handle_key_seq(keyseq)
    }

    fn lower_comp_prefix(&self, keyseq: &[KeyEvent]) -> bool {
        self.host.is_key_prefix(keyseq)
    }

    fn handle_local_action(&mut self, action: HomeAction) -> KeySeqResult {
        match action {
            HomeAction::OpenImport => match self.open_import() {
                Some(action) => KeySeqResult::ActionNeeded(action),
                None => KeySeqResult::NoActionNeeded,
            },
            HomeAction::DismissNotification => {
                self.toasts.dismiss_latest();
                KeySeqResult::NoActionNeeded
            }
            HomeAction::DismissAll => {
                self.toasts.dismiss_all();
                KeySeqResult::NoActionNeeded
            }
            HomeAction::Suspend => KeySeqResult::ActionNeeded(Action::Suspend),
            HomeAction::Quit => KeySeqResult::ActionNeeded(Action::Quit),
        }
    }

    fn get_keybinds(&self) -> &KeyBindings<HomeAction> {
        &self.config.keybindings.home
    }
}

impl PassKeySeq for Home {
    fn handle_key_seq(&mut self, keyseq: &[KeyEvent]) -> Option<KeySeqResult> {
        <Self as HandleKeySeq<HomeAction>>::handle_key_seq(self, keyseq)
    }

    fn is_key_prefix(&self, keyseq: &[KeyEvent]) -> bool {
        <Self as HandleKeySeq<HomeAction>>::is_key_prefix(self, keyseq)
    }
}

impl Component for Home {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                self.host.on_tick();
                self.toasts.on_tick();
            }
            Action::Notify(notification) => self.toasts.push(notification),
            Action::FromQuery(reply) => {
                return Ok(self.host.handle_query(reply.dest, reply.ticket, reply.res));
            }
            Action::Modal(ModalAction::Close) => self.host.close(),
            Action::Modal(ModalAction::Remove(id)) => self.host.remove(id),
            Action::PlaylistImported(playlist) => {
                info!("Playlist available at {}", playlist.identifier);
                self.imported.insert(0, playlist);
                if self.config.behaviour.close_on_import {
                    self.host.close();
                }
            }
            _ => {}
        }
        Ok(None)
    }
}
