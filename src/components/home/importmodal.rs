use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use ratatui::{
    layout::{Constraint, Layout},
    prelude::Rect,
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph},
    Frame,
};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::{
    action::{localaction::ImportModalAction, Action, ModalAction},
    compid::CompID,
    components::{
        home::modalhost::ModalID,
        lib::{centered::Centered, popup::popup_area},
        traits::{
            handlekeyseq::{HandleKeySeq, KeySeqResult},
            handlequery::HandleQuery,
            ontick::OnTick,
            renderable::Renderable,
        },
    },
    config::keybindings::KeyBindings,
    notifier::{Notification, NotificationKey, Notifier},
    playlistservice::types::{ImportedPlaylist, PlaylistID, PlaylistSummary},
    queryworker::{
        highlevelquery::HighLevelQuery,
        query::{ResponseType, ToQueryWorker},
    },
    session::Session,
};

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Reports how an import ended. Also used for imports that finish after their modal is gone.
pub fn notify_import_outcome(
    notifier: &dyn Notifier,
    service_name: &str,
    name: &str,
    res: &Result<ImportedPlaylist, String>,
) {
    match res {
        Ok(playlist) => notifier.notify(
            Notification::success(
                NotificationKey::CreatePlaylistSuccess,
                format!("Successfully imported playlist from {service_name}"),
                format!("Imported {name}"),
            )
            .with_link(playlist.identifier.clone()),
        ),
        Err(msg) => notifier.notify(Notification::error(
            NotificationKey::SavePlaylistError,
            "Something went wrong",
            format!("We could not save your playlist: {msg}"),
        )),
    }
}

enum CompState {
    /// No token, nothing will be loaded
    Unauthenticated,
    Loading,
    Loaded {
        playlists: Vec<PlaylistSummary>,
        liststate: ListState,
    },
    Failed(String),
}

/// Lists the remote playlists of the user and imports the ones they pick.
///
/// The list is requested once, when the modal is created. Every import is tracked by the ticket
/// of its request, so several rows can be imported at the same time. A row stays pending (and
/// cannot be imported again) until its request completes.
pub struct ImportPlaylistModal {
    id: ModalID,
    session: Session,
    notifier: Arc<dyn Notifier>,
    service_name: String,
    binds: KeyBindings<ImportModalAction>,
    state: CompState,
    pending: HashSet<PlaylistID>,
    list_ticket: Option<usize>,
    /// Ticket of every import request in flight
    imports: HashMap<usize, PlaylistID>,
    resolver: Option<oneshot::Sender<ImportedPlaylist>>,
    spinner: usize,
}

impl ImportPlaylistModal {
    /// Creates the modal, along with the receiving end of its result and the query that loads the
    /// playlists. The query is only returned if the session has a token.
    pub fn new(
        id: ModalID,
        session: Session,
        notifier: Arc<dyn Notifier>,
        binds: KeyBindings<ImportModalAction>,
        service_name: String,
    ) -> (Self, oneshot::Receiver<ImportedPlaylist>, Option<Action>) {
        let (resolver, result) = oneshot::channel();
        let (state, list_ticket, action) = match session.token() {
            Some(token) => {
                let req = ToQueryWorker::new(HighLevelQuery::ListRemotePlaylists {
                    token: token.clone(),
                });
                (CompState::Loading, Some(req.ticket), Some(Action::ToQuery(req)))
            }
            None => {
                info!("Import modal opened without a session");
                (CompState::Unauthenticated, None, None)
            }
        };
        (
            Self {
                id,
                session,
                notifier,
                service_name,
                binds,
                state,
                pending: HashSet::new(),
                list_ticket,
                imports: HashMap::new(),
                resolver: Some(resolver),
                spinner: 0,
            },
            result,
            action,
        )
    }

    pub fn id(&self) -> ModalID {
        self.id
    }

    pub fn playlists(&self) -> &[PlaylistSummary] {
        match &self.state {
            CompState::Loaded { playlists, .. } => playlists,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, CompState::Loading)
    }

    pub fn load_error(&self) -> Option<&str> {
        match &self.state {
            CompState::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_pending(&self, id: &PlaylistID) -> bool {
        self.pending.contains(id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// True if the reply with this ticket was requested by this modal and is still awaited.
    pub fn owns_ticket(&self, ticket: usize) -> bool {
        self.list_ticket == Some(ticket) || self.imports.contains_key(&ticket)
    }

    fn alert_must_be_logged_in(&self) {
        self.notifier.notify(Notification::error(
            NotificationKey::AuthError,
            "Error",
            "You must be logged in for this operation",
        ));
    }

    /// Starts importing a playlist. Returns the query to send, or None if nothing should be sent.
    pub fn select_playlist(&mut self, id: PlaylistID, name: String) -> Option<Action> {
        let Some(token) = self.session.token() else {
            self.alert_must_be_logged_in();
            return None;
        };
        if self.pending.contains(&id) {
            debug!("Playlist {:?} is already being imported", id);
            return None;
        }
        info!("Importing playlist {:?} ({})", id, name);
        self.pending.insert(id.clone());
        let req = ToQueryWorker::new(HighLevelQuery::ImportPlaylist {
            token: token.clone(),
            id: id.clone(),
            name,
        });
        self.imports.insert(req.ticket, id);
        Some(Action::ToQuery(req))
    }

    fn selected(&self) -> Option<&PlaylistSummary> {
        match &self.state {
            CompState::Loaded {
                playlists,
                liststate,
            } => playlists.get(liststate.selected()?),
            _ => None,
        }
    }

    fn resolve(&mut self, playlist: ImportedPlaylist) {
        match self.resolver.take() {
            Some(tx) => {
                if tx.send(playlist).is_err() {
                    debug!("Nobody is waiting for the result of modal {:?}", self.id);
                }
            }
            None => debug!("Modal {:?} has already been resolved", self.id),
        }
    }

    fn gen_row(&self, p: &PlaylistSummary) -> ListItem<'static> {
        let mut spans = vec![Span::raw(p.name.clone())];
        if let Some(count) = p.track_count() {
            spans.push(Span::styled(format!(" ({count} tracks)"), Style::new().dim()));
        }
        if self.pending.contains(&p.id) {
            spans.push(Span::styled(
                format!("  {} importing...", SPINNER[self.spinner % SPINNER.len()]),
                Style::new().yellow(),
            ));
        }
        ListItem::new(Line::from(spans))
    }

    fn gen_footer(&self) -> Line<'static> {
        let mut spans = vec![];
        for action in [ImportModalAction::Import, ImportModalAction::Close] {
            if let Some(keys) = self.binds.find_action_str(&action) {
                spans.push(Span::styled(keys, Style::new().bold()));
                spans.push(Span::raw(format!(" {}  ", action)));
            }
        }
        Line::from(spans)
    }
}

impl Renderable for ImportPlaylistModal {
    fn draw(&mut self, frame: &mut Frame, area: Rect) {
        let area = popup_area(frame, area, 60, 60);
        let title = Span::styled(
            format!("Import playlist from {}", self.service_name),
            Style::default().add_modifier(Modifier::BOLD),
        );
        let block = Block::bordered().title(title).border_style(Style::new().white());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [hint, body, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);
        frame.render_widget(
            Paragraph::new(format!(
                "Add one or more of your {} playlists below:",
                self.service_name
            ))
            .dim(),
            hint,
        );
        frame.render_widget(Paragraph::new(self.gen_footer()), footer);

        let rows: Vec<ListItem> = self.playlists().iter().map(|p| self.gen_row(p)).collect();
        match &mut self.state {
            CompState::Unauthenticated => Centered::new(vec![
                "You must be logged in to import playlists.".to_string(),
                "Set auth.token or auth.token_command in the config, or pass --token.".to_string(),
            ])
            .draw(frame, body),
            CompState::Loading => {
                Centered::new(vec!["Loading playlists...".to_string()]).draw(frame, body)
            }
            CompState::Failed(e) => Centered::new(vec![
                "Could not load your playlists.".to_string(),
                e.clone(),
                "Close and reopen to try again.".to_string(),
            ])
            .draw(frame, body),
            CompState::Loaded { playlists, .. } if playlists.is_empty() => {
                Centered::new(vec!["No playlists found.".to_string()]).draw(frame, body)
            }
            CompState::Loaded { liststate, .. } => {
                let list = List::new(rows)
                    .highlight_style(Style::new().reversed())
                    .highlight_symbol(">")
                    .scroll_padding(1);
                frame.render_stateful_widget(list, body, liststate);
            }
        }
    }
}

impl OnTick for ImportPlaylistModal {
    fn on_tick(&mut self) {
        if !self.pending.is_empty() {
            self.spinner = self.spinner.wrapping_add(1);
        }
    }
}

impl HandleQuery for ImportPlaylistModal {
    fn handle_query(&mut self, dest: CompID, ticket: usize, res: ResponseType) -> Option<Action> {
        if dest != CompID::ImportModal {
            return None;
        }
        match res {
            ResponseType::ListRemotePlaylists(res) => {
                if self.list_ticket != Some(ticket) {
                    debug!("Ignoring playlist list #{ticket}, not requested by this modal");
                    return None;
                }
                self.list_ticket = None;
                match res {
                    Ok(playlists) => {
                        info!("Loaded {} remote playlists", playlists.len());
                        let liststate = ListState::default()
                            .with_selected(if playlists.is_empty() { None } else { Some(0) });
                        self.state = CompState::Loaded {
                            playlists,
                            liststate,
                        };
                    }
                    Err(e) => {
                        warn!("Failed to load remote playlists: {e}");
                        self.notifier.notify(Notification::error(
                            NotificationKey::LoadError,
                            "Error loading playlists",
                            e.clone(),
                        ));
                        self.state = CompState::Failed(e);
                    }
                }
                None
            }
            ResponseType::ImportPlaylist { id, name, res } => {
                if self.imports.remove(&ticket).is_none() {
                    debug!("Ignoring import #{ticket}, not requested by this modal");
                    return None;
                }
                self.pending.remove(&id);
                notify_import_outcome(self.notifier.as_ref(), &self.service_name, &name, &res);
                match res {
                    Ok(playlist) => {
                        info!("Imported {:?} as {}", id, playlist.identifier);
                        self.resolve(playlist);
                    }
                    Err(e) => warn!("Failed to import {:?}: {e}", id),
                }
                None
            }
        }
    }
}

impl HandleKeySeq<ImportModalAction> for ImportPlaylistModal {
    fn handle_local_action(&mut self, action: ImportModalAction) -> KeySeqResult {
        match action {
            ImportModalAction::Up => {
                if let CompState::Loaded { liststate, .. } = &mut self.state {
                    liststate.select_previous();
                }
            }
            ImportModalAction::Down => {
                if let CompState::Loaded { liststate, .. } = &mut self.state {
                    liststate.select_next();
                }
            }
            ImportModalAction::Top => {
                if let CompState::Loaded { liststate, .. } = &mut self.state {
                    liststate.select_first();
                }
            }
            ImportModalAction::Bottom => {
                if let CompState::Loaded { liststate, .. } = &mut self.state {
                    liststate.select_last();
                }
            }
            ImportModalAction::Import => {
                let Some(p) = self.selected() else {
                    return KeySeqResult::NoActionNeeded;
                };
                let (id, name) = (p.id.clone(), p.name.clone());
                if let Some(action) = self.select_playlist(id, name) {
                    return KeySeqResult::ActionNeeded(action);
                }
            }
            ImportModalAction::Close => {
                return KeySeqResult::ActionNeeded(Action::Modal(ModalAction::Close))
            }
        };
        KeySeqResult::NoActionNeeded
    }

    fn get_keybinds(&self) -> &KeyBindings<ImportModalAction> {
        &self.binds
    }
}
