use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use crossterm::event::KeyEvent;
use ratatui::{prelude::Rect, Frame};
use tracing::{debug, info};

use crate::{
    action::{Action, ModalAction},
    app::delayer::{DelayHandle, Delayer},
    compid::CompID,
    components::{
        home::importmodal::{notify_import_outcome, ImportPlaylistModal},
        traits::{
            handlekeyseq::{HandleKeySeq, KeySeqResult},
            handlequery::HandleQuery,
            ontick::OnTick,
            renderable::Renderable,
        },
    },
    notifier::Notifier,
    queryworker::query::ResponseType,
};

static MODAL_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Identifies one modal instance. Scheduled removals carry it, so a removal meant for an old
/// instance never drops a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalID(usize);

impl ModalID {
    pub fn next() -> Self {
        Self(MODAL_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Holds at most one import modal.
///
/// Closing hides the modal right away, but the instance stays alive until the close delay runs
/// out. Opening a new one in the meantime cancels the pending removal.
pub struct ModalHost {
    modal: Option<ImportPlaylistModal>,
    visible: bool,
    modal_open: bool,
    delayer: Delayer,
    close_delay: Duration,
    removal: Option<DelayHandle>,
    notifier: Arc<dyn Notifier>,
    service_name: String,
}

impl ModalHost {
    pub fn new(
        delayer: Delayer,
        close_delay: Duration,
        notifier: Arc<dyn Notifier>,
        service_name: String,
    ) -> Self {
        Self {
            modal: None,
            visible: false,
            modal_open: false,
            delayer,
            close_delay,
            removal: None,
            notifier,
            service_name,
        }
    }

    /// Replaces whatever modal is held by `modal` and shows it.
    pub fn show(&mut self, modal: ImportPlaylistModal) {
        if let Some(handle) = self.removal.take() {
            debug!("Cancelling scheduled modal removal");
            handle.cancel();
        }
        info!("Showing modal {:?}", modal.id());
        self.modal = Some(modal);
        self.visible = true;
        self.modal_open = true;
    }

    /// Hides the modal and schedules its removal after the close delay.
    pub fn close(&mut self) {
        let Some(modal) = &self.modal else {
            return;
        };
        if !self.visible {
            return;
        }
        self.visible = false;
        self.modal_open = false;
        let id = modal.id();
        debug!("Closing modal {:?}, removal in {:?}", id, self.close_delay);
        if let Some(old) = self.removal.replace(
            self.delayer
                .schedule(Action::Modal(ModalAction::Remove(id)), self.close_delay),
        ) {
            old.cancel();
        }
    }

    /// Drops the modal if it is still the one with the given ID and it is not shown.
    pub fn remove(&mut self, id: ModalID) {
        match &self.modal {
            Some(modal) if modal.id() == id && !self.visible => {
                info!("Removing modal {:?}", id);
                self.modal = None;
                self.removal = None;
            }
            _ => debug!("Ignoring stale removal of modal {:?}", id),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// True while the rest of the screen should be covered.
    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn modal(&self) -> Option<&ImportPlaylistModal> {
        self.modal.as_ref()
    }

    pub fn handle_key_seq(&mut self, keyseq: &[KeyEvent]) -> Option<KeySeqResult> {
        match (&mut self.modal, self.visible) {
            (Some(modal), true) => modal.handle_key_seq(keyseq),
            _ => None,
        }
    }

    pub fn is_key_prefix(&self, keyseq: &[KeyEvent]) -> bool {
        match (&self.modal, self.visible) {
            (Some(modal), true) => modal.is_key_prefix(keyseq),
            _ => false,
        }
    }
}

impl HandleQuery for ModalHost {
    fn handle_query(&mut self, dest: CompID, ticket: usize, res: ResponseType) -> Option<Action> {
        if let Some(modal) = &mut self.modal {
            if modal.owns_ticket(ticket) {
                return modal.handle_query(dest, ticket, res);
            }
        }
        // The modal that asked is gone. Imports still happened on the server, so the user has to
        // hear about them.
        match res {
            ResponseType::ImportPlaylist { name, res, .. } => {
                debug!("Import #{ticket} finished after its modal was removed");
                notify_import_outcome(self.notifier.as_ref(), &self.service_name, &name, &res);
            }
            ResponseType::ListRemotePlaylists(_) => {
                debug!("Dropping playlist list #{ticket}, its modal is gone");
            }
        }
        None
    }
}

impl OnTick for ModalHost {
    fn on_tick(&mut self) {
        if let Some(modal) = &mut self.modal {
            modal.on_tick();
        }
    }
}

impl Renderable for ModalHost {
    fn draw(&mut self, frame: &mut Frame, area: Rect) {
        if let (Some(modal), true) = (&mut self.modal, self.visible) {
            modal.draw(frame, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::{
        sync::mpsc::{error::TryRecvError, unbounded_channel, UnboundedReceiver},
        time::sleep,
    };

    use super::*;
    use crate::{
        config::keybindings::KeyBindings,
        notifier::{testing::RecordingNotifier, NotificationKey},
        playlistservice::types::{ImportedPlaylist, PlaylistID},
        session::{AuthToken, Session},
    };

    const DELAY: Duration = Duration::from_millis(200);

    fn host() -> (ModalHost, UnboundedReceiver<Action>, Arc<RecordingNotifier>) {
        let (tx, rx) = unbounded_channel();
        let notifier = Arc::new(RecordingNotifier::default());
        let host = ModalHost::new(
            Delayer::new(tx),
            DELAY,
            notifier.clone(),
            "Spotify".to_string(),
        );
        (host, rx, notifier)
    }

    fn modal(notifier: Arc<RecordingNotifier>) -> ImportPlaylistModal {
        let (modal, _result, _open) = ImportPlaylistModal::new(
            ModalID::next(),
            Session::new(Some(AuthToken::new("abc".to_string()))),
            notifier,
            KeyBindings::default(),
            "Spotify".to_string(),
        );
        modal
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(ModalID::next(), ModalID::next());
    }

    #[tokio::test(start_paused = true)]
    async fn close_hides_then_removes_after_delay() {
        let (mut host, mut rx, notifier) = host();
        let m = modal(notifier);
        let id = m.id();
        host.show(m);
        assert!(host.is_visible());
        assert!(host.is_modal_open());

        host.close();
        assert!(!host.is_visible());
        assert!(!host.is_modal_open());
        assert!(host.modal().is_some());

        let action = rx.recv().await;
        assert_eq!(action, Some(Action::Modal(ModalAction::Remove(id))));
        host.remove(id);
        assert!(host.modal().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn instance_survives_until_delay() {
        let (mut host, mut rx, notifier) = host();
        host.show(modal(notifier));
        host.close();
        sleep(DELAY - Duration::from_millis(1)).await;
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        assert!(host.modal().is_some());
        sleep(Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert!(matches!(rx.try_recv(), Ok(Action::Modal(ModalAction::Remove(_)))));
    }

    #[tokio::test(start_paused = true)]
    async fn reopening_cancels_removal() {
        let (mut host, mut rx, notifier) = host();
        let first = modal(notifier.clone());
        host.show(first);
        host.close();

        sleep(Duration::from_millis(50)).await;
        let second = modal(notifier);
        let second_id = second.id();
        host.show(second);

        sleep(DELAY * 3).await;
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        assert!(host.is_visible());
        assert_eq!(host.modal().map(|m| m.id()), Some(second_id));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_removal_keeps_current_modal() {
        let (mut host, _rx, notifier) = host();
        let first = modal(notifier.clone());
        let first_id = first.id();
        host.show(first);
        host.close();
        host.show(modal(notifier));
        host.remove(first_id);
        assert!(host.modal().is_some());
        assert!(host.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn closing_twice_schedules_once() {
        let (mut host, mut rx, notifier) = host();
        host.show(modal(notifier));
        host.close();
        host.close();
        sleep(DELAY * 2).await;
        assert!(matches!(rx.try_recv(), Ok(Action::Modal(ModalAction::Remove(_)))));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn late_import_still_notifies() {
        let (mut host, _rx, notifier) = host();
        let res = host.handle_query(
            CompID::ImportModal,
            424242,
            ResponseType::ImportPlaylist {
                id: PlaylistID::new("p1"),
                name: "Road Trip".to_string(),
                res: Ok(ImportedPlaylist::new("/playlist/7")),
            },
        );
        assert_eq!(res, None);
        let received = notifier.take();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].key, NotificationKey::CreatePlaylistSuccess);
        assert_eq!(received[0].link.as_deref(), Some("/playlist/7"));
    }

    #[tokio::test]
    async fn late_list_is_dropped() {
        let (mut host, _rx, notifier) = host();
        host.handle_query(
            CompID::ImportModal,
            424243,
            ResponseType::ListRemotePlaylists(Err("gone".to_string())),
        );
        assert!(notifier.take().is_empty());
    }

    #[tokio::test]
    async fn hidden_modal_gets_no_keys() {
        let (mut host, _rx, notifier) = host();
        assert_eq!(host.handle_key_seq(&[]), None);
        host.show(modal(notifier));
        host.close();
        assert_eq!(host.handle_key_seq(&[]), None);
        assert!(!host.is_key_prefix(&[]));
    }
}
