use std::{collections::HashMap, sync::Arc, time::Duration};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender},
    time::{timeout, Instant},
};

use crate::{
    action::Action,
    components::{
        home::Home,
        traits::{
            component::Component,
            handlekeyseq::{KeySeqResult, PassKeySeq},
        },
    },
    config::{
        pathconfig::{PathConfig, PathType},
        Config,
    },
    notifier::{NotificationKey, NotificationKind},
    playlistservice::types::{ImportedPlaylist, PlaylistSummary},
    queryworker::{
        highlevelquery::HighLevelQuery,
        query::ToQueryWorker,
        testing::FakeService,
        QueryWorker,
    },
    session::{AuthToken, Session},
};

/// Runs [`Home`] against a real [`QueryWorker`] backed by [`FakeService`], doing the routing
/// [`crate::app::App`] would do, without a terminal.
struct TestModule {
    home: Home,
    action_tx: UnboundedSender<Action>,
    action_rx: UnboundedReceiver<Action>,
    query_tx: UnboundedSender<ToQueryWorker>,
    service: Arc<FakeService>,
}

impl TestModule {
    fn new(service: FakeService, token: Option<&str>, mut config: Config) -> Self {
        config.behaviour.close_delay_ms = 20;
        let (action_tx, action_rx) = unbounded_channel();
        let mut qw = QueryWorker::new(action_tx.clone(), service);
        let query_tx = qw.get_tx();
        let service = qw.service();
        tokio::spawn(async move { qw.run().await });
        let session = Session::new(token.map(|t| AuthToken::new(t.to_string())));
        Self {
            home: Home::new(action_tx.clone(), config, session, 4.0),
            action_tx,
            action_rx,
            query_tx,
            service,
        }
    }

    fn send_key(&mut self, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        if let Some(KeySeqResult::ActionNeeded(action)) =
            PassKeySeq::handle_key_seq(&mut self.home, &[key])
        {
            self.action_tx.send(action).unwrap();
        }
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::ToQuery(req) => self.query_tx.send(req).unwrap(),
            other => {
                if let Some(ret) = self.home.update(other).unwrap() {
                    self.action_tx.send(ret).unwrap();
                }
            }
        }
    }

    /// Processes actions until nothing happens for a while.
    async fn settle(&mut self) {
        while let Ok(Some(action)) =
            timeout(Duration::from_millis(100), self.action_rx.recv()).await
        {
            self.dispatch(action);
        }
    }

    /// Processes actions for the whole duration, even if idle.
    async fn settle_for(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;
        while let Ok(Some(action)) =
            tokio::time::timeout_at(deadline, self.action_rx.recv()).await
        {
            self.dispatch(action);
        }
    }

    fn toast_keys(&self) -> Vec<NotificationKey> {
        self.home.toasts().visible().map(|n| n.key).collect()
    }

    fn stop(&self) {
        let _ = self.query_tx.send(ToQueryWorker::new(HighLevelQuery::Stop));
    }
}

fn config() -> Config {
    Config::new(&PathConfig::new(PathType::None, PathType::None)).unwrap()
}

fn service() -> FakeService {
    FakeService {
        playlists: vec![
            PlaylistSummary::new("p1", "Road Trip"),
            PlaylistSummary::new("p2", "Chill"),
        ],
        imports: HashMap::from([
            ("p1".to_string(), Ok(ImportedPlaylist::new("/playlist/1"))),
            ("p2".to_string(), Err("Playlist is private".to_string())),
        ]),
        ..FakeService::default()
    }
}

#[tokio::test]
async fn import_session() {
    let mut test = TestModule::new(service(), Some("abc"), config());

    test.send_key(KeyCode::Char('i'));
    test.settle().await;
    let modal = test.home.host().modal().unwrap();
    let names: Vec<&str> = modal.playlists().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Road Trip", "Chill"]);
    assert_eq!(test.service.list_calls(), 1);

    // Import the first row
    test.send_key(KeyCode::Enter);
    test.settle().await;
    assert_eq!(test.home.imported(), &[ImportedPlaylist::new("/playlist/1")]);
    assert_eq!(test.toast_keys(), vec![NotificationKey::CreatePlaylistSuccess]);
    assert!(test.home.host().is_visible());

    // The second one fails, the modal stays and nothing else is imported
    test.send_key(KeyCode::Down);
    test.send_key(KeyCode::Enter);
    test.settle().await;
    assert_eq!(test.home.imported().len(), 1);
    assert_eq!(
        test.toast_keys(),
        vec![
            NotificationKey::CreatePlaylistSuccess,
            NotificationKey::SavePlaylistError
        ]
    );
    assert_eq!(test.home.host().modal().unwrap().pending_count(), 0);
    assert_eq!(test.service.import_calls(), 2);
    assert_eq!(
        *test.service.tokens.lock().unwrap(),
        vec!["abc".to_string(); 3]
    );

    // Closing hides right away and removes after the delay
    test.send_key(KeyCode::Esc);
    test.settle().await;
    assert!(!test.home.host().is_visible());
    assert!(test.home.host().modal().is_none());
    test.stop();
}

#[tokio::test]
async fn reopening_fetches_again() {
    let mut test = TestModule::new(service(), Some("abc"), config());
    test.send_key(KeyCode::Char('i'));
    test.settle().await;
    test.send_key(KeyCode::Esc);
    test.settle().await;
    assert!(test.home.host().modal().is_none());
    test.send_key(KeyCode::Char('i'));
    test.settle().await;
    assert!(test.home.host().is_visible());
    assert_eq!(test.home.host().modal().unwrap().playlists().len(), 2);
    assert_eq!(test.service.list_calls(), 2);
    test.stop();
}

#[tokio::test]
async fn load_failure_is_reported() {
    let svc = FakeService {
        list_error: Some("Rate limited".to_string()),
        ..FakeService::default()
    };
    let mut test = TestModule::new(svc, Some("abc"), config());
    test.send_key(KeyCode::Char('i'));
    test.settle().await;
    let modal = test.home.host().modal().unwrap();
    assert!(modal.playlists().is_empty());
    assert_eq!(modal.load_error(), Some("Rate limited"));
    let toasts: Vec<_> = test.home.toasts().visible().cloned().collect();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, NotificationKind::Error);
    assert_eq!(toasts[0].title, "Error loading playlists");
    assert_eq!(toasts[0].message, "Rate limited");
    test.stop();
}

#[tokio::test]
async fn no_session_makes_no_calls() {
    let mut test = TestModule::new(service(), None, config());
    test.send_key(KeyCode::Char('i'));
    test.settle().await;
    assert!(test.home.host().is_visible());
    assert!(test.home.host().modal().unwrap().playlists().is_empty());
    test.send_key(KeyCode::Enter);
    test.settle().await;
    assert_eq!(test.service.list_calls(), 0);
    assert_eq!(test.service.import_calls(), 0);
    test.stop();
}

#[tokio::test]
async fn import_finishing_after_removal_still_notifies() {
    let svc = FakeService {
        import_delay: Duration::from_millis(300),
        ..service()
    };
    let mut test = TestModule::new(svc, Some("abc"), config());
    test.send_key(KeyCode::Char('i'));
    test.settle().await;

    test.send_key(KeyCode::Enter);
    test.send_key(KeyCode::Esc);
    test.settle_for(Duration::from_millis(150)).await;
    // Removed while the import is still running
    assert!(test.home.host().modal().is_none());
    assert!(test.home.toasts().is_empty());

    test.settle_for(Duration::from_millis(400)).await;
    assert_eq!(test.toast_keys(), vec![NotificationKey::CreatePlaylistSuccess]);
    // The modal was gone, so nothing resolved
    assert!(test.home.imported().is_empty());
    test.stop();
}

#[tokio::test]
async fn close_on_import_closes_modal() {
    let mut cfg = config();
    cfg.behaviour.close_on_import = true;
    let mut test = TestModule::new(service(), Some("abc"), cfg);
    test.send_key(KeyCode::Char('i'));
    test.settle().await;
    test.send_key(KeyCode::Enter);
    test.settle().await;
    assert_eq!(test.home.imported().len(), 1);
    assert!(!test.home.host().is_visible());
    assert!(test.home.host().modal().is_none());
    test.stop();
}
