pub mod delayer;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{
    action::Action,
    components::{
        home::Home,
        traits::{component::Component, handlekeyseq::KeySeqResult},
    },
    config::Config,
    queryworker::query::ToQueryWorker,
    session::Session,
    tui::{Event, Tui},
};

pub struct App {
    tick_rate: f64,
    frame_rate: f64,
    component: Box<dyn Component>,
    should_quit: bool,
    should_suspend: bool,
    key_stack: Vec<KeyEvent>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    query_tx: mpsc::UnboundedSender<ToQueryWorker>,
}

impl App {
    pub fn new(
        config: Config,
        session: Session,
        action_tx: mpsc::UnboundedSender<Action>,
        action_rx: mpsc::UnboundedReceiver<Action>,
        query_tx: mpsc::UnboundedSender<ToQueryWorker>,
        tick_rate: f64,
        frame_rate: f64,
    ) -> Self {
        Self {
            tick_rate,
            frame_rate,
            component: Box::new(Home::new(action_tx.clone(), config, session, tick_rate)),
            should_quit: false,
            should_suspend: false,
            key_stack: Vec::new(),
            action_tx,
            action_rx,
            query_tx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate);
        tui.enter()?;

        let action_tx = self.action_tx.clone();
        loop {
            self.handle_events(&mut tui).await?;
            self.handle_actions(&mut tui)?;
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                action_tx.send(Action::ClearScreen)?;
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        info!("Exiting...");
        Ok(())
    }

    async fn handle_events(&mut self, tui: &mut Tui) -> Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };
        let action_tx = self.action_tx.clone();
        match event {
            Event::Quit => action_tx.send(Action::Quit)?,
            Event::Tick => action_tx.send(Action::Tick)?,
            Event::Render => action_tx.send(Action::Render)?,
            Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
            Event::Key(key) => self.handle_key_event(key)?,
            _ => {}
        }
        Ok(())
    }

    /// Keys pile up until they form a binding, or until they cannot be the start of one anymore.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        self.key_stack.push(key);
        if let Some(res) = self.component.handle_key_seq(&self.key_stack) {
            self.key_stack.clear();
            if let KeySeqResult::ActionNeeded(action) = res {
                info!("Got action: {action:?}");
                self.action_tx.send(action)?;
            }
        } else if !self.component.is_key_prefix(&self.key_stack) {
            debug!("No binding for {:?}", self.key_stack);
            self.key_stack.clear();
            // The last key may still start a binding on its own
            if self.component.is_key_prefix(&[key]) {
                self.key_stack.push(key);
            } else if let Some(KeySeqResult::ActionNeeded(action)) =
                self.component.handle_key_seq(&[key])
            {
                self.action_tx.send(action)?;
            }
        }
        Ok(())
    }

    fn handle_actions(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            if action != Action::Tick && action != Action::Render {
                debug!("{action:?}");
            };

            match &action {
                Action::ToQuery(req) => {
                    self.query_tx.send(req.clone())?;
                    continue;
                }
                Action::Quit => self.should_quit = true,
                Action::Suspend => self.should_suspend = true,
                Action::Resume => self.should_suspend = false,
                Action::ClearScreen => tui.terminal.clear()?,
                Action::Resize(w, h) => self.handle_resize(tui, *w, *h)?,
                Action::Render => self.render(tui)?,
                _ => {}
            };
            if let Some(ret) = self.component.update(action)? {
                debug!("Got {ret:?} as a response");
                self.action_tx.send(ret)?
            }
        }
        Ok(())
    }

    fn handle_resize(&mut self, tui: &mut Tui, w: u16, h: u16) -> Result<()> {
        tui.resize(Rect::new(0, 0, w, h))?;
        self.render(tui)?;
        Ok(())
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        tui.draw(|frame| {
            let area = frame.area();
            self.component.draw(frame, area)
        })?;
        Ok(())
    }
}
