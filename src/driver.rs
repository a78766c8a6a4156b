use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::RecipeApi;
use crate::config::AppConfig;
use crate::debounce::Debouncer;
use crate::detail::DetailTicket;
use crate::error::QuickBiteError;
use crate::filters::FilterDimension;
use crate::model::{RecipeDetail, RecipeSummary};
use crate::orchestrator::ListTicket;
use crate::session::{Session, SessionView};

/// Input from the rendering layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SearchTextChanged(String),
    FilterToggled(FilterDimension, String),
    RecipeSelected(String),
    DetailClosed,
}

enum Completion {
    List {
        seq: u64,
        outcome: Result<Vec<RecipeSummary>, QuickBiteError>,
    },
    Detail {
        seq: u64,
        outcome: Result<Option<RecipeDetail>, QuickBiteError>,
    },
}

/// Front door to a running session.
///
/// Dropping the handle (or calling [`shutdown`](SessionHandle::shutdown))
/// stops the session loop and cancels any pending debounce.
pub struct SessionHandle {
    events: UnboundedSender<SessionEvent>,
    view: watch::Receiver<SessionView>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub fn search_text_changed(&self, text: impl Into<String>) {
        self.send(SessionEvent::SearchTextChanged(text.into()));
    }

    pub fn toggle_filter(&self, dimension: FilterDimension, label: impl Into<String>) {
        self.send(SessionEvent::FilterToggled(dimension, label.into()));
    }

    pub fn select_recipe(&self, id: impl Into<String>) {
        self.send(SessionEvent::RecipeSelected(id.into()));
    }

    pub fn close_detail(&self) {
        self.send(SessionEvent::DetailClosed);
    }

    pub fn send(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            warn!("Session loop has stopped; event dropped");
        }
    }

    /// Receiver notified after every visible state change
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view.clone()
    }

    /// Current snapshot
    pub fn view(&self) -> SessionView {
        self.view.borrow().clone()
    }

    pub async fn shutdown(self) {
        let SessionHandle { events, task, .. } = self;
        drop(events);
        if let Err(e) = task.await {
            warn!("Session loop ended abnormally: {}", e);
        }
    }
}

/// Start a session on the current tokio runtime.
///
/// The session issues its default listing immediately.
pub fn spawn_session(config: &AppConfig, api: Arc<dyn RecipeApi>) -> SessionHandle {
    let (event_tx, event_rx) = unbounded_channel();
    let (debounced_tx, debounced_rx) = unbounded_channel();
    let (completion_tx, completion_rx) = unbounded_channel();

    let session = Session::new(config);
    let (view_tx, view_rx) = watch::channel(session.view());

    let driver = SessionDriver {
        session,
        api,
        debouncer: Debouncer::new(config.debounce_window(), debounced_tx),
        debounced: debounced_rx,
        completion_tx,
        completions: completion_rx,
        view: view_tx,
    };

    SessionHandle {
        events: event_tx,
        view: view_rx,
        task: tokio::spawn(driver.run(event_rx)),
    }
}

struct SessionDriver {
    session: Session,
    api: Arc<dyn RecipeApi>,
    debouncer: Debouncer<String>,
    debounced: UnboundedReceiver<String>,
    completion_tx: UnboundedSender<Completion>,
    completions: UnboundedReceiver<Completion>,
    view: watch::Sender<SessionView>,
}

impl SessionDriver {
    async fn run(mut self, mut events: UnboundedReceiver<SessionEvent>) {
        info!("Session started");
        let ticket = self.session.start();
        self.spawn_list(ticket);
        self.publish();

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
                Some(text) = self.debounced.recv() => {
                    debug!("Debounced search text: {:?}", text);
                    if let Some(ticket) = self.session.apply_debounced_text(text) {
                        self.spawn_list(ticket);
                    }
                }
                Some(completion) = self.completions.recv() => self.handle_completion(completion),
            }
            self.publish();
        }

        self.debouncer.cancel();
        info!("Session closed");
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SearchTextChanged(text) => {
                if let Some(ticket) = self.session.set_search_text(text.clone()) {
                    self.spawn_list(ticket);
                }
                self.debouncer.push(text);
            }
            SessionEvent::FilterToggled(dimension, label) => {
                let ticket = self.session.toggle_filter(dimension, label);
                self.spawn_list(ticket);
            }
            SessionEvent::RecipeSelected(id) => {
                let ticket = self.session.select_recipe(id);
                self.spawn_lookup(ticket);
            }
            SessionEvent::DetailClosed => self.session.close_detail(),
        }
    }

    fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::List { seq, outcome } => {
                self.session.resolve_list(seq, outcome);
            }
            Completion::Detail { seq, outcome } => {
                self.session.resolve_detail(seq, outcome);
            }
        }
    }

    fn spawn_list(&self, ticket: ListTicket) {
        let api = Arc::clone(&self.api);
        let completions = self.completion_tx.clone();
        tokio::spawn(async move {
            let outcome = api.list(&ticket.query).await;
            let _ = completions.send(Completion::List {
                seq: ticket.seq,
                outcome,
            });
        });
    }

    fn spawn_lookup(&self, ticket: DetailTicket) {
        let api = Arc::clone(&self.api);
        let completions = self.completion_tx.clone();
        tokio::spawn(async move {
            let outcome = api.lookup(&ticket.id).await;
            let _ = completions.send(Completion::Detail {
                seq: ticket.seq,
                outcome,
            });
        });
    }

    fn publish(&self) {
        let view = self.session.view();
        self.view.send_if_modified(|current| {
            if *current == view {
                false
            } else {
                *current = view;
                true
            }
        });
    }
}
