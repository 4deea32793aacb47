//! Executes session commands as tokio tasks.
//!
//! The driver owns the [`MemeSession`] and the [`CanvasSurface`] and is the
//! only place either is mutated. Tasks report back over a channel; the
//! driver handles one completion at a time, so state and surface always
//! change together.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use memegen_asset_store::{coordinator, AssetStore};
use memegen_common::config::AssetStoreConfig;
use memegen_common::error::MemeResult;
use memegen_meme_model::{ContentIdentifier, SelectedAsset, SignedUrl};
use memegen_render_engine::{CanvasSurface, Compositor, Exporter, ImageSource};

use crate::refresher::RefreshTimer;
use crate::state::{validation_message, Command, Event, MemeSession, RenderJob, Ticket};

/// Timing of the signed URL lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Lifetime requested for each signed URL.
    pub expires_in_secs: u64,
    /// Interval between automatic refreshes.
    pub refresh_interval: Duration,
}

impl SessionSettings {
    pub fn from_config(config: &AssetStoreConfig) -> Self {
        Self {
            expires_in_secs: config.signed_url_expiry_secs,
            refresh_interval: Duration::from_secs(config.refresh_interval_secs),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&AssetStoreConfig::default())
    }
}

/// Completions sent back by spawned tasks.
enum Outcome {
    Uploaded {
        ticket: Ticket,
        result: MemeResult<ContentIdentifier>,
    },
    Signed {
        ticket: Ticket,
        result: MemeResult<SignedUrl>,
    },
    Rendered {
        ticket: Ticket,
        result: MemeResult<CanvasSurface>,
    },
    Tick,
}

/// Runs one session: applies events, spawns the work they request, and
/// folds the results back in.
pub struct SessionDriver {
    state: MemeSession,
    surface: CanvasSurface,
    store: Arc<dyn AssetStore>,
    images: Arc<dyn ImageSource>,
    compositor: Arc<Compositor>,
    exporter: Exporter,
    settings: SessionSettings,
    tx: mpsc::UnboundedSender<Outcome>,
    rx: mpsc::UnboundedReceiver<Outcome>,
    upload_task: Option<JoinHandle<()>>,
    url_task: Option<JoinHandle<()>>,
    render_task: Option<JoinHandle<()>>,
    refresher: Option<RefreshTimer>,
    last_export: Option<PathBuf>,
}

impl SessionDriver {
    pub fn new(
        state: MemeSession,
        store: Arc<dyn AssetStore>,
        images: Arc<dyn ImageSource>,
        compositor: Arc<Compositor>,
        exporter: Exporter,
        settings: SessionSettings,
    ) -> Self {
        let (width, height) = state.canvas_size();
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            surface: CanvasSurface::new(width, height),
            store,
            images,
            compositor,
            exporter,
            settings,
            tx,
            rx,
            upload_task: None,
            url_task: None,
            render_task: None,
            refresher: None,
            last_export: None,
        }
    }

    pub fn state(&self) -> &MemeSession {
        &self.state
    }

    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// Path of the most recent successful export.
    pub fn last_export(&self) -> Option<&Path> {
        self.last_export.as_deref()
    }

    /// Whether the refresh timer is currently running.
    pub fn is_refreshing(&self) -> bool {
        self.refresher.as_ref().is_some_and(RefreshTimer::is_running)
    }

    /// Read `path` and select it, or record why it cannot be used.
    pub fn select_file(&mut self, path: &Path) {
        match SelectedAsset::from_path(path) {
            Ok(asset) => self.dispatch(Event::FileSelected(asset)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "File rejected");
                self.dispatch(Event::FileRejected(validation_message(&e)));
            }
        }
    }

    /// Apply a user event and start whatever work it requests.
    pub fn dispatch(&mut self, event: Event) {
        for command in self.state.apply(event) {
            self.execute(command);
        }
    }

    /// Wait for the next task completion or timer tick and apply it.
    pub async fn pump(&mut self) {
        // The driver holds a sender, so the channel never closes.
        if let Some(outcome) = self.rx.recv().await {
            self.handle(outcome);
        }
    }

    /// Apply completions until no issued task is outstanding. Timer ticks
    /// arriving meanwhile are applied too, but are not waited for.
    pub async fn settle(&mut self) {
        while self.state.has_pending_tasks() {
            self.pump().await;
        }
        while let Ok(outcome) = self.rx.try_recv() {
            self.handle(outcome);
        }
    }

    fn handle(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Uploaded { ticket, result } => {
                self.dispatch(Event::UploadFinished { ticket, result });
            }
            Outcome::Signed { ticket, result } => {
                self.dispatch(Event::UrlIssued { ticket, result });
            }
            Outcome::Rendered { ticket, result } => {
                let result = match result {
                    Ok(surface) => {
                        let size = surface.dimensions();
                        if self.state.is_current_render(ticket) {
                            self.surface = surface;
                        }
                        Ok(size)
                    }
                    Err(e) => Err(e),
                };
                self.dispatch(Event::RenderFinished { ticket, result });
            }
            Outcome::Tick => self.dispatch(Event::RefreshTick),
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Upload { ticket, asset } => {
                let store = self.store.clone();
                let tx = self.tx.clone();
                replace_task(
                    &mut self.upload_task,
                    tokio::spawn(async move {
                        let result = coordinator::submit(store.as_ref(), Some(&asset)).await;
                        let _ = tx.send(Outcome::Uploaded { ticket, result });
                    }),
                );
            }
            Command::RequestUrl { ticket, cid } => {
                let store = self.store.clone();
                let tx = self.tx.clone();
                let expires = self.settings.expires_in_secs;
                replace_task(
                    &mut self.url_task,
                    tokio::spawn(async move {
                        let result = coordinator::request_url(store.as_ref(), Some(&cid), expires).await;
                        let _ = tx.send(Outcome::Signed { ticket, result });
                    }),
                );
            }
            Command::StartRefresher => {
                let tx = self.tx.clone();
                self.refresher = Some(RefreshTimer::start(self.settings.refresh_interval, move || {
                    tx.send(Outcome::Tick).is_ok()
                }));
            }
            Command::StopRefresher => {
                self.refresher = None;
            }
            Command::Render { ticket, job } => {
                let images = self.images.clone();
                let compositor = self.compositor.clone();
                let tx = self.tx.clone();
                replace_task(
                    &mut self.render_task,
                    tokio::spawn(async move {
                        let RenderJob {
                            url,
                            overlays,
                            style,
                        } = job;
                        let result = compositor
                            .render(images.as_ref(), &url, &overlays, &style)
                            .await;
                        let _ = tx.send(Outcome::Rendered { ticket, result });
                    }),
                );
            }
            Command::Export => {
                if let Some(path) = self.exporter.export(&self.surface) {
                    self.last_export = Some(path);
                }
            }
            Command::CancelPending => {
                for task in [&mut self.upload_task, &mut self.url_task, &mut self.render_task] {
                    if let Some(handle) = task.take() {
                        handle.abort();
                    }
                }
                while self.rx.try_recv().is_ok() {}
            }
        }
    }
}

impl Drop for SessionDriver {
    fn drop(&mut self) {
        for task in [&mut self.upload_task, &mut self.url_task, &mut self.render_task] {
            if let Some(handle) = task.take() {
                handle.abort();
            }
        }
    }
}

/// Install `next` as the task for its kind, aborting the one it supersedes.
fn replace_task(slot: &mut Option<JoinHandle<()>>, next: JoinHandle<()>) {
    if let Some(previous) = slot.replace(next) {
        previous.abort();
    }
}
