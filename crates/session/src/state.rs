//! Session state and its transitions.
//!
//! [`MemeSession::apply`] is the only way state changes. It never performs
//! I/O: it updates the state and returns the [`Command`]s the driver must
//! carry out. Every asynchronous command carries a [`Ticket`]; completions
//! whose ticket is no longer current are dropped.

use memegen_asset_store::{NOTHING_UPLOADED, NO_FILE_SELECTED};
use memegen_common::config::RenderDefaults;
use memegen_common::error::{MemeError, MemeResult};
use memegen_meme_model::{
    clamp_font_size, Color, ContentIdentifier, OverlaySlot, Overlays, Position, SelectedAsset,
    SignedUrl, TextStyle,
};
use memegen_render_engine::source::IMAGE_LOAD_FAILED;

/// Message shown when an upload fails.
pub const UPLOAD_FAILED: &str = "Failed to upload the file. Please try again.";

/// Message shown when a signed URL request fails.
pub const URL_REFRESH_FAILED: &str = "Failed to refresh the image URL. Please try again.";

/// Identifies one issued command so its completion can be matched to it.
pub type Ticket = u64;

/// Category of the error currently shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Upload,
    UrlRefresh,
    ImageLoad,
}

/// Action the user can take to recover from an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAction {
    /// Request a new signed URL for the current content identifier.
    RefreshUrl,
}

impl RetryAction {
    pub fn label(self) -> &'static str {
        match self {
            RetryAction::RefreshUrl => "Refresh URL",
        }
    }
}

/// The single user-visible error slot. The latest error replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserError {
    pub kind: ErrorKind,
    pub message: String,
    pub action: Option<RetryAction>,
}

impl UserError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
        }
    }

    fn url_refresh() -> Self {
        Self {
            kind: ErrorKind::UrlRefresh,
            message: URL_REFRESH_FAILED.to_string(),
            action: Some(RetryAction::RefreshUrl),
        }
    }
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    pub url: SignedUrl,
    pub overlays: Overlays,
    pub style: TextStyle,
}

/// Inputs to the state machine: user actions and task completions.
#[derive(Debug)]
pub enum Event {
    /// A file was picked and accepted as an image.
    FileSelected(SelectedAsset),
    /// A file was picked but could not be used.
    FileRejected(String),
    Submit,
    UploadFinished {
        ticket: Ticket,
        result: MemeResult<ContentIdentifier>,
    },
    UrlIssued {
        ticket: Ticket,
        result: MemeResult<SignedUrl>,
    },
    /// The refresh timer fired.
    RefreshTick,
    /// The user chose the retry action of a URL error.
    RetryUrl,
    SetText(OverlaySlot, String),
    SetPosition(OverlaySlot, Position),
    SetFontSize(u32),
    SetFontFamily(String),
    SetFillColor(String),
    /// Render again with unchanged inputs.
    Redraw,
    /// A render finished; on success carries the new surface size.
    RenderFinished {
        ticket: Ticket,
        result: MemeResult<(u32, u32)>,
    },
    Download,
    /// Forget the upload and stop all background work.
    Reset,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Upload {
        ticket: Ticket,
        asset: SelectedAsset,
    },
    RequestUrl {
        ticket: Ticket,
        cid: ContentIdentifier,
    },
    /// (Re)start the periodic URL refresh for the current identifier.
    StartRefresher,
    StopRefresher,
    Render {
        ticket: Ticket,
        job: RenderJob,
    },
    Export,
    /// Abort every in-flight task.
    CancelPending,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Tickets {
    next: Ticket,
    upload: Option<Ticket>,
    url: Option<Ticket>,
    render: Option<Ticket>,
}

impl Tickets {
    fn issue(&mut self) -> Ticket {
        self.next += 1;
        self.next
    }
}

/// Application state for one meme-making session.
#[derive(Debug, Clone)]
pub struct MemeSession {
    selected: Option<SelectedAsset>,
    cid: Option<ContentIdentifier>,
    url: Option<SignedUrl>,
    overlays: Overlays,
    style: TextStyle,
    busy: bool,
    error: Option<UserError>,
    refreshing: bool,
    canvas_size: (u32, u32),
    default_canvas: (u32, u32),
    edge_margin: i32,
    tickets: Tickets,
}

impl MemeSession {
    /// Fresh session using the configured text and canvas defaults.
    pub fn from_defaults(defaults: &RenderDefaults) -> MemeResult<Self> {
        let fill = Color::parse_hex(&defaults.fill_color)?;
        let canvas = (defaults.canvas_width, defaults.canvas_height);
        Ok(Self {
            selected: None,
            cid: None,
            url: None,
            overlays: Overlays::for_canvas(canvas.0, canvas.1, defaults.edge_margin),
            style: TextStyle::new(defaults.font_size, defaults.font_family.clone(), fill),
            busy: false,
            error: None,
            refreshing: false,
            canvas_size: canvas,
            default_canvas: canvas,
            edge_margin: defaults.edge_margin,
            tickets: Tickets::default(),
        })
    }

    pub fn selected(&self) -> Option<&SelectedAsset> {
        self.selected.as_ref()
    }

    pub fn cid(&self) -> Option<&ContentIdentifier> {
        self.cid.as_ref()
    }

    pub fn url(&self) -> Option<&SignedUrl> {
        self.url.as_ref()
    }

    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Whether an upload (and its first signed URL request) is in progress.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&UserError> {
        self.error.as_ref()
    }

    /// Whether the periodic URL refresh should be running.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Size of the most recently loaded image, or the default canvas.
    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas_size
    }

    /// Whether `ticket` belongs to the render the session is waiting for.
    pub fn is_current_render(&self, ticket: Ticket) -> bool {
        self.tickets.render == Some(ticket)
    }

    /// Whether any issued task has not reported back yet.
    pub fn has_pending_tasks(&self) -> bool {
        self.tickets.upload.is_some() || self.tickets.url.is_some() || self.tickets.render.is_some()
    }

    /// Apply one event and return the commands it triggers.
    pub fn apply(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::FileSelected(asset) => self.on_file_selected(asset),
            Event::FileRejected(message) => {
                self.selected = None;
                self.fail(UserError::new(ErrorKind::Validation, message));
                Vec::new()
            }
            Event::Submit => self.on_submit(),
            Event::UploadFinished { ticket, result } => self.on_upload_finished(ticket, result),
            Event::UrlIssued { ticket, result } => self.on_url_issued(ticket, result),
            Event::RefreshTick => match self.cid.clone() {
                _ if self.busy => {
                    tracing::debug!("Refresh tick during an upload, ignoring");
                    Vec::new()
                }
                Some(cid) => vec![self.request_url(cid)],
                None => {
                    tracing::debug!("Refresh tick without an upload, ignoring");
                    Vec::new()
                }
            },
            Event::RetryUrl => match self.cid.clone() {
                Some(cid) => vec![self.request_url(cid)],
                None => {
                    self.fail(UserError::new(ErrorKind::Validation, NOTHING_UPLOADED));
                    Vec::new()
                }
            },
            Event::SetText(slot, text) => {
                self.overlays.get_mut(slot).text = text;
                self.rerender()
            }
            Event::SetPosition(slot, position) => {
                self.overlays.get_mut(slot).position = position;
                self.rerender()
            }
            Event::SetFontSize(size) => {
                self.style.font_size = clamp_font_size(size);
                self.rerender()
            }
            Event::SetFontFamily(family) => {
                let family = family.trim();
                if family.is_empty() {
                    self.fail(UserError::new(ErrorKind::Validation, "Font family must not be empty."));
                    return Vec::new();
                }
                self.style.font_family = family.to_string();
                self.rerender()
            }
            Event::SetFillColor(raw) => match Color::parse_hex(&raw) {
                Ok(color) => {
                    self.style.fill = color;
                    self.rerender()
                }
                Err(e) => {
                    self.fail(UserError::new(ErrorKind::Validation, validation_message(&e)));
                    Vec::new()
                }
            },
            Event::Redraw => self.rerender(),
            Event::RenderFinished { ticket, result } => self.on_render_finished(ticket, result),
            Event::Download => {
                if self.url.is_none() {
                    tracing::debug!("Nothing rendered for the current file, skipping download");
                    return Vec::new();
                }
                vec![Command::Export]
            }
            Event::Reset => self.on_reset(),
        }
    }

    fn on_file_selected(&mut self, asset: SelectedAsset) -> Vec<Command> {
        tracing::info!(file = %asset.file_name, media_type = %asset.media_type, "File selected");
        if let Some((width, height)) = asset.dimensions {
            self.canvas_size = (width, height);
            self.overlays.recenter(width, height, self.edge_margin);
        }
        self.selected = Some(asset);
        self.url = None;
        self.error = None;
        self.tickets.render = None;
        Vec::new()
    }

    fn on_submit(&mut self) -> Vec<Command> {
        if self.busy {
            tracing::debug!("Upload already in progress, ignoring submit");
            return Vec::new();
        }
        let Some(asset) = self.selected.clone() else {
            self.fail(UserError::new(ErrorKind::Validation, NO_FILE_SELECTED));
            return Vec::new();
        };
        self.busy = true;
        self.error = None;
        let ticket = self.tickets.issue();
        self.tickets.upload = Some(ticket);
        vec![Command::Upload { ticket, asset }]
    }

    fn on_upload_finished(
        &mut self,
        ticket: Ticket,
        result: MemeResult<ContentIdentifier>,
    ) -> Vec<Command> {
        if self.tickets.upload != Some(ticket) {
            tracing::debug!(ticket, "Ignoring stale upload result");
            return Vec::new();
        }
        self.tickets.upload = None;
        match result {
            Ok(cid) => {
                self.cid = Some(cid.clone());
                self.error = None;
                self.refreshing = true;
                vec![Command::StartRefresher, self.request_url(cid)]
            }
            Err(e) => {
                tracing::warn!(error = %e, "Upload failed");
                self.busy = false;
                self.fail(UserError::new(ErrorKind::Upload, UPLOAD_FAILED));
                Vec::new()
            }
        }
    }

    fn on_url_issued(&mut self, ticket: Ticket, result: MemeResult<SignedUrl>) -> Vec<Command> {
        if self.tickets.url != Some(ticket) {
            tracing::debug!(ticket, "Ignoring stale signed URL");
            return Vec::new();
        }
        self.tickets.url = None;
        // A URL for the previous upload must not end a newer upload's busy period.
        if self.tickets.upload.is_none() {
            self.busy = false;
        }
        match result {
            Ok(url) => {
                self.url = Some(url);
                if self.error.as_ref().map(|e| e.kind) == Some(ErrorKind::UrlRefresh) {
                    self.error = None;
                }
                self.rerender()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Keeping last signed URL after refresh failure");
                self.fail(UserError::url_refresh());
                Vec::new()
            }
        }
    }

    fn on_render_finished(&mut self, ticket: Ticket, result: MemeResult<(u32, u32)>) -> Vec<Command> {
        if !self.is_current_render(ticket) {
            tracing::debug!(ticket, "Ignoring superseded render");
            return Vec::new();
        }
        self.tickets.render = None;
        match result {
            Ok(size) => {
                self.canvas_size = size;
                if self.error.as_ref().map(|e| e.kind) == Some(ErrorKind::ImageLoad) {
                    self.error = None;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Render failed");
                self.fail(UserError::new(ErrorKind::ImageLoad, IMAGE_LOAD_FAILED));
            }
        }
        Vec::new()
    }

    fn on_reset(&mut self) -> Vec<Command> {
        let mut commands = vec![Command::CancelPending];
        if self.refreshing {
            commands.push(Command::StopRefresher);
        }
        self.selected = None;
        self.cid = None;
        self.url = None;
        self.busy = false;
        self.error = None;
        self.refreshing = false;
        self.canvas_size = self.default_canvas;
        self.overlays =
            Overlays::for_canvas(self.default_canvas.0, self.default_canvas.1, self.edge_margin);
        self.tickets.upload = None;
        self.tickets.url = None;
        self.tickets.render = None;
        commands
    }

    fn request_url(&mut self, cid: ContentIdentifier) -> Command {
        let ticket = self.tickets.issue();
        self.tickets.url = Some(ticket);
        Command::RequestUrl { ticket, cid }
    }

    /// Render with the current inputs, superseding any render in flight.
    fn rerender(&mut self) -> Vec<Command> {
        let Some(url) = self.url.clone() else {
            return Vec::new();
        };
        let ticket = self.tickets.issue();
        self.tickets.render = Some(ticket);
        vec![Command::Render {
            ticket,
            job: RenderJob {
                url,
                overlays: self.overlays.clone(),
                style: self.style.clone(),
            },
        }]
    }

    fn fail(&mut self, error: UserError) {
        tracing::debug!(kind = ?error.kind, message = %error.message, "Showing error");
        self.error = Some(error);
    }
}

impl Default for MemeSession {
    fn default() -> Self {
        Self {
            selected: None,
            cid: None,
            url: None,
            overlays: Overlays::default(),
            style: TextStyle::default(),
            busy: false,
            error: None,
            refreshing: false,
            canvas_size: (500, 500),
            default_canvas: (500, 500),
            edge_margin: 40,
            tickets: Tickets::default(),
        }
    }
}

/// The bare message of a validation error, or the full display otherwise.
pub fn validation_message(error: &MemeError) -> String {
    match error {
        MemeError::Validation { message } => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn asset() -> SelectedAsset {
        SelectedAsset {
            file_name: "cat.png".into(),
            media_type: "image/png".into(),
            bytes: vec![1, 2, 3],
            dimensions: Some((800, 600)),
        }
    }

    fn cid() -> ContentIdentifier {
        ContentIdentifier::new("abc123").unwrap()
    }

    fn signed(n: u32) -> SignedUrl {
        SignedUrl::new(format!("https://gw/files/abc123?sig={n}"), Utc::now(), 300)
    }

    fn ticket_of(command: &Command) -> Ticket {
        match command {
            Command::Upload { ticket, .. }
            | Command::RequestUrl { ticket, .. }
            | Command::Render { ticket, .. } => *ticket,
            other => panic!("command has no ticket: {other:?}"),
        }
    }

    /// Session with an uploaded file and a current URL.
    fn uploaded() -> MemeSession {
        let mut session = MemeSession::default();
        session.apply(Event::FileSelected(asset()));
        let upload = session.apply(Event::Submit);
        let cmds = session.apply(Event::UploadFinished {
            ticket: ticket_of(&upload[0]),
            result: Ok(cid()),
        });
        let render = session.apply(Event::UrlIssued {
            ticket: ticket_of(&cmds[1]),
            result: Ok(signed(1)),
        });
        session.apply(Event::RenderFinished {
            ticket: ticket_of(&render[0]),
            result: Ok((800, 600)),
        });
        session
    }

    #[test]
    fn test_submit_without_file_is_local() {
        let mut session = MemeSession::default();
        let cmds = session.apply(Event::Submit);
        assert!(cmds.is_empty());
        let error = session.error().unwrap();
        assert_eq!(error.kind, ErrorKind::Validation);
        assert_eq!(error.message, NO_FILE_SELECTED);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_file_selection_recenters_overlays() {
        let mut session = MemeSession::default();
        session.apply(Event::FileSelected(asset()));
        assert_eq!(session.overlays().top.position, Position::new(400, 40));
        assert_eq!(session.overlays().bottom.position, Position::new(400, 560));
        assert_eq!(session.canvas_size(), (800, 600));
    }

    #[test]
    fn test_successful_upload_requests_exactly_one_url() {
        let mut session = MemeSession::default();
        session.apply(Event::FileSelected(asset()));
        let upload = session.apply(Event::Submit);
        assert!(session.is_busy());

        let cmds = session.apply(Event::UploadFinished {
            ticket: ticket_of(&upload[0]),
            result: Ok(cid()),
        });
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0], Command::StartRefresher);
        assert!(matches!(&cmds[1], Command::RequestUrl { cid: c, .. } if c.as_str() == "abc123"));
        assert!(session.is_refreshing());
        // Still busy until the first URL arrives.
        assert!(session.is_busy());

        let cmds = session.apply(Event::UrlIssued {
            ticket: ticket_of(&cmds[1]),
            result: Ok(signed(1)),
        });
        assert!(!session.is_busy());
        assert!(matches!(cmds.as_slice(), [Command::Render { .. }]));
    }

    #[test]
    fn test_submit_while_busy_is_ignored() {
        let mut session = MemeSession::default();
        session.apply(Event::FileSelected(asset()));
        assert_eq!(session.apply(Event::Submit).len(), 1);
        assert!(session.apply(Event::Submit).is_empty());
    }

    #[test]
    fn test_url_for_previous_upload_keeps_new_upload_busy() {
        let mut session = uploaded();
        session.apply(Event::FileSelected(asset()));
        let upload = session.apply(Event::Submit);
        assert!(session.is_busy());

        assert!(session.apply(Event::RefreshTick).is_empty());

        let retry = session.apply(Event::RetryUrl);
        session.apply(Event::UrlIssued {
            ticket: ticket_of(&retry[0]),
            result: Ok(signed(2)),
        });
        assert!(session.is_busy());
        assert!(session.apply(Event::Submit).is_empty());

        let cmds = session.apply(Event::UploadFinished {
            ticket: ticket_of(&upload[0]),
            result: Ok(cid()),
        });
        session.apply(Event::UrlIssued {
            ticket: ticket_of(&cmds[1]),
            result: Ok(signed(3)),
        });
        assert!(!session.is_busy());
    }

    #[test]
    fn test_upload_failure_shows_generic_message() {
        let mut session = MemeSession::default();
        session.apply(Event::FileSelected(asset()));
        let upload = session.apply(Event::Submit);
        let cmds = session.apply(Event::UploadFinished {
            ticket: ticket_of(&upload[0]),
            result: Err(MemeError::upload("HTTP 500")),
        });
        assert!(cmds.is_empty());
        assert!(!session.is_busy());
        assert!(session.cid().is_none());
        assert_eq!(session.error().unwrap().message, UPLOAD_FAILED);
    }

    #[test]
    fn test_failed_refresh_keeps_url_and_offers_retry() {
        let mut session = uploaded();
        let request = session.apply(Event::RefreshTick);
        let cmds = session.apply(Event::UrlIssued {
            ticket: ticket_of(&request[0]),
            result: Err(MemeError::signed_url("HTTP 503")),
        });
        assert!(cmds.is_empty());
        assert!(session.url().unwrap().as_str().ends_with("sig=1"));

        let error = session.error().unwrap().clone();
        assert_eq!(error.message, URL_REFRESH_FAILED);
        assert_eq!(error.action.map(RetryAction::label), Some("Refresh URL"));

        let retry = session.apply(Event::RetryUrl);
        assert!(matches!(&retry[0], Command::RequestUrl { cid: c, .. } if c.as_str() == "abc123"));
        session.apply(Event::UrlIssued {
            ticket: ticket_of(&retry[0]),
            result: Ok(signed(2)),
        });
        assert!(session.error().is_none());
        assert!(session.url().unwrap().as_str().ends_with("sig=2"));
    }

    #[test]
    fn test_retry_without_cid_never_requests() {
        let mut session = MemeSession::default();
        assert!(session.apply(Event::RetryUrl).is_empty());
        assert_eq!(session.error().unwrap().message, NOTHING_UPLOADED);
        assert!(session.apply(Event::RefreshTick).is_empty());
    }

    #[test]
    fn test_edits_render_only_with_a_url() {
        let mut session = MemeSession::default();
        assert!(session.apply(Event::SetText(OverlaySlot::Top, "hi".into())).is_empty());
        assert_eq!(session.overlays().top.text, "hi");

        let mut session = uploaded();
        let cmds = session.apply(Event::SetText(OverlaySlot::Bottom, "there".into()));
        let Command::Render { job, .. } = &cmds[0] else {
            panic!("expected a render, got {cmds:?}");
        };
        assert_eq!(job.overlays.bottom.text, "there");
    }

    #[test]
    fn test_superseded_render_is_ignored() {
        let mut session = uploaded();
        let first = session.apply(Event::SetText(OverlaySlot::Top, "one".into()));
        let second = session.apply(Event::SetText(OverlaySlot::Top, "two".into()));
        let (old, new) = (ticket_of(&first[0]), ticket_of(&second[0]));
        assert!(!session.is_current_render(old));

        session.apply(Event::RenderFinished {
            ticket: old,
            result: Err(MemeError::image_load("expired")),
        });
        assert!(session.error().is_none());
        assert!(session.has_pending_tasks());

        session.apply(Event::RenderFinished {
            ticket: new,
            result: Ok((800, 600)),
        });
        assert!(!session.has_pending_tasks());
    }

    #[test]
    fn test_render_failure_reports_image_load() {
        let mut session = uploaded();
        let cmds = session.apply(Event::Redraw);
        session.apply(Event::RenderFinished {
            ticket: ticket_of(&cmds[0]),
            result: Err(MemeError::image_load("403")),
        });
        assert_eq!(session.error().unwrap().message, IMAGE_LOAD_FAILED);
        assert_eq!(session.error().unwrap().kind, ErrorKind::ImageLoad);
    }

    #[test]
    fn test_style_edits_are_validated() {
        let mut session = MemeSession::default();
        session.apply(Event::SetFontSize(500));
        assert_eq!(session.style().font_size, 100);
        session.apply(Event::SetFontSize(1));
        assert_eq!(session.style().font_size, 10);

        session.apply(Event::SetFillColor("#00ff00".into()));
        assert_eq!(session.style().fill, Color::rgb(0, 255, 0));
        session.apply(Event::SetFillColor("green".into()));
        assert_eq!(session.style().fill, Color::rgb(0, 255, 0));
        assert_eq!(session.error().unwrap().kind, ErrorKind::Validation);

        session.apply(Event::SetFontFamily("  Arial ".into()));
        assert_eq!(session.style().font_family, "Arial");
        session.apply(Event::SetFontFamily("   ".into()));
        assert_eq!(session.style().font_family, "Arial");
    }

    #[test]
    fn test_reset_stops_refresh_and_drops_late_results() {
        let mut session = uploaded();
        let request = session.apply(Event::RefreshTick);
        let cmds = session.apply(Event::Reset);
        assert_eq!(cmds, vec![Command::CancelPending, Command::StopRefresher]);
        assert!(session.cid().is_none());
        assert!(!session.is_refreshing());
        assert_eq!(session.canvas_size(), (500, 500));

        let late = session.apply(Event::UrlIssued {
            ticket: ticket_of(&request[0]),
            result: Ok(signed(9)),
        });
        assert!(late.is_empty());
        assert!(session.url().is_none());
    }

    #[test]
    fn test_download_needs_a_url() {
        let mut session = MemeSession::default();
        assert!(session.apply(Event::Download).is_empty());

        let mut session = uploaded();
        assert_eq!(session.apply(Event::Download), vec![Command::Export]);
        session.apply(Event::FileSelected(asset()));
        assert!(session.apply(Event::Download).is_empty());
    }

    #[test]
    fn test_from_defaults_rejects_bad_colour() {
        let defaults = RenderDefaults {
            fill_color: "white".into(),
            ..RenderDefaults::default()
        };
        assert!(MemeSession::from_defaults(&defaults).is_err());
        let session = MemeSession::from_defaults(&RenderDefaults::default()).unwrap();
        assert_eq!(session.style().font_shorthand(), "30px Impact");
        assert_eq!(session.overlays().bottom.position, Position::new(250, 460));
    }
}
