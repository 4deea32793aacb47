//! memegen session
//!
//! One meme-making session, from file selection to download.
//!
//! ```text
//!        Event ──► MemeSession::apply ──► Vec<Command>
//!          ▲                                   │
//!          │                                   ▼
//!   task outcomes ◄── SessionDriver ──► upload / sign / render tasks
//!          ▲                                   │
//!          └──────── RefreshTimer ◄────────────┘ (while a cid is held)
//! ```
//!
//! [`MemeSession`] is a plain state machine with no I/O. [`SessionDriver`]
//! runs the commands it returns on tokio, keeps at most one task of each
//! kind alive, and owns the rendered [`CanvasSurface`].
//!
//! [`CanvasSurface`]: memegen_render_engine::CanvasSurface

pub mod driver;
pub mod refresher;
pub mod state;

pub use driver::{SessionDriver, SessionSettings};
pub use refresher::RefreshTimer;
pub use state::{
    Command, ErrorKind, Event, MemeSession, RenderJob, RetryAction, Ticket, UserError,
    UPLOAD_FAILED, URL_REFRESH_FAILED,
};
