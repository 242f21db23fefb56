//! `openpos-app` — the application service.
//!
//! Wires the store, the permission resolver, and the domain crates behind a
//! single permission-gated API. Everything is injected explicitly; there is
//! no ambient global state.

pub mod error;
pub mod seed;
pub mod service;
pub mod session;

pub use error::AppError;
pub use service::Pos;
pub use session::Session;
