//! projtrack-core library.
//!
//! # Conventions
//!
//! - **Errors**: fallible operations return [`error::Result`] with a
//!   [`error::TrackerError`]; form validation returns [`form::FieldErrors`]
//!   instead of failing.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod collection;
pub mod config;
pub mod error;
pub mod form;
pub mod lock;
pub mod model;
pub mod route;
pub mod seed;
pub mod storage;
pub mod store;
pub mod view;
