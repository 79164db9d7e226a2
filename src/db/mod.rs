//! Database abstraction layer.
//!
//! This module provides database access functionality:
//! - Session opening from a resolved configuration (`connector`)
//! - Per-request sessions with scoped release (`session`)
//! - Value rendering from driver types to text (`types`)
//!
//! There is no pooling: every operation opens its own physical connection and
//! closes it before returning.

pub mod connector;
pub mod session;
pub mod types;

pub use connector::{Connector, MySqlConnector};
pub use session::{MySqlSession, Session};
