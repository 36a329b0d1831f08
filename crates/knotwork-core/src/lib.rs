#![forbid(unsafe_code)]

//! Diagram store with an invertible mutation log.
//!
//! Design goals:
//! - one explicitly constructed [`Store`] owns all node/edge/group state;
//! - every structural mutation appends exactly one [`Restore`] record, which is enough on its own
//!   to undo that mutation;
//! - restore records have a plain `{type, properties}` wire shape ([`RestoreRecord`]) so a log can
//!   be exported and read back through the [`RestoreObjectFactory`].

pub mod document;
pub mod error;
pub mod history;
pub mod restore;
pub mod settings;
pub mod store;

pub use document::Document;
pub use error::{Error, Result};
pub use history::HistoryManager;
pub use restore::{Restore, RestoreObject, RestoreObjectFactory, RestoreRecord};
pub use settings::{CanvasBounds, Settings};
pub use store::{Clipboard, EdgeUpdate, Store};
