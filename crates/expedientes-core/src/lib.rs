pub mod classifier;
pub mod config;
pub mod error;
pub mod gap_filler;
pub mod rules;
pub mod search;
pub mod sequence;
pub mod stage;
pub mod store;
pub mod timeline;
pub mod types;
pub mod vocabulary;

pub use error::{ExpedienteError, Result};
