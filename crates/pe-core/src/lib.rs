pub mod config;
pub mod logging;

pub mod control;
pub mod dictionary;
pub mod download;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod player;
pub mod word;

pub use error::PeError;
pub use pipeline::{Outcome, Pipeline, Progress};
pub use word::Word;
