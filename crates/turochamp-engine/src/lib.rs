//! Search and evaluation for turochamp.

pub mod config;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod time;

pub use chess::Color;
pub use config::SearchConfig;
pub use error::RulesError;
pub use eval::evaluate;
pub use rules::{CastleSide, Game, Move, Rules};
pub use search::control::SearchControl;
pub use search::negamax::{MATE_SCORE, MATE_THRESHOLD};
pub use search::{SearchResult, SearchStats, Searcher, think};
pub use time::control_from_go;
