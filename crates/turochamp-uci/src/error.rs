//! UCI protocol errors.

use turochamp_engine::RulesError;

/// Errors that can occur during UCI protocol handling.
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    /// The `position` command is missing `startpos` or `fen` keyword.
    #[error("malformed position command: missing startpos or fen keyword")]
    MalformedPosition,

    /// Failed to parse a FEN string.
    #[error("invalid FEN: {fen}")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
    },

    /// A move in the `position` command is not legal.
    #[error("invalid move: {uci_move}")]
    InvalidMove {
        /// The offending move in UCI notation.
        uci_move: String,
    },

    /// A `go` parameter was given without a value.
    #[error("missing value for go parameter {param}")]
    MissingGoValue { param: String },

    /// A `go` parameter value could not be parsed.
    #[error("invalid value for go parameter {param}: {value}")]
    InvalidGoValue { param: String, value: String },

    /// `setoption` named an option this engine does not have.
    #[error("unknown option: {name}")]
    UnknownOption { name: String },

    /// `setoption` value missing or out of range.
    #[error("invalid value for option {name}: {value}")]
    InvalidOptionValue { name: String, value: String },

    /// An I/O error occurred while talking to the GUI.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl From<RulesError> for UciError {
    fn from(err: RulesError) -> Self {
        match err {
            RulesError::InvalidFen { fen } => UciError::InvalidFen { fen },
            RulesError::IllegalMove { uci_move } => UciError::InvalidMove { uci_move },
        }
    }
}
