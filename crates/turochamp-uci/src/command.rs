//! UCI command parsing.

use std::time::Duration;

use turochamp_engine::Game;

use crate::error::UciError;

/// Parameters for the `go` command.
///
/// All fields are optional; a bare `go` uses defaults.
#[derive(Debug, Clone, Default)]
pub struct GoParams {
    /// White's remaining time.
    pub wtime: Option<Duration>,
    /// Black's remaining time.
    pub btime: Option<Duration>,
    /// White's increment per move.
    pub winc: Option<Duration>,
    /// Black's increment per move.
    pub binc: Option<Duration>,
    /// Moves until next time control.
    pub movestogo: Option<u32>,
    /// Search to this depth only.
    pub depth: Option<u8>,
    /// Search for exactly this duration.
    pub movetime: Option<Duration>,
    /// No time limit; the depth cap still applies.
    pub infinite: bool,
}

/// Upper bound advertised for both depth options.
pub const MAX_OPTION_DEPTH: u8 = 64;

/// Options adjustable through `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UciOption {
    MaxDepth(u8),
    QuiescenceDepth(u8),
}

/// A parsed UCI command.
#[derive(Debug)]
pub enum Command {
    /// `uci` -- identify the engine.
    Uci,
    /// `isready` -- synchronization ping.
    IsReady,
    /// `ucinewgame` -- reset engine state.
    UciNewGame,
    /// `position` -- a game with any listed moves already played.
    Position(Game),
    /// `go` -- search with the given parameters.
    Go(GoParams),
    /// `setoption name <id> value <x>`.
    SetOption(UciOption),
    /// `stop` -- searches run to completion, so there is nothing to halt.
    Stop,
    /// `quit` -- exit the engine.
    Quit,
    /// Unrecognized command (silently ignored per UCI convention).
    Unknown(String),
}

/// Parse a single line of UCI input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = tokens.split_first() else {
        return Ok(Command::Unknown(String::new()));
    };

    match head {
        "uci" => Ok(Command::Uci),
        "isready" => Ok(Command::IsReady),
        "ucinewgame" => Ok(Command::UciNewGame),
        "stop" => Ok(Command::Stop),
        "quit" => Ok(Command::Quit),
        "position" => parse_position(rest),
        "go" => parse_go(rest),
        "setoption" => parse_setoption(rest),
        _ => Ok(Command::Unknown(head.to_string())),
    }
}

/// Parse the `position` command arguments.
///
/// Supports:
/// - `position startpos [moves e2e4 d7d5 ...]`
/// - `position fen <fen-string> [moves e2e4 d7d5 ...]`
fn parse_position(tokens: &[&str]) -> Result<Command, UciError> {
    let moves_at = tokens
        .iter()
        .position(|&t| t == "moves")
        .unwrap_or(tokens.len());
    let (setup, moves) = tokens.split_at(moves_at);

    let mut game = match setup {
        ["startpos"] => Game::new(),
        ["fen", fen @ ..] if !fen.is_empty() => Game::from_fen(&fen.join(" "))?,
        ["fen"] => {
            return Err(UciError::InvalidFen { fen: String::new() });
        }
        _ => return Err(UciError::MalformedPosition),
    };

    for uci_move in moves.iter().skip(1) {
        game.play_uci(uci_move)?;
    }

    Ok(Command::Position(game))
}

/// Parse the `go` command arguments.
///
/// Supports: wtime, btime, winc, binc, movestogo, depth, movetime,
/// infinite. Unknown tokens are silently skipped.
fn parse_go(tokens: &[&str]) -> Result<Command, UciError> {
    let mut params = GoParams::default();

    let mut i = 0;
    while i < tokens.len() {
        let value = tokens.get(i + 1);
        match tokens[i] {
            "wtime" => params.wtime = Some(parse_millis(value, "wtime")?),
            "btime" => params.btime = Some(parse_millis(value, "btime")?),
            "winc" => params.winc = Some(parse_millis(value, "winc")?),
            "binc" => params.binc = Some(parse_millis(value, "binc")?),
            "movestogo" => params.movestogo = Some(parse_int(value, "movestogo")?),
            "depth" => params.depth = Some(parse_int(value, "depth")?),
            "movetime" => params.movetime = Some(parse_millis(value, "movetime")?),
            "infinite" => {
                params.infinite = true;
                i += 1;
                continue;
            }
            _ => {
                // Unknown token -- skip per UCI convention
                i += 1;
                continue;
            }
        }
        i += 2;
    }

    Ok(Command::Go(params))
}

/// Parse `setoption name <id> value <x>`.
fn parse_setoption(tokens: &[&str]) -> Result<Command, UciError> {
    let value_at = tokens
        .iter()
        .position(|&t| t == "value")
        .unwrap_or(tokens.len());
    let name = tokens[..value_at]
        .iter()
        .skip_while(|&&t| t == "name")
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let value = tokens.get(value_at + 1).copied().unwrap_or("");

    let parse_value = |min: u8| {
        value
            .parse::<u8>()
            .ok()
            .filter(|depth| (min..=MAX_OPTION_DEPTH).contains(depth))
            .ok_or_else(|| UciError::InvalidOptionValue {
                name: name.clone(),
                value: value.to_string(),
            })
    };

    let option = match name.to_ascii_lowercase().as_str() {
        "maxdepth" => UciOption::MaxDepth(parse_value(1)?),
        "quiescencedepth" => UciOption::QuiescenceDepth(parse_value(0)?),
        _ => return Err(UciError::UnknownOption { name }),
    };

    Ok(Command::SetOption(option))
}

/// Parse a millisecond value from a token.
fn parse_millis(token: Option<&&str>, param: &str) -> Result<Duration, UciError> {
    parse_int(token, param).map(Duration::from_millis)
}

/// Parse an integer value from a token.
fn parse_int<T: std::str::FromStr>(token: Option<&&str>, param: &str) -> Result<T, UciError> {
    let value = token.ok_or_else(|| UciError::MissingGoValue {
        param: param.to_string(),
    })?;
    value.parse().map_err(|_| UciError::InvalidGoValue {
        param: param.to_string(),
        value: value.to_string(),
    })
}
