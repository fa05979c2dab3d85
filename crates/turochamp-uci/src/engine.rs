//! Synchronous UCI engine loop.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use tracing::{debug, info, warn};

use turochamp_engine::{
    Game, MATE_SCORE, MATE_THRESHOLD, Rules, SearchConfig, Searcher, control_from_go,
};

use crate::command::{Command, GoParams, MAX_OPTION_DEPTH, UciOption, parse_command};
use crate::error::UciError;

/// The UCI engine, holding the current game and the searcher.
///
/// Searches run on the calling thread; `go` blocks until `bestmove` has
/// been written.
pub struct UciEngine {
    game: Game,
    searcher: Searcher,
}

impl UciEngine {
    /// Create a new engine with the starting position.
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            game: Game::new(),
            searcher: Searcher::new(config),
        }
    }

    /// Run the UCI loop on stdin/stdout until `quit` or input closes.
    pub fn run(self) -> Result<(), UciError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the UCI loop over arbitrary input and output streams.
    pub fn run_with<I: BufRead, O: Write>(mut self, input: I, mut output: O) -> Result<(), UciError> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received UCI command");

            match parse_command(trimmed) {
                Ok(Command::Uci) => self.handle_uci(&mut output)?,
                Ok(Command::IsReady) => writeln!(output, "readyok")?,
                Ok(Command::UciNewGame) => self.game = Game::new(),
                Ok(Command::Position(game)) => self.game = game,
                Ok(Command::Go(params)) => self.handle_go(params, &mut output)?,
                Ok(Command::SetOption(option)) => self.handle_setoption(option),
                Ok(Command::Stop) | Ok(Command::Unknown(_)) => {}
                Ok(Command::Quit) => break,
                Err(e) => warn!(error = %e, "UCI parse error"),
            }
            output.flush()?;
        }

        info!("turochamp shutting down");
        Ok(())
    }

    fn handle_uci<O: Write>(&self, output: &mut O) -> io::Result<()> {
        let config = self.searcher.config();
        writeln!(output, "id name turochamp")?;
        writeln!(output, "id author the turochamp developers")?;
        writeln!(
            output,
            "option name MaxDepth type spin default {} min 1 max {MAX_OPTION_DEPTH}",
            config.max_depth
        )?;
        writeln!(
            output,
            "option name QuiescenceDepth type spin default {} min 0 max {MAX_OPTION_DEPTH}",
            config.quiescence_depth
        )?;
        writeln!(output, "uciok")
    }

    fn handle_setoption(&mut self, option: UciOption) {
        let config = self.searcher.config_mut();
        match option {
            UciOption::MaxDepth(depth) => config.max_depth = depth,
            UciOption::QuiescenceDepth(depth) => config.quiescence_depth = depth,
        }
        debug!(?option, "option set");
    }

    fn handle_go<O: Write>(&mut self, params: GoParams, output: &mut O) -> io::Result<()> {
        let control = control_from_go(
            params.wtime,
            params.btime,
            params.winc,
            params.binc,
            params.movestogo,
            params.movetime,
            params.infinite,
            self.game.side_to_move(),
            Arc::new(AtomicBool::new(false)),
        );

        let saved = *self.searcher.config();
        if let Some(depth) = params.depth {
            *self.searcher.config_mut() = saved.with_max_depth(depth);
        }

        let mut written = Ok(());
        let result = self
            .searcher
            .think(&mut self.game, &control, |depth, score, stats, best_move| {
                if written.is_err() {
                    return;
                }
                let elapsed_ms = control.elapsed().as_millis().max(1);
                let nodes = stats.total();
                let nps = u128::from(nodes) * 1000 / elapsed_ms;
                let pv = best_move.map(|mv| format!(" pv {mv}")).unwrap_or_default();
                written = writeln!(
                    output,
                    "info depth {depth} score {} nodes {nodes} nps {nps} time {elapsed_ms}{pv}",
                    format_score(score)
                );
            });

        *self.searcher.config_mut() = saved;
        written?;

        match result.best_move {
            Some(mv) => writeln!(output, "bestmove {mv}"),
            None => writeln!(output, "bestmove 0000"),
        }
    }
}

impl Default for UciEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a score as `cp <n>` or `mate <moves>`.
fn format_score(score: i32) -> String {
    if score.abs() >= MATE_THRESHOLD {
        let plies = MATE_SCORE - score.abs();
        let moves = (plies + 1) / 2;
        format!("mate {}", if score > 0 { moves } else { -moves })
    } else {
        format!("cp {score}")
    }
}
