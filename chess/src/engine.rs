//! Talking to an external UCI engine

use crate::board::Board;
use crate::moves::{Move, MoveList, UciMove};

use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use thiserror::Error;

/// How long the engine may take to exit after `quit` before it is killed
const QUIT_TIMEOUT: Duration = Duration::from_millis(500);

/// Something that picks a move out of a list of candidates
///
/// Returning `None` means "no choice"; the caller must not advance the game in this case.
pub trait MoveSelector {
    fn select(&mut self, board: &Board, candidates: &MoveList) -> Option<Move>;
}

impl<F> MoveSelector for F
where
    F: FnMut(&Board, &MoveList) -> Option<Move>,
{
    fn select(&mut self, board: &Board, candidates: &MoveList) -> Option<Move> {
        self(board, candidates)
    }
}

/// Error talking to the engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cannot spawn engine {path:?}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("engine closed its output")]
    Disconnected,
    #[error("engine did not send {0:?} in time")]
    Timeout(&'static str),
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Engine process settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Path to the engine executable
    pub path: PathBuf,
    /// Command line arguments
    pub args: Vec<String>,
    /// Time to think on each move
    pub movetime: Duration,
    /// Value of the `Threads` option
    pub threads: u32,
    /// Value of the `Hash` option, in megabytes
    pub hash_mb: u32,
    /// Time limit for the whole start-up sequence
    pub handshake_timeout: Duration,
    /// Extra time to wait for `bestmove` on top of `movetime`
    pub reply_grace: Duration,
}

impl EngineConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        EngineConfig {
            path: path.into(),
            args: Vec::new(),
            movetime: Duration::from_millis(150),
            threads: 1,
            hash_mb: 128,
            handshake_timeout: Duration::from_secs(5),
            reply_grace: Duration::from_secs(1),
        }
    }

    pub fn with_args<S: Into<String>>(mut self, args: impl IntoIterator<Item = S>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_movetime(mut self, movetime: Duration) -> Self {
        self.movetime = movetime;
        self
    }

    pub fn with_threads(mut self, threads: u32) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_hash_mb(mut self, hash_mb: u32) -> Self {
        self.hash_mb = hash_mb;
        self
    }

    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }

    pub fn with_reply_grace(mut self, grace: Duration) -> Self {
        self.reply_grace = grace;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new("stockfish")
    }
}

/// Running UCI engine process
///
/// The engine's output is read by a background thread and passed over a channel, so every
/// wait here is bounded by a timeout. Dropping the engine asks it to quit and reaps the process.
#[derive(Debug)]
pub struct UciEngine {
    config: EngineConfig,
    name: Option<String>,
    child: Child,
    stdin: ChildStdin,
    lines: Receiver<String>,
}

impl UciEngine {
    /// Starts the engine and completes the UCI handshake
    pub fn spawn(config: EngineConfig) -> Result<Self, EngineError> {
        let mut child = Command::new(&config.path)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                path: config.path.clone(),
                source,
            })?;
        let (stdin, stdout) = match (child.stdin.take(), child.stdout.take()) {
            (Some(stdin), Some(stdout)) => (stdin, stdout),
            _ => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(EngineError::Disconnected);
            }
        };

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(_) => break,
                };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        let mut engine = UciEngine {
            config,
            name: None,
            child,
            stdin,
            lines: rx,
        };
        engine.handshake()?;
        info!(
            "engine {} started from {:?}",
            engine.name().unwrap_or("<unnamed>"),
            engine.config.path
        );
        Ok(engine)
    }

    fn handshake(&mut self) -> Result<(), EngineError> {
        let deadline = Instant::now() + self.config.handshake_timeout;
        self.send("uci")?;
        let mut name = None;
        self.wait_for("uciok", deadline, |line| {
            if let Some(n) = line.strip_prefix("id name ") {
                name = Some(n.trim().to_string());
            }
            line.trim() == "uciok"
        })?;
        self.name = name;
        self.send(&format!("setoption name Threads value {}", self.config.threads))?;
        self.send(&format!("setoption name Hash value {}", self.config.hash_mb))?;
        self.send("isready")?;
        self.wait_for("readyok", deadline, |line| line.trim() == "readyok")?;
        Ok(())
    }

    /// Engine name reported in the handshake, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn send(&mut self, cmd: &str) -> Result<(), EngineError> {
        debug!("engine <- {}", cmd);
        writeln!(self.stdin, "{}", cmd)?;
        self.stdin.flush()?;
        Ok(())
    }

    fn wait_for(
        &mut self,
        what: &'static str,
        deadline: Instant,
        mut accept: impl FnMut(&str) -> bool,
    ) -> Result<String, EngineError> {
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return Err(EngineError::Timeout(what));
            }
            match self.lines.recv_timeout(left) {
                Ok(line) => {
                    debug!("engine -> {}", line);
                    if accept(&line) {
                        return Ok(line);
                    }
                }
                Err(RecvTimeoutError::Timeout) => return Err(EngineError::Timeout(what)),
                Err(RecvTimeoutError::Disconnected) => return Err(EngineError::Disconnected),
            }
        }
    }

    /// Asks the engine to pick one of `candidates` in position `board`
    ///
    /// The search is restricted with `searchmoves`. Returns `Ok(None)` if there are no
    /// candidates, if the engine has no move, or if it answers with a move outside of the
    /// candidates.
    pub fn choose_move(
        &mut self,
        board: &Board,
        candidates: &MoveList,
    ) -> Result<Option<Move>, EngineError> {
        if candidates.is_empty() {
            return Ok(None);
        }

        // Skips output left over from an earlier search, like a late `bestmove`
        self.send("isready")?;
        let deadline = Instant::now() + self.config.reply_grace;
        self.wait_for("readyok", deadline, |line| line.trim() == "readyok")?;

        let moves: Vec<String> = candidates
            .iter()
            .map(|&mv| UciMove::from_move(mv, board).to_string())
            .collect();
        self.send(&format!("position fen {}", board.as_fen()))?;
        self.send(&format!(
            "go movetime {} searchmoves {}",
            self.config.movetime.as_millis(),
            moves.join(" ")
        ))?;

        let deadline = Instant::now() + self.config.movetime + self.config.reply_grace;
        let line = match self.wait_for("bestmove", deadline, |line| {
            line.split_ascii_whitespace().next() == Some("bestmove")
        }) {
            Ok(line) => line,
            Err(EngineError::Timeout(what)) => {
                let _ = self.send("stop");
                return Err(EngineError::Timeout(what));
            }
            Err(e) => return Err(e),
        };

        let token = line
            .split_ascii_whitespace()
            .nth(1)
            .ok_or_else(|| EngineError::Protocol("no move after \"bestmove\"".to_string()))?;
        if matches!(token, "(none)" | "0000") {
            return Ok(None);
        }
        let uci = UciMove::from_str(token)
            .map_err(|e| EngineError::Protocol(format!("bad move {:?}: {}", token, e)))?;
        let mv = match uci.into_move() {
            Ok(mv) => mv,
            Err(e) => {
                warn!("engine move {} rejected: {}", uci, e);
                return Ok(None);
            }
        };
        if !candidates.contains(&mv) {
            warn!("engine move {} is not among the candidates", uci);
            return Ok(None);
        }
        Ok(Some(mv))
    }
}

impl MoveSelector for UciEngine {
    fn select(&mut self, board: &Board, candidates: &MoveList) -> Option<Move> {
        match self.choose_move(board, candidates) {
            Ok(mv) => mv,
            Err(e) => {
                warn!("engine failed to choose a move: {}", e);
                None
            }
        }
    }
}

impl UciEngine {
    /// Sends `quit` and waits for the engine to exit, killing it after [`QUIT_TIMEOUT`]
    ///
    /// Returns the exit status if the engine has exited by itself.
    fn shutdown(&mut self) -> Option<ExitStatus> {
        let _ = self.send("quit");
        let deadline = Instant::now() + QUIT_TIMEOUT;
        loop {
            match self.child.try_wait() {
                Ok(Some(status)) => return Some(status),
                Ok(None) if Instant::now() < deadline => thread::sleep(Duration::from_millis(10)),
                _ => break,
            }
        }
        warn!("engine did not quit in time, killing it");
        let _ = self.child.kill();
        let _ = self.child.wait();
        None
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        if let Some(status) = self.shutdown() {
            debug!("engine exited with {}", status);
        }
    }
}
