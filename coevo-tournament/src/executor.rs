//! Match execution boundary - external game engine invocation
//!
//! Level 3/4 - Single-match execution and artifact parsing
//!
//! One match is one isolated run of the external engine process: the two
//! genomes go in as command-line arguments, and the engine writes a
//! tabular result artifact to a uniquely named scratch file which is
//! parsed and removed before the call returns.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use coevo_core::{Agent, GENE_ATTACKERS, GENE_WORKERS};

use crate::outcome::MatchOutcome;

/// Errors from executing or parsing a single match.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("failed to launch engine process: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("engine process exited with status {0}")]
    EngineExit(std::process::ExitStatus),

    #[error("unreadable result artifact {path}: {source}")]
    Artifact {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed result artifact: {0}")]
    Malformed(String),
}

/// Runs one isolated match between two agents.
///
/// Implementations must not mutate the agents; the scratch tag is unique
/// per dispatch and must be used for any filesystem state so concurrent
/// matches never collide.
pub trait MatchExecutor: Sync {
    fn run_match(
        &self,
        left: &Agent,
        right: &Agent,
        scratch_tag: &str,
    ) -> Result<MatchOutcome, ExecutorError>;
}

/// Executor that spawns an external engine process per match.
///
/// The engine is invoked as
/// `<program> <fixed args..> <left genes..> <right genes..> <artifact path>`
/// and is expected to write the result artifact at the given path.
pub struct ProcessExecutor {
    program: String,
    args: Vec<String>,
    scratch_dir: PathBuf,
}

impl ProcessExecutor {
    /// Create an executor for the given engine program and fixed arguments.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            scratch_dir: PathBuf::from("."),
        }
    }

    /// Set the directory for per-match scratch artifacts.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    fn scratch_path(&self, tag: &str) -> PathBuf {
        self.scratch_dir.join(format!("tournament_{tag}.csv"))
    }
}

impl MatchExecutor for ProcessExecutor {
    fn run_match(
        &self,
        left: &Agent,
        right: &Agent,
        scratch_tag: &str,
    ) -> Result<MatchOutcome, ExecutorError> {
        // The guard removes the artifact on every exit path, including
        // parse failures, so failed matches cannot leak disk space.
        let scratch = ScratchFile::new(self.scratch_path(scratch_tag));

        let status = Command::new(&self.program)
            .args(&self.args)
            .args(gene_args(left))
            .args(gene_args(right))
            .arg(scratch.path())
            .status()?;
        if !status.success() {
            return Err(ExecutorError::EngineExit(status));
        }

        let contents = fs::read_to_string(scratch.path()).map_err(|source| {
            ExecutorError::Artifact {
                path: scratch.path().to_path_buf(),
                source,
            }
        })?;
        parse_artifact(&contents)
    }
}

/// Format an agent's genes as engine arguments. The two unit-count genes
/// are integers on the engine side and are passed without a decimal point.
fn gene_args(agent: &Agent) -> Vec<String> {
    agent
        .genes()
        .iter()
        .enumerate()
        .map(|(i, &gene)| {
            if i == GENE_WORKERS || i == GENE_ATTACKERS {
                format!("{}", gene as i64)
            } else {
                format!("{gene}")
            }
        })
        .collect()
}

/// Scoped scratch artifact: the file is removed when the guard drops.
struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        // Nothing to do if the engine never produced the file.
        let _ = fs::remove_file(&self.path);
    }
}

/// Columns every per-game row must provide.
const REQUIRED_COLUMNS: [&str; 5] = ["map", "ai1", "ai2", "winner", "time"];

/// Parse a result artifact into a match outcome.
///
/// The artifact is line-oriented: a header row naming at least
/// `map/ai1/ai2/winner/time`, one row per game, and an optional trailing
/// summary block starting at a `Wins:` line. The summary is ignored;
/// wins, ties and times are recomputed from the per-game rows. `winner`
/// is 0 or 1 for the side that won, -1 for a tie.
pub fn parse_artifact(contents: &str) -> Result<MatchOutcome, ExecutorError> {
    let mut lines = contents.lines();

    let (header, delimiter) = loop {
        let line = lines
            .next()
            .ok_or_else(|| ExecutorError::Malformed("no header row found".into()))?;
        let delimiter = if line.contains('\t') { '\t' } else { ',' };
        if REQUIRED_COLUMNS.iter().all(|col| {
            line.split(delimiter).any(|field| field.trim() == *col)
        }) {
            break (line, delimiter);
        }
    };

    let columns: Vec<&str> = header.split(delimiter).map(str::trim).collect();
    let col = |name: &str| {
        columns
            .iter()
            .position(|c| *c == name)
            .ok_or_else(|| ExecutorError::Malformed(format!("missing column {name}")))
    };
    let ai1_col = col("ai1")?;
    let ai2_col = col("ai2")?;
    let winner_col = col("winner")?;
    let time_col = col("time")?;

    let mut wins = [0u32; 2];
    let mut ties = 0u32;
    let mut win_times: [Vec<f64>; 2] = [Vec::new(), Vec::new()];
    let mut loss_times: [Vec<f64>; 2] = [Vec::new(), Vec::new()];

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        // Summary block ("Wins:", "Ties:", ...) follows the game rows and
        // is deliberately ignored.
        if trimmed.starts_with("Wins:") {
            break;
        }

        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();
        let field = |idx: usize| {
            fields.get(idx).copied().ok_or_else(|| {
                ExecutorError::Malformed(format!("short row: {line:?}"))
            })
        };
        let parse_num = |raw: &str, what: &str| {
            raw.parse::<f64>().map_err(|_| {
                ExecutorError::Malformed(format!("bad {what} value {raw:?}"))
            })
        };

        let ai1 = parse_num(field(ai1_col)?, "ai1")? as i64;
        let ai2 = parse_num(field(ai2_col)?, "ai2")? as i64;
        let winner = parse_num(field(winner_col)?, "winner")? as i64;
        let time = parse_num(field(time_col)?, "time")?;

        match winner {
            -1 => ties += 1,
            0 | 1 => {
                for side in 0..2i64 {
                    let won = (ai1 == side && winner == 0) || (ai2 == side && winner == 1);
                    let lost = (ai1 == side && winner == 1) || (ai2 == side && winner == 0);
                    if won {
                        wins[side as usize] += 1;
                        win_times[side as usize].push(time);
                    } else if lost {
                        loss_times[side as usize].push(time);
                    }
                }
            }
            other => {
                return Err(ExecutorError::Malformed(format!(
                    "unexpected winner value {other}"
                )))
            }
        }
    }

    let mean = |times: &[f64], empty: f64| {
        if times.is_empty() {
            empty
        } else {
            times.iter().sum::<f64>() / times.len() as f64
        }
    };

    Ok(MatchOutcome {
        wins,
        ties,
        mean_win_time: [
            mean(&win_times[0], f64::INFINITY),
            mean(&win_times[1], f64::INFINITY),
        ],
        mean_loss_time: [mean(&loss_times[0], 0.0), mean(&loss_times[1], 0.0)],
        success: true,
    })
}
