use crate::input::LineSource;
use anyhow::Context;
use core_types::Command;
use executor::{CommandEngine, Execution};
use std::io::Write;
use tracing::{debug, info, trace};

/// Counters for one replay of the command stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub lines: usize,
    /// Commands the engine accepted, queries included.
    pub executed: usize,
    /// Accepted commands that changed state and were written to the execution log.
    pub logged: usize,
    pub rejected: usize,
    /// Lines that did not parse as any command.
    pub ignored: usize,
}

/// Drives the engine from a line source and records executed commands.
pub struct Session<W: Write> {
    engine: CommandEngine,
    executed_log: W,
    stats: SessionStats,
}

impl<W: Write> Session<W> {
    pub fn new(engine: CommandEngine, executed_log: W) -> Self {
        Self {
            engine,
            executed_log,
            stats: SessionStats::default(),
        }
    }

    /// Processes lines until the source is exhausted.
    pub fn run(&mut self, source: &mut dyn LineSource) -> anyhow::Result<SessionStats> {
        source.on_start().context("Failed to write to the console")?;

        while let Some(line) = source.next_line().context("Failed to read command input")? {
            if let Some(answer) = self.process_line(&line)?.as_ref().and_then(query_answer) {
                source.answer(&answer).context("Failed to write to the console")?;
            }
        }

        source.on_finish().context("Failed to write to the console")?;
        self.executed_log
            .flush()
            .context("Failed to flush the execution log")?;
        Ok(self.stats)
    }

    /// Parses and applies one line. The line is appended verbatim to the execution log
    /// only if it executed and changed state.
    pub fn process_line(&mut self, line: &str) -> anyhow::Result<Option<Execution>> {
        self.stats.lines += 1;

        let command = Command::parse(line);
        if command.is_unknown() {
            trace!(line = line.trim_end(), "Ignoring unrecognized line");
            self.stats.ignored += 1;
            return Ok(None);
        }

        match self.engine.execute(&command) {
            Ok(execution) => {
                self.stats.executed += 1;
                if execution.mutates_state() {
                    self.executed_log
                        .write_all(line.as_bytes())
                        .context("Failed to write to the execution log")?;
                    self.stats.logged += 1;
                }
                if let Execution::Queried {
                    symbol,
                    price,
                    threshold,
                    below_threshold,
                } = &execution
                {
                    info!(symbol = symbol.as_str(), %price, %threshold, below_threshold, "Query");
                }
                Ok(Some(execution))
            }
            Err(rejection) => {
                debug!(%command, %rejection, "Command not executed");
                self.stats.rejected += 1;
                Ok(None)
            }
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (CommandEngine, W) {
        (self.engine, self.executed_log)
    }

    pub fn engine(&self) -> &CommandEngine {
        &self.engine
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}

/// Text shown to an interactive user for a query; `None` for every other execution.
fn query_answer(execution: &Execution) -> Option<String> {
    match execution {
        Execution::Queried {
            symbol,
            price,
            threshold,
            below_threshold,
        } => {
            let relation = if *below_threshold {
                "at or below"
            } else {
                "above"
            };
            Some(format!("{} {} is {} threshold {}", symbol, price, relation, threshold))
        }
        _ => None,
    }
}
