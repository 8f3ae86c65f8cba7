use crate::config::defaults::RATE_LIMIT_DELAY;
use crate::core::channel::ChannelEntry;
use crate::core::slack::SlackApi;
use crate::utils::{Result, RunLog, SweepError};
use dialoguer::Select;
use std::cell::Cell;
use std::fmt;
use std::thread;
use std::time::Duration;

/// Per-channel classification of one archive attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The archive call succeeded.
    Archived,
    /// `already_archived` — idempotent no-op, counted as success.
    AlreadyArchived,
    /// `channel_not_found` — skip, counted as success.
    NotFound,
    /// Dry-run mode, no API call issued.
    Simulated,
    /// `missing_scope` — the token lacks a required permission. Fatal for
    /// this item, non-aborting for the run.
    MissingScope,
    /// Any other API or network-level failure.
    Failed(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::MissingScope | Outcome::Failed(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Archived => write!(f, "archived"),
            Outcome::AlreadyArchived => write!(f, "already archived"),
            Outcome::NotFound => write!(f, "channel not found (skipped)"),
            Outcome::Simulated => write!(f, "dry run, would archive"),
            Outcome::MissingScope => write!(f, "failed: missing required scope"),
            Outcome::Failed(code) => write!(f, "failed: {code}"),
        }
    }
}

/// Counters accumulated over one run; live only in memory and in the final
/// terminal summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

impl BatchResult {
    fn tally(&mut self, outcome: &Outcome) {
        self.total += 1;
        if outcome.is_success() {
            self.success += 1;
        } else {
            self.failed += 1;
        }
    }

    fn merge(&mut self, other: BatchResult) {
        self.total += other.total;
        self.success += other.success;
        self.failed += other.failed;
    }
}

/// Operator decision at a batch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    /// Advance past this batch without calling the API.
    SkipBatch,
    /// Terminate the run; log entries written so far remain valid.
    Abort,
}

/// Confirmation hook invoked before each batch in live CSV mode.
pub trait BatchGate {
    fn confirm(&mut self, batch_no: usize, batch_len: usize, remaining: usize)
        -> Result<GateDecision>;
}

/// Terminal prompt with the three-way proceed/skip/abort choice.
pub struct InteractiveGate;

impl BatchGate for InteractiveGate {
    fn confirm(
        &mut self,
        batch_no: usize,
        batch_len: usize,
        remaining: usize,
    ) -> Result<GateDecision> {
        let choice = Select::new()
            .with_prompt(format!(
                "Batch {batch_no}: archive {batch_len} channels ({remaining} remaining after this batch)?"
            ))
            .items(&["Archive this batch", "Skip this batch", "Abort the run"])
            .default(0)
            .interact()
            .map_err(|e| SweepError::invalid_args(format!("failed to read input: {e}")))?;

        Ok(match choice {
            0 => GateDecision::Proceed,
            1 => GateDecision::SkipBatch,
            _ => GateDecision::Abort,
        })
    }
}

/// Gate that always proceeds, for non-interactive runs.
pub struct AutoProceed;

impl BatchGate for AutoProceed {
    fn confirm(&mut self, _: usize, _: usize, _: usize) -> Result<GateDecision> {
        Ok(GateDecision::Proceed)
    }
}

/// Sequential archiver: one API call per entry, fixed inter-call delay, one
/// log line per entry. No parallelism and no shared state beyond the log
/// file and the in-memory counters.
pub struct Archiver<'a, C: SlackApi> {
    client: &'a C,
    log: &'a mut RunLog,
    dry_run: bool,
    verify: bool,
    delay: Duration,
    called: Cell<bool>,
}

impl<'a, C: SlackApi> Archiver<'a, C> {
    pub fn new(client: &'a C, log: &'a mut RunLog, dry_run: bool) -> Self {
        Self {
            client,
            log,
            dry_run,
            verify: false,
            delay: RATE_LIMIT_DELAY,
            called: Cell::new(false),
        }
    }

    /// Check `conversations.info` before each live archive call and skip
    /// channels already archived server-side.
    pub fn verify_status(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    #[cfg(test)]
    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[cfg(test)]
    fn without_delay(self) -> Self {
        self.with_delay(Duration::ZERO)
    }

    /// Rate-limit pause in front of every API call after the first, so any
    /// two consecutive calls are separated — across batch boundaries and
    /// within a verify-then-archive pair alike.
    fn throttle(&self) {
        if self.called.replace(true) {
            thread::sleep(self.delay);
        }
    }

    /// Archives one entry and classifies the response. In dry-run mode the
    /// entry is reported as simulated without any request going out.
    pub fn archive(&self, entry: &ChannelEntry) -> Outcome {
        if self.dry_run {
            return Outcome::Simulated;
        }

        if self.verify {
            self.throttle();
            match self.client.channel_info(&entry.id) {
                Ok(state) if state.is_archived => return Outcome::AlreadyArchived,
                Ok(_) => {}
                Err(e) => return classify(Err(e)),
            }
        }

        self.throttle();
        classify(self.client.archive_channel(&entry.id))
    }

    /// Processes entries sequentially, tallying outcomes and writing one log
    /// line each. Per-item failures never stop the batch.
    pub fn run_batch(&mut self, entries: &[ChannelEntry]) -> Result<BatchResult> {
        let mut result = BatchResult::default();

        for entry in entries {
            let outcome = self.archive(entry);
            result.tally(&outcome);
            self.log.record(&entry.name, &entry.id, &outcome.to_string())?;
            println!("#{} ({}): {}", entry.name, entry.id, outcome);
        }

        Ok(result)
    }

    /// Chunks entries into fixed-size batches and asks the gate before each
    /// one. The gate is bypassed entirely in dry-run mode. Aborting leaves
    /// the remainder unprocessed and uncounted.
    pub fn run_batches(
        &mut self,
        entries: &[ChannelEntry],
        batch_size: usize,
        gate: &mut dyn BatchGate,
    ) -> Result<BatchResult> {
        let mut result = BatchResult::default();
        let batches: Vec<&[ChannelEntry]> = entries.chunks(batch_size.max(1)).collect();

        for (index, batch) in batches.iter().enumerate() {
            let batch_no = index + 1;
            let remaining: usize = batches[batch_no..].iter().map(|b| b.len()).sum();

            if !self.dry_run {
                match gate.confirm(batch_no, batch.len(), remaining)? {
                    GateDecision::Proceed => {}
                    GateDecision::SkipBatch => {
                        self.log.note(&format!(
                            "batch {batch_no} skipped by operator ({} channels)",
                            batch.len()
                        ))?;
                        continue;
                    }
                    GateDecision::Abort => {
                        self.log.note(&format!(
                            "run aborted by operator before batch {batch_no} ({} channels unprocessed)",
                            remaining + batch.len()
                        ))?;
                        break;
                    }
                }
            }

            result.merge(self.run_batch(batch)?);
        }

        Ok(result)
    }
}

/// Maps the archive-endpoint response onto the outcome categories. Network
/// failures land in the generic failure bucket alongside unclassified API
/// codes.
fn classify(response: Result<()>) -> Outcome {
    match response {
        Ok(()) => Outcome::Archived,
        Err(err) => match err.api_code() {
            Some("already_archived") => Outcome::AlreadyArchived,
            Some("channel_not_found") => Outcome::NotFound,
            Some("missing_scope") => Outcome::MissingScope,
            Some(code) => Outcome::Failed(code.to_string()),
            None => Outcome::Failed(err.to_string()),
        },
    }
}
