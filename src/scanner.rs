//! Drives every source line against the instruction list.
//!
//! Instruction order is significant: each line is credited to the *first*
//! instruction in the list that matches it and is not tested against the rest.

use crate::{
    error::ScanError, instruction::Instruction, lexer::read_lines, line::Line,
    policy::MatchPolicy,
};
use std::{
    io::BufRead,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

/// A source line together with the index of the instruction it was credited to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    line: Line,
    instruction_index: usize,
}

impl Hit {
    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn instruction_index(&self) -> usize {
        self.instruction_index
    }
}

/// Outcome of a scan. Owns its own copy of the instruction list, so running
/// another scan never sees the matches of this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    instructions: Vec<Instruction>,
    hits: Vec<Hit>,
    lines_scanned: usize,
}

impl ScanReport {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Every matched line in source order.
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    pub fn result_lines(&self) -> impl Iterator<Item = &Line> {
        self.hits.iter().map(Hit::line)
    }

    /// `None` if `hit` came from a scan over a different instruction list.
    pub fn instruction_for(&self, hit: &Hit) -> Option<&Instruction> {
        self.instructions.get(hit.instruction_index)
    }

    pub fn lines_scanned(&self) -> usize {
        self.lines_scanned
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scanner {
    policy: MatchPolicy,
    cancel: Option<Arc<AtomicBool>>,
}

impl Scanner {
    pub fn new(policy: MatchPolicy) -> Scanner {
        Scanner {
            policy,
            cancel: None,
        }
    }

    /// The flag is polled once per line; setting it stops the scan with
    /// [`ScanError::Cancelled`].
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Scanner {
        self.cancel = Some(flag);
        self
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Scans `lines` against `instructions` in list order and returns a fresh
    /// report. The input instructions are not modified.
    pub fn scan<I>(&self, lines: I, instructions: &[Instruction]) -> Result<ScanReport, ScanError>
    where
        I: IntoIterator<Item = Line>,
    {
        self.scan_results(lines.into_iter().map(Ok), instructions)
    }

    /// Like [`Scanner::scan`], streaming the lines out of `reader`.
    pub fn scan_reader<R>(
        &self,
        reader: R,
        instructions: &[Instruction],
    ) -> Result<ScanReport, ScanError>
    where
        R: BufRead,
    {
        self.scan_results(
            read_lines(reader).map(|line| line.map_err(ScanError::from)),
            instructions,
        )
    }

    /// Scans directly into `instructions`, clearing their previous matches
    /// first. If the scan is cancelled every instruction is left cleared.
    pub fn scan_in_place<I>(
        &self,
        lines: I,
        instructions: &mut [Instruction],
    ) -> Result<Vec<Hit>, ScanError>
    where
        I: IntoIterator<Item = Line>,
    {
        match self.run(lines.into_iter().map(Ok), instructions) {
            Ok((hits, _)) => Ok(hits),
            Err(e) => {
                instructions.iter_mut().for_each(Instruction::clear_matches);
                Err(e)
            }
        }
    }

    fn scan_results<I>(
        &self,
        lines: I,
        instructions: &[Instruction],
    ) -> Result<ScanReport, ScanError>
    where
        I: IntoIterator<Item = Result<Line, ScanError>>,
    {
        let mut instructions = instructions.to_vec();
        let (hits, lines_scanned) = self.run(lines, &mut instructions)?;

        Ok(ScanReport {
            instructions,
            hits,
            lines_scanned,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::Relaxed))
    }

    fn run<I>(
        &self,
        lines: I,
        instructions: &mut [Instruction],
    ) -> Result<(Vec<Hit>, usize), ScanError>
    where
        I: IntoIterator<Item = Result<Line, ScanError>>,
    {
        instructions.iter_mut().for_each(Instruction::clear_matches);

        let lines = lines.into_iter();

        tracing::debug!(
            lines = exact_len(&lines),
            instructions = instructions.len(),
            policy = %self.policy,
            "starting scan"
        );

        let mut hits = Vec::new();
        let mut lines_scanned = 0;

        for line in lines {
            if self.is_cancelled() {
                tracing::warn!(lines_scanned, "scan cancelled");
                return Err(ScanError::Cancelled { lines_scanned });
            }

            let line = line?;
            lines_scanned += 1;

            let policy = self.policy;
            if let Some(instruction_index) = instructions
                .iter_mut()
                .position(|instruction| instruction.match_line(&line, policy))
            {
                hits.push(Hit {
                    line,
                    instruction_index,
                });
            }
        }

        tracing::info!(lines_scanned, hits = hits.len(), "scan finished");

        Ok((hits, lines_scanned))
    }
}

/// The number of items left, when the iterator knows it exactly. Streamed
/// sources don't.
fn exact_len<I>(iter: &I) -> Option<usize>
where
    I: Iterator,
{
    match iter.size_hint() {
        (lower, Some(upper)) if lower == upper => Some(lower),
        _ => None,
    }
}
