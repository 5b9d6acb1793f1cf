//! Textual report: one framed trace plus summary per algorithm run.
//!
//! Lines are written and flushed one at a time, each followed by a paced
//! wait for the interval's length, so the trace unfolds as if live.

use std::io::{self, Write};

use crate::models::{Interval, Process, Summary};
use crate::pacing::Pacer;
use crate::scheduler::{Algorithm, AlgorithmRun};

const RULE_HEAVY: &str = "══════════════════════════════════════════════";
const RULE_LIGHT: &str = "──────────────────────────────────────────────";

/// Render a single trace line (without newline).
pub fn format_interval(interval: &Interval, processes: &[Process]) -> String {
    match *interval {
        Interval::Idle { start, end } => format!("{} → {}: Idle.", start, end),
        Interval::Running {
            start,
            end,
            process,
        } => match processes.get(process) {
            Some(p) => format!(
                "{} → {}: {} Running {}.",
                start, end, p.name, p.description
            ),
            None => format!("{} → {}: #{} Running.", start, end, process),
        },
    }
}

/// Render the summary metric line (without newline).
pub fn format_summary(summary: &Summary) -> String {
    match summary {
        Summary::MeanWaitingTime(mean) => {
            format!("   └─ Average Waiting Time : {:.2} time units", mean)
        }
        Summary::TotalTurnaround(total) => {
            format!("   └─ Total Turnaround Time : {} time units", total)
        }
    }
}

/// Writes run reports to `out`, pacing each trace line with `pacer`.
pub struct Reporter<W: Write, P: Pacer> {
    out: W,
    pacer: P,
}

impl<W: Write, P: Pacer> Reporter<W, P> {
    pub fn new(out: W, pacer: P) -> Self {
        Self { out, pacer }
    }

    fn header(&mut self, algorithm: Algorithm) -> io::Result<()> {
        writeln!(self.out, "{}", RULE_HEAVY)?;
        writeln!(self.out, ">> Scheduler Mode : {}", algorithm.name())?;
        writeln!(self.out, ">> Engine Status  : Initialized")?;
        writeln!(self.out, "{}", RULE_LIGHT)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    fn footer(&mut self, summary: &Summary) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", RULE_LIGHT)?;
        writeln!(self.out, ">> Engine Status  : Completed")?;
        writeln!(self.out, ">> Summary        :")?;
        writeln!(self.out, "{}", format_summary(summary))?;
        if matches!(summary, Summary::TotalTurnaround(_)) {
            writeln!(self.out)?;
        }
        writeln!(self.out, ">> End of Report")?;
        writeln!(self.out, "{}", RULE_HEAVY)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Emit one run: banner, paced trace, summary.
    pub fn emit(&mut self, run: &AlgorithmRun) -> io::Result<()> {
        self.header(run.algorithm)?;
        for interval in &run.timeline {
            writeln!(self.out, "{}", format_interval(interval, &run.processes))?;
            self.out.flush()?;
            self.pacer.wait(i64::try_from(interval.len()).unwrap_or(i64::MAX));
        }
        self.footer(&run.summary)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
