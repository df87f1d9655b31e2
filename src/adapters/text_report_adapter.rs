//! Plain-text report adapter.
//!
//! Renders the ranked table plus the buy list with one rationale line
//! per pick. Stdout by default, a file when an output path is given.

use crate::domain::engine::{PickReport, RunStatus};
use crate::domain::error::PickError;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::io::Write;
use std::path::Path;

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn render(report: &PickReport) -> String {
        let mut out = String::new();

        out.push_str(&format!("trendpick {}\n", report.as_of));

        let regime = &report.regime;
        match (regime.benchmark_last, regime.benchmark_ma_long, regime.benchmark_ma_short) {
            (Some(last), Some(ma_long), Some(ma_short)) => {
                out.push_str(&format!(
                    "regime: {} / short-term {} (benchmark {:.2}, MA200 {:.2}, MA50 {:.2})\n",
                    if regime.risk_on { "risk-on" } else { "risk-off" },
                    if regime.risk_on_short { "on" } else { "off" },
                    last,
                    ma_long,
                    ma_short,
                ));
            }
            _ => {
                out.push_str("regime: unavailable (benchmark history too short), assuming risk-on\n");
            }
        }

        out.push_str(&format!(
            "calendar: {} days left in month{}\n",
            report.calendar.days_remaining,
            if report.calendar.late_mode {
                " (late mode)"
            } else {
                ""
            }
        ));
        out.push('\n');

        if report.shown.is_empty() {
            out.push_str("no candidates had sufficient, usable history\n");
            return out;
        }

        out.push_str(
            "rank ticker    close      60d     20d     10d    vol   score  elig\n",
        );
        for (i, c) in report.shown.iter().enumerate() {
            out.push_str(&format!(
                "{:>4} {:<8} {:>8.2} {:>7.1}% {:>6.1}% {:>6.1}% {:>5.2}% {:>7.3}  {}\n",
                i + 1,
                c.ticker,
                c.last_close,
                c.ret_60d * 100.0,
                c.ret_20d * 100.0,
                c.ret_10d * 100.0,
                c.volatility * 100.0,
                c.score,
                if c.eligible { "yes" } else { "no" },
            ));
        }
        out.push('\n');

        match report.status {
            RunStatus::NoPicks => {
                out.push_str("no picks: no eligible candidates this run\n");
            }
            RunStatus::Picks => {
                out.push_str(&format!("BUY ({}):\n", report.buys.len()));
                for c in &report.buys {
                    out.push_str(&format!("  {}: {}\n", c.ticker, c.rationale()));
                }
                if !report.relaxed.is_empty() {
                    out.push_str(&format!(
                        "  note: correlation cap relaxed to fill quota: {}\n",
                        report.relaxed.join(", ")
                    ));
                }
            }
        }
        out
    }
}

impl ReportPort for TextReportAdapter {
    fn write(&self, report: &PickReport, output_path: Option<&Path>) -> Result<(), PickError> {
        let rendered = Self::render(report);
        match output_path {
            Some(path) => fs::write(path, rendered).map_err(PickError::Io),
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes()).map_err(PickError::Io)
            }
        }
    }
}
