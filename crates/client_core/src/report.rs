//! Battle-report presentation: per-line keyword classification and timestamp
//! formatting. The report text itself is opaque server narrative.

use chrono::NaiveDateTime;
use shared::protocol::BattleReportResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLineKind {
    BattleStart,
    Attack,
    Roll,
    Defeat,
    BattleEnd,
    Narration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub kind: ReportLineKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedReport {
    pub timestamp_label: Option<String>,
    pub winner: Option<String>,
    pub loser: Option<String>,
    pub lines: Vec<ReportLine>,
}

pub fn classify_report_line(line: &str) -> ReportLineKind {
    if line.contains("begin to fight!") {
        ReportLineKind::BattleStart
    } else if line.contains("has been defeated!") {
        ReportLineKind::Defeat
    } else if line.contains("now attacks") {
        ReportLineKind::Attack
    } else if line.contains("rolls a") && (line.contains("to attack") || line.contains("to defend"))
    {
        ReportLineKind::Roll
    } else if line.contains("The battle is over!") {
        ReportLineKind::BattleEnd
    } else {
        ReportLineKind::Narration
    }
}

/// Formats the server's compact battle timestamp (`YYYYMMDDHHMMSS`, with or
/// without the `_` separator the backend emits) as
/// `YYYY-MM-DD at HH:MM:SS`. Unparseable input yields `None`.
pub fn format_report_timestamp(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 14 {
        return None;
    }

    let parsed = NaiveDateTime::parse_from_str(&digits, "%Y%m%d%H%M%S").ok()?;
    Some(parsed.format("%Y-%m-%d at %H:%M:%S").to_string())
}

pub fn format_battle_report(report: &BattleReportResponse) -> FormattedReport {
    let lines = report
        .content
        .lines()
        .map(|line| ReportLine {
            kind: classify_report_line(line),
            text: line.to_string(),
        })
        .collect();

    FormattedReport {
        timestamp_label: report
            .timestamp
            .as_deref()
            .and_then(format_report_timestamp),
        winner: report.winner.clone(),
        loser: report.loser.clone(),
        lines,
    }
}
