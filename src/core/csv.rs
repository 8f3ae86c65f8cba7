//! Minimal CSV handling for the three input shapes the tool consumes: the
//! to-archive list, the master name-to-ID list, and the Slack admin export.
//! All three are header-prefixed; quoted fields with embedded commas are
//! honored.

use crate::core::channel::{is_channel_id, ChannelEntry};
use crate::utils::{Result, SweepError};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Archive-candidacy rules applied to admin-export rows.
#[derive(Debug, Clone)]
pub struct ExportCriteria {
    pub max_members: u32,
    /// Channels active on or after this instant are kept.
    pub cutoff: NaiveDateTime,
    /// Lowercase channel names that are never archive candidates.
    pub protected: Vec<String>,
}

/// One admin-export row that met the criteria, keeping the fields the
/// smallest-and-quietest-first ordering is computed from.
#[derive(Debug, Clone)]
pub struct ExportCandidate {
    pub entry: ChannelEntry,
    pub members: u32,
    pub last_activity: NaiveDateTime,
}

/// Why export rows were dropped; reported in the terminal summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub total: usize,
    pub skipped_private: usize,
    pub skipped_archived: usize,
    pub skipped_protected: usize,
    pub skipped_members: usize,
    pub skipped_active: usize,
    pub parse_errors: usize,
}

/// Channel names from the to-archive list (column 1, header skipped).
pub fn load_archive_list(path: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for record in read_records(path)? {
        if let Some(name) = record.first() {
            if !name.is_empty() {
                names.push(name.clone());
            }
        }
    }
    Ok(names)
}

/// Name-to-ID map from the master list (columns 1 and 2, header skipped).
/// Rows without a well-formed channel ID are left out; the join reports the
/// affected names as misses.
pub fn load_master_list(path: &Path) -> Result<HashMap<String, String>> {
    let mut master = HashMap::new();
    for record in read_records(path)? {
        if let (Some(name), Some(id)) = (record.first(), record.get(1)) {
            if !name.is_empty() && is_channel_id(id) {
                master.insert(name.clone(), id.clone());
            }
        }
    }
    Ok(master)
}

/// Joins the to-archive names against the master list. Names without a
/// master entry come back as misses: they are skipped and logged, never
/// retried.
pub fn join_lists(
    names: &[String],
    master: &HashMap<String, String>,
) -> (Vec<ChannelEntry>, Vec<String>) {
    let mut entries = Vec::new();
    let mut missing = Vec::new();

    for name in names {
        match master.get(name) {
            Some(id) => entries.push(ChannelEntry {
                id: id.clone(),
                name: name.clone(),
            }),
            None => missing.push(name.clone()),
        }
    }

    (entries, missing)
}

/// Filters a Slack admin export down to archive candidates, sorted smallest
/// and quietest first. Malformed rows are counted, not fatal.
pub fn load_export(
    path: &Path,
    criteria: &ExportCriteria,
) -> Result<(Vec<ExportCandidate>, ExportStats)> {
    let contents = read_file(path)?;
    let mut lines = contents.lines();

    let header = lines
        .next()
        .ok_or_else(|| SweepError::csv_error(path.display().to_string(), 1, "empty file"))?;
    let columns = column_index(header, path)?;

    let mut candidates = Vec::new();
    let mut stats = ExportStats::default();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        stats.total += 1;
        let record = split_record(line);

        let field = |column: usize| record.get(column).map(String::as_str).unwrap_or("");

        if field(columns.private).eq_ignore_ascii_case("true") {
            stats.skipped_private += 1;
            continue;
        }
        if field(columns.archived).eq_ignore_ascii_case("true") {
            stats.skipped_archived += 1;
            continue;
        }

        let name = field(columns.name).to_string();
        if criteria.protected.iter().any(|p| p.eq_ignore_ascii_case(&name)) {
            stats.skipped_protected += 1;
            continue;
        }

        let members = match field(columns.members) {
            "" => 0,
            raw => match raw.parse::<u32>() {
                Ok(n) => n,
                Err(_) => {
                    stats.parse_errors += 1;
                    continue;
                }
            },
        };
        if members > criteria.max_members {
            stats.skipped_members += 1;
            continue;
        }

        let last_activity = match parse_activity_date(field(columns.last_activity)) {
            Some(when) => when,
            None => {
                stats.parse_errors += 1;
                continue;
            }
        };
        if last_activity >= criteria.cutoff {
            stats.skipped_active += 1;
            continue;
        }

        let entry = match ChannelEntry::new(field(columns.id), name) {
            Ok(entry) => entry,
            Err(_) => {
                stats.parse_errors += 1;
                continue;
            }
        };

        candidates.push(ExportCandidate {
            entry,
            members,
            last_activity,
        });
    }

    candidates.sort_by(|a, b| {
        a.members
            .cmp(&b.members)
            .then(a.last_activity.cmp(&b.last_activity))
    });

    Ok((candidates, stats))
}

struct ExportColumns {
    name: usize,
    id: usize,
    members: usize,
    last_activity: usize,
    private: usize,
    archived: usize,
}

fn column_index(header: &str, path: &Path) -> Result<ExportColumns> {
    let fields = split_record(header);
    let find = |wanted: &str| -> Result<usize> {
        fields
            .iter()
            .position(|f| f.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                SweepError::csv_error(
                    path.display().to_string(),
                    1,
                    format!("missing '{wanted}' column"),
                )
            })
    };
    Ok(ExportColumns {
        name: find("Name")?,
        id: find("ID")?,
        members: find("Members")?,
        last_activity: find("Last activity")?,
        private: find("Private")?,
        archived: find("Archived")?,
    })
}

/// Slack exports stamp activity as e.g. `Thu, 28 Aug 2025 10:27:56 -0700`.
/// The UTC offset is dropped before parsing; candidacy only needs day
/// resolution.
fn parse_activity_date(raw: &str) -> Option<NaiveDateTime> {
    let without_offset = match raw.rsplit_once(' ') {
        Some((head, tail))
            if tail.starts_with('-') || tail.starts_with('+') => head,
        _ => raw,
    };
    NaiveDateTime::parse_from_str(without_offset.trim(), "%a, %d %b %Y %H:%M:%S").ok()
}

/// Data records of a header-prefixed CSV file.
fn read_records(path: &Path) -> Result<Vec<Vec<String>>> {
    let contents = read_file(path)?;
    Ok(contents
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(split_record)
        .collect())
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SweepError::file_not_found(path.display().to_string())
        } else {
            SweepError::Io(e)
        }
    })
}

/// Splits one CSV record, honoring double-quoted fields and doubled-quote
/// escapes. No multi-line fields; the inputs here never contain them.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}
