//! Output formatting helpers for the `tfsgit` CLI.
//!
//! Provides JSON output, table formatting, and human-readable views of
//! remotes, head scans, and objects.

use std::io::{self, Write};

use serde::Serialize;
use tfsgit_core::{ChangesetInfo, HeadOutcome, HeadScan, ObjectId, ObjectRef, RemoteDescriptor};

/// JSON view of a [`HeadScan`].
///
/// `outcome` is one of `linked`, `unlinked`, or `no-such-head`; `changeset`
/// is present only for `linked`.
#[derive(Serialize)]
pub struct HeadView<'a> {
    pub head: &'a str,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changeset: Option<&'a ChangesetInfo>,
    pub local_commits: &'a [ObjectId],
}

impl<'a> HeadView<'a> {
    pub fn new(head: &'a str, scan: &'a HeadScan) -> Self {
        Self {
            head,
            outcome: outcome_name(&scan.outcome),
            changeset: scan.outcome.changeset(),
            local_commits: &scan.local_commits,
        }
    }
}

fn outcome_name(outcome: &HeadOutcome) -> &'static str {
    match outcome {
        HeadOutcome::Linked(_) => "linked",
        HeadOutcome::Unlinked => "unlinked",
        HeadOutcome::NoSuchHead => "no-such-head",
    }
}

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a simple table with headers and rows.
///
/// Column widths are computed from the data for alignment.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = handle.write_all(render_table(headers, rows).as_bytes());
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header_cells, &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &separator, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// One table row per remote: id, url, repository, username.
pub fn remote_row(remote: &RemoteDescriptor) -> Vec<String> {
    vec![
        remote.id().to_string(),
        remote.url.clone().unwrap_or_default(),
        remote.repository.clone().unwrap_or_default(),
        remote.username.clone().unwrap_or_default(),
    ]
}

/// Format a remote in detailed multi-line view.
pub fn format_remote_detail(remote: &RemoteDescriptor) -> String {
    let mut lines = vec![format!("Remote: {}", remote.id())];
    if let Some(url) = &remote.url {
        lines.push(format!("URL: {url}"));
    }
    if let Some(repository) = &remote.repository {
        lines.push(format!("Repository: {repository}"));
    }
    if let Some(username) = &remote.username {
        lines.push(format!("Username: {username}"));
    }
    lines.join("\n")
}

/// Format a head scan for humans.
pub fn format_head_scan(head: &str, scan: &HeadScan) -> String {
    let mut lines = Vec::new();
    match &scan.outcome {
        HeadOutcome::Linked(info) => lines.push(format!(
            "{head} is based on C{} from {} ({}) at {}",
            info.changeset_id,
            info.remote.id(),
            info.remote.repository.as_deref().unwrap_or("?"),
            info.commit.short(),
        )),
        HeadOutcome::Unlinked => lines.push(format!("{head} has no tfs changeset in its history")),
        HeadOutcome::NoSuchHead => lines.push(format!("{head} does not exist")),
    }
    if !scan.local_commits.is_empty() {
        lines.push(format!("Local commits ({}):", scan.local_commits.len()));
        lines.extend(scan.local_commits.iter().map(|c| format!("  {c}")));
    }
    lines.join("\n")
}

/// Format an object in `ls-tree` style.
pub fn format_object(object: &ObjectRef) -> String {
    format!(
        "{} {} {}\t{}",
        object.mode, object.object_type, object.sha, object.path
    )
}
