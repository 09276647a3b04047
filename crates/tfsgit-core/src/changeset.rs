//! Links between local commits and remote changesets.
//!
//! [`HistoryScanner`] consumes `git log --first-parent` output one line at a
//! time, newest commit first, and stops at the first commit whose message
//! carries a changeset footer. Commits seen before that one have no remote
//! counterpart and are collected as local commits.

use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};

use crate::lines::{parse_changeset_footer, parse_commit_header};
use crate::object_id::ObjectId;
use crate::remote::RemoteDescriptor;

/// A local commit that corresponds to a changeset on a remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangesetInfo {
    pub remote: RemoteDescriptor,
    pub changeset_id: u64,
    pub commit: ObjectId,
}

/// Result of looking for the changeset a head descends from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadOutcome {
    /// The nearest first-parent ancestor carrying a changeset footer.
    Linked(ChangesetInfo),
    /// The walk reached the root commit without finding a footer.
    Unlinked,
    /// The head could not be walked (usually because it does not exist).
    NoSuchHead,
}

impl HeadOutcome {
    pub fn changeset(&self) -> Option<&ChangesetInfo> {
        match self {
            Self::Linked(info) => Some(info),
            Self::Unlinked | Self::NoSuchHead => None,
        }
    }
}

/// A head outcome together with the commits between the head and the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadScan {
    pub outcome: HeadOutcome,
    /// Commits without a changeset footer, nearest to the head first.
    pub local_commits: Vec<ObjectId>,
}

impl HeadScan {
    pub fn no_such_head() -> Self {
        Self {
            outcome: HeadOutcome::NoSuchHead,
            local_commits: Vec::new(),
        }
    }
}

/// A footer match whose remote has not been resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesetMark {
    pub commit: ObjectId,
    pub url: String,
    pub repository: String,
    pub changeset_id: u64,
}

impl ChangesetMark {
    /// Attaches the resolved remote.
    pub fn into_info(self, remote: RemoteDescriptor) -> ChangesetInfo {
        ChangesetInfo {
            remote,
            changeset_id: self.changeset_id,
            commit: self.commit,
        }
    }
}

/// What a history scan found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub mark: Option<ChangesetMark>,
    pub local_commits: Vec<ObjectId>,
}

/// Incremental scanner over `git log --pretty=medium` output.
#[derive(Debug, Default)]
pub struct HistoryScanner {
    current: Option<ObjectId>,
    local_commits: Vec<ObjectId>,
    mark: Option<ChangesetMark>,
}

impl HistoryScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one line. Returns `Break` once a footer has been found; further
    /// lines are ignored.
    pub fn feed(&mut self, line: &str) -> ControlFlow<()> {
        if self.mark.is_some() {
            return ControlFlow::Break(());
        }

        if let Some(commit) = parse_commit_header(line) {
            if let Some(previous) = self.current.replace(commit) {
                self.local_commits.push(previous);
            }
            return ControlFlow::Continue(());
        }

        // Footers are only meaningful inside a commit entry.
        let Some(commit) = &self.current else {
            return ControlFlow::Continue(());
        };
        match parse_changeset_footer(line) {
            Some(footer) => {
                self.mark = Some(ChangesetMark {
                    commit: commit.clone(),
                    url: footer.url.to_string(),
                    repository: footer.repository.to_string(),
                    changeset_id: footer.changeset_id,
                });
                ControlFlow::Break(())
            }
            None => ControlFlow::Continue(()),
        }
    }

    /// Ends the scan.
    ///
    /// Without a match, the last commit seen also counts as local, so
    /// `local_commits` holds every commit in the stream.
    pub fn finish(mut self) -> ScanResult {
        if self.mark.is_none() {
            if let Some(last) = self.current.take() {
                self.local_commits.push(last);
            }
        }
        ScanResult {
            mark: self.mark,
            local_commits: self.local_commits,
        }
    }
}

/// Runs a [`HistoryScanner`] over a complete sequence of lines.
pub fn scan_history<I, S>(lines: I) -> ScanResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = HistoryScanner::new();
    for line in lines {
        if scanner.feed(line.as_ref()).is_break() {
            break;
        }
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sha(n: u8) -> String {
        format!("{:040x}", n)
    }

    fn id(n: u8) -> ObjectId {
        ObjectId::parse(&sha(n)).unwrap()
    }

    /// Builds a medium-format log entry.
    fn entry(n: u8, message: &[&str]) -> Vec<String> {
        let mut lines = vec![
            format!("commit {}", sha(n)),
            "Author: Dev <dev@example.com>".to_string(),
            "Date:   Mon Jan 1 00:00:00 2024 +0000".to_string(),
            String::new(),
        ];
        lines.extend(message.iter().map(|l| format!("    {l}")));
        lines.push(String::new());
        lines
    }

    fn footer(cs: u64) -> String {
        format!("git-tfs-id: url=http://tfs:8080/tfs; repository=$/Proj/Main; changeset={cs}")
    }

    #[test]
    fn empty_stream() {
        assert_eq!(scan_history(Vec::<String>::new()), ScanResult::default());
    }

    #[test]
    fn no_footer_collects_every_commit_head_first() {
        let log: Vec<String> = [entry(3, &["third"]), entry(2, &["second"]), entry(1, &["first"])]
            .concat();
        let result = scan_history(&log);
        assert_eq!(result.mark, None);
        assert_eq!(result.local_commits, vec![id(3), id(2), id(1)]);
    }

    #[test]
    fn footer_on_nth_commit() {
        let log: Vec<String> = [
            entry(5, &["wip"]),
            entry(4, &["more wip"]),
            entry(3, &["Imported", "", &footer(120)]),
            entry(2, &["Older", "", &footer(110)]),
        ]
        .concat();

        let result = scan_history(&log);
        assert_eq!(
            result.mark,
            Some(ChangesetMark {
                commit: id(3),
                url: "http://tfs:8080/tfs".to_string(),
                repository: "$/Proj/Main".to_string(),
                changeset_id: 120,
            })
        );
        assert_eq!(result.local_commits, vec![id(5), id(4)]);
    }

    #[test]
    fn footer_on_head_commit() {
        let log: Vec<String> = [entry(9, &[&footer(7)]), entry(8, &["x"])].concat();
        let result = scan_history(&log);
        assert_eq!(result.mark.unwrap().commit, id(9));
        assert!(result.local_commits.is_empty());
    }

    #[test]
    fn feed_breaks_and_stays_broken() {
        let mut scanner = HistoryScanner::new();
        assert!(scanner.feed(&format!("commit {}", sha(1))).is_continue());
        assert!(scanner.feed(&format!("    {}", footer(1))).is_break());
        assert!(scanner.feed(&format!("commit {}", sha(2))).is_break());

        let result = scanner.finish();
        assert_eq!(result.mark.unwrap().commit, id(1));
        assert!(result.local_commits.is_empty());
    }

    #[test]
    fn footer_before_any_header_is_ignored() {
        let mut log = vec![footer(1)];
        log.extend(entry(1, &["plain"]));
        let result = scan_history(&log);
        assert_eq!(result.mark, None);
        assert_eq!(result.local_commits, vec![id(1)]);
    }

    #[test]
    fn mark_into_info() {
        let mark = ChangesetMark {
            commit: id(1),
            url: "u".to_string(),
            repository: "$/P".to_string(),
            changeset_id: 42,
        };
        let info = mark.into_info(RemoteDescriptor::new("default"));
        assert_eq!(info.changeset_id, 42);
        assert_eq!(info.commit, id(1));
        assert_eq!(info.remote.id(), "default");

        let outcome = HeadOutcome::Linked(info.clone());
        assert_eq!(outcome.changeset(), Some(&info));
        assert_eq!(HeadOutcome::NoSuchHead.changeset(), None);
    }
}
