//! Finding the changeset a head was last synchronised with.

use tfsgit_core::changeset::{HeadOutcome, HeadScan, HistoryScanner, ScanResult};
use tracing::debug;

use crate::commands::{GitError, GitRunner, Result};
use crate::repository::GitRepository;

impl<R: GitRunner> GitRepository<R> {
    /// Walks first-parent history from `head` to the nearest commit carrying a
    /// changeset footer.
    ///
    /// Commits passed on the way are returned as `local_commits`, nearest to
    /// `head` first. If git cannot walk `head` at all the outcome is
    /// [`HeadOutcome::NoSuchHead`] rather than an error.
    ///
    /// # Errors
    ///
    /// Spawn failures, and [`GitError::RemoteNotFoundByUrl`] when a footer
    /// names a server path no configured remote tracks.
    pub fn head_info(&self, head: &str) -> Result<HeadScan> {
        if head.is_empty() || head.starts_with('-') {
            debug!(head, "not a revision");
            return Ok(HeadScan::no_such_head());
        }

        let mut scanner = HistoryScanner::new();
        let args = [
            "log",
            "--no-color",
            "--no-decorate",
            "--pretty=medium",
            "--no-abbrev-commit",
            "--first-parent",
            head,
            "--",
        ];
        match self
            .runner
            .run_streaming(&args, &mut |line| scanner.feed(line))
        {
            Ok(()) => {}
            Err(GitError::CommandFailed { code, stderr, .. }) => {
                debug!(head, ?code, %stderr, "could not walk head (maybe it doesn't exist?)");
                return Ok(HeadScan::no_such_head());
            }
            Err(e) => return Err(e),
        }

        let ScanResult {
            mark,
            local_commits,
        } = scanner.finish();
        let outcome = match mark {
            Some(mark) => {
                let remote = self.read_remote_by_url(&mark.url, &mark.repository)?;
                debug!(
                    head,
                    commit = %mark.commit,
                    changeset = mark.changeset_id,
                    remote = remote.id(),
                    local = local_commits.len(),
                    "found changeset"
                );
                HeadOutcome::Linked(mark.into_info(remote))
            }
            None => HeadOutcome::Unlinked,
        };

        Ok(HeadScan {
            outcome,
            local_commits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedGit, TestRepo, config_listing};
    use pretty_assertions::assert_eq;
    use tfsgit_core::ObjectId;

    const CONFIG: &[&str] = &[
        "tfs-remote.default.url=http://tfs:8080/tfs",
        "tfs-remote.default.repository=$/Proj/Main",
        "tfs-remote.branch.url=http://tfs:8080/tfs",
        "tfs-remote.branch.repository=$/Proj/Branch",
    ];

    fn sha(n: u8) -> String {
        format!("{:040x}", n)
    }

    fn id(n: u8) -> ObjectId {
        ObjectId::parse(&sha(n)).unwrap()
    }

    fn log_entry(n: u8, body: &str) -> String {
        format!(
            "commit {}\nAuthor: Dev <dev@example.com>\nDate:   Mon Jan 1 00:00:00 2024 +0000\n\n    {}\n\n",
            sha(n),
            body
        )
    }

    fn footer(repository: &str, cs: u64) -> String {
        format!(
            "Imported\n\n    git-tfs-id: url=http://tfs:8080/tfs; repository={repository}; changeset={cs}"
        )
    }

    #[test]
    fn unlinked_history_lists_every_commit() {
        let log = [log_entry(3, "c"), log_entry(2, "b"), log_entry(1, "a")].concat();
        let repo = GitRepository::new(ScriptedGit::new().on("log", log));

        let scan = repo.head_info("HEAD").unwrap();
        assert_eq!(scan.outcome, HeadOutcome::Unlinked);
        assert_eq!(scan.local_commits, vec![id(3), id(2), id(1)]);

        // No match means no remote lookup.
        let calls = repo.runner().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            vec![
                "log",
                "--no-color",
                "--no-decorate",
                "--pretty=medium",
                "--no-abbrev-commit",
                "--first-parent",
                "HEAD",
                "--"
            ]
        );
    }

    #[test]
    fn linked_at_nth_commit() {
        let log = [
            log_entry(4, "wip"),
            log_entry(3, "more wip"),
            log_entry(2, &footer("$/Proj/Branch", 77)),
            log_entry(1, &footer("$/Proj/Main", 70)),
        ]
        .concat();
        let repo = GitRepository::new(
            ScriptedGit::new()
                .on("log", log)
                .on("config", config_listing(CONFIG)),
        );

        let scan = repo.head_info("feature").unwrap();
        let info = scan.outcome.changeset().unwrap();
        assert_eq!(info.commit, id(2));
        assert_eq!(info.changeset_id, 77);
        assert_eq!(info.remote.id(), "branch");
        assert_eq!(scan.local_commits, vec![id(4), id(3)]);
    }

    #[test]
    fn missing_head_is_an_outcome() {
        let repo = GitRepository::new(ScriptedGit::new().failing(
            "log",
            128,
            "fatal: bad revision 'nope'",
        ));
        let scan = repo.head_info("nope").unwrap();
        assert_eq!(scan, HeadScan::no_such_head());
    }

    #[test]
    fn option_like_head_runs_nothing() {
        let repo = GitRepository::new(ScriptedGit::new());
        assert_eq!(repo.head_info("--all").unwrap(), HeadScan::no_such_head());
        assert_eq!(repo.head_info("").unwrap(), HeadScan::no_such_head());
        assert!(repo.runner().calls().is_empty());
    }

    #[test]
    fn unknown_remote_in_footer_is_an_error() {
        let log = log_entry(1, &footer("$/Elsewhere", 5));
        let repo = GitRepository::new(
            ScriptedGit::new()
                .on("log", log)
                .on("config", config_listing(CONFIG)),
        );
        assert!(matches!(
            repo.head_info("HEAD"),
            Err(GitError::RemoteNotFoundByUrl { ref repository, .. }) if repository == "$/Elsewhere"
        ));
    }

    #[test]
    fn real_repository_first_parent_walk() {
        let test_repo = TestRepo::new();
        test_repo.config("tfs-remote.default.url", "http://tfs:8080/tfs");
        test_repo.config("tfs-remote.default.repository", "$/Proj/Main");

        test_repo.commit("root");
        let linked = test_repo.commit(
            "C12 import\n\ngit-tfs-id: url=http://tfs:8080/tfs; repository=$/Proj/Main; changeset=12",
        );
        let local1 = test_repo.commit("local work");
        let local2 = test_repo.commit("more local work");

        let repo = GitRepository::new(test_repo.git());
        let scan = repo.head_info("HEAD").unwrap();
        let info = scan.outcome.changeset().unwrap();
        assert_eq!(info.commit, linked);
        assert_eq!(info.changeset_id, 12);
        assert_eq!(info.remote.id(), "default");
        assert_eq!(scan.local_commits, vec![local2, local1]);

        assert_eq!(
            repo.head_info("no-such-branch").unwrap().outcome,
            HeadOutcome::NoSuchHead
        );
    }

    #[test]
    fn abbreviated_log_config_is_overridden() {
        let test_repo = TestRepo::new();
        test_repo.config("tfs-remote.default.url", "http://tfs:8080/tfs");
        test_repo.config("tfs-remote.default.repository", "$/Proj/Main");
        test_repo.config("log.abbrevCommit", "true");

        let linked = test_repo.commit(
            "C3 import\n\ngit-tfs-id: url=http://tfs:8080/tfs; repository=$/Proj/Main; changeset=3",
        );
        let local = test_repo.commit("local work");

        let scan = GitRepository::new(test_repo.git()).head_info("HEAD").unwrap();
        let info = scan.outcome.changeset().unwrap();
        assert_eq!(info.commit, linked);
        assert_eq!(info.changeset_id, 3);
        assert_eq!(scan.local_commits, vec![local]);
    }
}
