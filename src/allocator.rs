//! Next-version allocation for release and hotfix branches.
//!
//! Versions are `YYYY.MM.DD.NN`. The counter is seeded from the latest tag
//! when it belongs to the same day, then advanced until neither a
//! `release/` nor a `hotfix/` branch uses the candidate.
//!
//! Nothing is locked: two operators allocating on the same day can both pick
//! the same free candidate before either creates the branch.

use chrono::NaiveDate;

use crate::domain::version::parse_tag_sequence;
use crate::domain::{BranchRef, Version, WorkflowType};
use crate::git::Repository;

/// Compute the next unused version for `today`.
///
/// A missing or unreadable latest tag seeds the counter at zero. Branch
/// existence is re-queried on every call; a lookup that fails counts as
/// "absent".
pub fn allocate_next_version<R: Repository + ?Sized>(repo: &R, today: NaiveDate) -> Version {
    let seed = match repo.latest_tag() {
        Ok(tag) => {
            let seed = parse_tag_sequence(&tag, today).unwrap_or(0);
            tracing::debug!(tag = %tag.trim_end(), seed, "seeded from latest tag");
            seed
        }
        Err(e) => {
            tracing::debug!(error = %e, "no prior tag, counting from zero");
            0
        }
    };

    let mut candidate = Version::new(today, seed);
    loop {
        candidate = match candidate.next() {
            Some(next) => next,
            None => {
                tracing::warn!(version = %candidate, "sequence numbers exhausted for today");
                return candidate;
            }
        };
        if !is_taken(repo, candidate) {
            return candidate;
        }
        tracing::debug!(version = %candidate, "version already has a branch");
    }
}

fn is_taken<R: Repository + ?Sized>(repo: &R, version: Version) -> bool {
    WorkflowType::all()
        .iter()
        .any(|kind| repo.branch_exists(&BranchRef::new(*kind, version).name()))
}
