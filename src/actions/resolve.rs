//! Operator-directed resolution of duplicate groups.
//!
//! For every confirmed group the operator is asked which single member to
//! delete, with `Skip!` as the first choice. At most one file is removed per
//! group; every other copy stays on disk. Removing further copies means
//! running the resolution again.
//!
//! Each digest is handled once per run. If a digest turns up again later in
//! the group sequence it is passed over without a prompt.
//!
//! ```text
//! Unresolved ──skip──────────▶ Skipped
//!     │
//!     └──delete──┬─ ok ──────▶ Deleted
//!                └─ error ───▶ DeleteFailed
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use super::delete::{delete_verified, DeleteError, DeleteMethod, DeleteResult};
use crate::duplicates::DuplicateGroup;
use crate::prompt::{PromptError, Selector};
use crate::scanner::Hash;

/// Label of the first, no-op choice in every prompt.
pub const SKIP_CHOICE: &str = "Skip!";

/// Question shown for every group.
pub const DELETE_PROMPT: &str = "Which file would you like to delete?";

/// Terminal state of a resolved group.
#[derive(Debug)]
pub enum GroupOutcome {
    /// The operator chose to keep every copy.
    Skipped,
    /// The selected copy was removed.
    Deleted(DeleteResult),
    /// The selected copy could not be removed.
    DeleteFailed(DeleteError),
}

/// One resolved group.
#[derive(Debug)]
pub struct Resolution {
    /// Digest of the group
    pub digest: Hash,
    /// Path the operator picked, if any
    pub selected: Option<PathBuf>,
    /// What happened
    pub outcome: GroupOutcome,
}

/// Everything that happened during one resolution pass.
#[derive(Debug, Default)]
pub struct ResolutionReport {
    /// Resolved groups in prompt order
    pub resolutions: Vec<Resolution>,
    /// Groups passed over because their digest was already resolved
    pub repeats: usize,
}

impl ResolutionReport {
    /// Number of groups where a file was deleted.
    #[must_use]
    pub fn deleted_count(&self) -> usize {
        self.count(|o| matches!(o, GroupOutcome::Deleted(_)))
    }

    /// Number of skipped groups.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, GroupOutcome::Skipped))
    }

    /// Number of groups whose deletion failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, GroupOutcome::DeleteFailed(_)))
    }

    /// Bytes freed by successful deletions.
    #[must_use]
    pub fn bytes_freed(&self) -> u64 {
        self.resolutions
            .iter()
            .filter_map(|r| match &r.outcome {
                GroupOutcome::Deleted(result) => Some(result.size),
                _ => None,
            })
            .sum()
    }

    /// Human-readable summary of the pass.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Deleted {} file(s), skipped {} group(s), {} failed, freed {}",
            self.deleted_count(),
            self.skipped_count(),
            self.failed_count(),
            bytesize::ByteSize::b(self.bytes_freed())
        )
    }

    fn count(&self, pred: impl Fn(&GroupOutcome) -> bool) -> usize {
        self.resolutions.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Drives the per-group delete-or-skip protocol.
///
/// Strictly sequential: one prompt, at most one deletion, then the next group.
#[derive(Debug, Default)]
pub struct Resolver {
    method: DeleteMethod,
    seen: HashSet<Hash>,
}

impl Resolver {
    /// Create a resolver that removes files with `method`.
    #[must_use]
    pub fn new(method: DeleteMethod) -> Self {
        Self {
            method,
            seen: HashSet::new(),
        }
    }

    /// Whether the group with `digest` has already been handled.
    #[must_use]
    pub fn is_resolved(&self, digest: &Hash) -> bool {
        self.seen.contains(digest)
    }

    /// Resolve one group.
    ///
    /// Returns `Ok(None)` without prompting when the digest was already
    /// resolved earlier in this run.
    ///
    /// # Errors
    ///
    /// Returns the selector's [`PromptError`]; the group stays unresolved.
    pub fn resolve_group<S: Selector + ?Sized>(
        &mut self,
        group: &DuplicateGroup,
        selector: &mut S,
    ) -> Result<Option<Resolution>, PromptError> {
        if self.seen.contains(&group.digest) {
            log::debug!("Already resolved {}, not prompting again", group.digest_hex());
            return Ok(None);
        }

        let choices: Vec<String> = std::iter::once(SKIP_CHOICE.to_string())
            .chain(group.members.iter().map(|p| p.display().to_string()))
            .collect();

        let index = selector.select(DELETE_PROMPT, &choices)?;
        if index >= choices.len() {
            return Err(PromptError::InvalidSelection {
                index,
                len: choices.len(),
            });
        }

        let resolution = if index == 0 {
            log::info!("Skipping..");
            Resolution {
                digest: group.digest,
                selected: None,
                outcome: GroupOutcome::Skipped,
            }
        } else {
            let path = group.members[index - 1].clone();
            log::info!("Deleting: {}", path.display());
            let outcome = match delete_verified(&path, group.size, self.method) {
                Ok(result) => GroupOutcome::Deleted(result),
                Err(e) => {
                    log::warn!("Unable to delete {}: {}", path.display(), e);
                    GroupOutcome::DeleteFailed(e)
                }
            };
            Resolution {
                digest: group.digest,
                selected: Some(path),
                outcome,
            }
        };

        self.seen.insert(group.digest);
        Ok(Some(resolution))
    }

    /// Resolve every group in order.
    ///
    /// # Errors
    ///
    /// Stops at the first [`PromptError`]; groups after it are left untouched.
    pub fn resolve_all<S: Selector + ?Sized>(
        &mut self,
        groups: &[DuplicateGroup],
        selector: &mut S,
    ) -> Result<ResolutionReport, PromptError> {
        let mut report = ResolutionReport::default();
        if groups.is_empty() {
            return Ok(report);
        }

        log::info!("Looking up files to delete..");
        for group in groups {
            match self.resolve_group(group, selector)? {
                Some(resolution) => report.resolutions.push(resolution),
                None => report.repeats += 1,
            }
        }
        Ok(report)
    }
}
