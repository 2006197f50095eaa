use std::path::Path;

use git2::build::CheckoutBuilder;
use git2::{Commit, Repository};

use crate::domain::AppError;
use crate::ports::SourceControl;

const ORIGIN: &str = "origin";
const FETCH_REFSPECS: [&str; 2] =
    ["+refs/heads/*:refs/remotes/origin/*", "+refs/tags/*:refs/tags/*"];

/// `SourceControl` backed by libgit2.
#[derive(Debug, Clone, Default)]
pub struct GitRepositoryAdapter;

impl GitRepositoryAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl SourceControl for GitRepositoryAdapter {
    fn clone_repository(
        &self,
        url: &str,
        dest: &Path,
        git_ref: Option<&str>,
    ) -> Result<String, AppError> {
        tracing::debug!(url, dest = %dest.display(), "cloning vendor repository");
        let repo = Repository::clone(url, dest).map_err(git_error("clone"))?;
        if let Some(git_ref) = git_ref {
            checkout_ref(&repo, git_ref)?;
        }
        head_commit_of(&repo)
    }

    fn update_repository(&self, dest: &Path, git_ref: Option<&str>) -> Result<String, AppError> {
        let repo = Repository::open(dest).map_err(git_error("open"))?;
        {
            let mut remote = repo.find_remote(ORIGIN).map_err(git_error("find remote"))?;
            tracing::debug!(dest = %dest.display(), "fetching origin");
            remote.fetch(&FETCH_REFSPECS, None, None).map_err(git_error("fetch"))?;
        }

        match git_ref {
            Some(git_ref) => checkout_ref(&repo, git_ref)?,
            None => fast_forward(&repo)?,
        }
        head_commit_of(&repo)
    }

    fn head_commit(&self, dest: &Path) -> Result<String, AppError> {
        let repo = Repository::open(dest).map_err(git_error("open"))?;
        head_commit_of(&repo)
    }
}

fn git_error(operation: &'static str) -> impl Fn(git2::Error) -> AppError {
    move |err| AppError::GitError {
        operation: operation.to_string(),
        details: err.message().to_string(),
    }
}

fn head_commit_of(repo: &Repository) -> Result<String, AppError> {
    let head = repo.head().map_err(git_error("read HEAD"))?;
    let commit = head.peel_to_commit().map_err(git_error("read HEAD"))?;
    Ok(commit.id().to_string())
}

/// Check out a branch, tag, or commit id.
///
/// Branches are resolved against `origin` so that a pinned branch follows
/// the remote after each fetch.
fn checkout_ref(repo: &Repository, git_ref: &str) -> Result<(), AppError> {
    if let Ok(remote_branch) = repo.find_reference(&format!("refs/remotes/{ORIGIN}/{git_ref}")) {
        let commit = remote_branch.peel_to_commit().map_err(git_error("checkout"))?;
        return move_branch(repo, git_ref, &commit);
    }

    let commit = match repo.find_reference(&format!("refs/tags/{git_ref}")) {
        Ok(tag) => tag.peel_to_commit().map_err(git_error("checkout"))?,
        Err(_) => repo
            .revparse_single(git_ref)
            .and_then(|object| object.peel_to_commit())
            .map_err(|err| AppError::GitError {
                operation: "checkout".to_string(),
                details: format!("unknown ref '{}': {}", git_ref, err.message()),
            })?,
    };

    repo.set_head_detached(commit.id()).map_err(git_error("checkout"))?;
    repo.checkout_head(Some(CheckoutBuilder::new().force())).map_err(git_error("checkout"))
}

/// Point the local branch `name` at `commit` and check it out.
fn move_branch(repo: &Repository, name: &str, commit: &Commit<'_>) -> Result<(), AppError> {
    let local = format!("refs/heads/{name}");
    match repo.find_reference(&local) {
        Ok(mut reference) => {
            reference
                .set_target(commit.id(), "rulecraft: update vendor branch")
                .map_err(git_error("checkout"))?;
        }
        Err(_) => {
            repo.branch(name, commit, false).map_err(git_error("checkout"))?;
        }
    }
    repo.set_head(&local).map_err(git_error("checkout"))?;
    repo.checkout_head(Some(CheckoutBuilder::new().force())).map_err(git_error("checkout"))
}

/// Fast-forward the current branch to its `origin` counterpart.
///
/// Detached checkouts are pinned and left alone.
fn fast_forward(repo: &Repository) -> Result<(), AppError> {
    let head = repo.head().map_err(git_error("read HEAD"))?;
    if !head.is_branch() {
        return Ok(());
    }
    let Some(branch) = head.shorthand().map(str::to_string) else {
        return Ok(());
    };
    let local = head.peel_to_commit().map_err(git_error("read HEAD"))?;

    let upstream = repo
        .find_reference(&format!("refs/remotes/{ORIGIN}/{branch}"))
        .and_then(|reference| reference.peel_to_commit())
        .map_err(git_error("find upstream"))?;

    if upstream.id() == local.id() {
        return Ok(());
    }
    let can_fast_forward =
        repo.graph_descendant_of(upstream.id(), local.id()).map_err(git_error("merge-base"))?;
    if !can_fast_forward {
        return Err(AppError::GitError {
            operation: "fast-forward".to_string(),
            details: format!("local branch '{}' has diverged from {}/{}", branch, ORIGIN, branch),
        });
    }

    move_branch(repo, &branch, &upstream)
}
