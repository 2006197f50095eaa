use std::path::Path;

use crate::domain::AppError;

/// Port for the git operations vendors need.
///
/// Every method returns the commit id checked out afterwards.
pub trait SourceControl {
    /// Clone `url` into `dest`, then check out `git_ref` when given.
    fn clone_repository(
        &self,
        url: &str,
        dest: &Path,
        git_ref: Option<&str>,
    ) -> Result<String, AppError>;

    /// Fetch `origin` for the checkout at `dest` and move it forward.
    ///
    /// With `git_ref` the ref is checked out; otherwise the current branch is
    /// fast-forwarded to its upstream.
    fn update_repository(&self, dest: &Path, git_ref: Option<&str>) -> Result<String, AppError>;

    /// Commit id of `HEAD` in the checkout at `dest`.
    fn head_commit(&self, dest: &Path) -> Result<String, AppError>;
}
