use std::fs;
use std::path::Path;
use std::process::Command;

fn git(repo_dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "user.name=Test User", "-c", "user.email=test@example.com"])
        .args(args)
        .current_dir(repo_dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Create a repository on `main` holding `files`, returning the commit id.
pub(crate) fn init_template_repo(repo_dir: &Path, files: &[(&str, &str)]) -> String {
    fs::create_dir_all(repo_dir).expect("create repo dir");
    git(repo_dir, &["init", "--initial-branch=main"]);
    commit_files(repo_dir, files, "initial templates")
}

/// Write `files`, commit them, and return the new commit id.
pub(crate) fn commit_files(repo_dir: &Path, files: &[(&str, &str)], message: &str) -> String {
    for (relative, content) in files {
        let path = repo_dir.join(relative);
        fs::create_dir_all(path.parent().expect("path has parent")).expect("create parent");
        fs::write(path, content).expect("write file");
    }
    git(repo_dir, &["add", "-A"]);
    git(repo_dir, &["commit", "-m", message]);
    git(repo_dir, &["rev-parse", "HEAD"])
}

pub(crate) fn tag(repo_dir: &Path, name: &str) {
    git(repo_dir, &["tag", name]);
}
