mod harness;

use harness::TestContext;
use harness::git_repository::{commit_files, init_template_repo, tag};
use predicates::prelude::*;

const SHARED_V1: &str = "---\ndescription: Shared rules\n---\nShared v1 for {{ language }}";
const SHARED_V2: &str = "---\ndescription: Shared rules\n---\nShared v2 for {{ language }}";

fn project_including_vendors(ctx: &TestContext) {
    ctx.init_project();
    ctx.write(
        "rulecraft.yaml",
        "defaults:\n  include_vendors: [\"*\"]\nvendor_overrides:\n  team-rules:\n    template_defaults:\n      language: rust\n",
    );
}

#[test]
fn fetch_update_and_compile_vendor_templates() {
    let ctx = TestContext::new();
    project_including_vendors(&ctx);
    let repo = ctx.scratch("team-rules");
    let first = init_template_repo(&repo, &[("templates/shared.tmpl", SHARED_V1)]);

    ctx.cli()
        .args(["fetch", repo.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetched vendor 'team-rules'"));
    assert!(ctx.work_dir().join("vendors/team-rules/templates/shared.tmpl").is_file());
    assert!(ctx.read("rulecraft.lock").contains(&first));

    ctx.cli().args(["compile", "roo"]).assert().success();
    assert_eq!(ctx.read("compiled/roo/shared.md"), "Shared v1 for rust");

    let second = commit_files(&repo, &[("templates/shared.tmpl", SHARED_V2)], "v2");
    ctx.cli()
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 'team-rules'"));
    assert!(ctx.read("rulecraft.lock").contains(&second));

    ctx.cli()
        .args(["sync", "roo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"));
    assert_eq!(ctx.read("compiled/roo/shared.md"), "Shared v2 for rust");
}

#[test]
fn fetch_pins_a_tag() {
    let ctx = TestContext::new();
    project_including_vendors(&ctx);
    let repo = ctx.scratch("team-rules");
    let tagged = init_template_repo(&repo, &[("templates/shared.tmpl", SHARED_V1)]);
    tag(&repo, "v1");
    commit_files(&repo, &[("templates/shared.tmpl", SHARED_V2)], "v2");

    ctx.cli().args(["fetch", repo.to_str().unwrap(), "--ref", "v1"]).assert().success();

    let lock = ctx.read("rulecraft.lock");
    assert!(lock.contains(&tagged));
    assert!(lock.contains("git_ref: v1"));
    assert!(ctx.read("vendors/team-rules/templates/shared.tmpl").contains("Shared v1"));
}

#[test]
fn fetching_existing_vendor_needs_force() {
    let ctx = TestContext::new();
    project_including_vendors(&ctx);
    let repo = ctx.scratch("team-rules");
    init_template_repo(&repo, &[("templates/shared.tmpl", SHARED_V1)]);
    let url = repo.to_str().unwrap().to_string();

    ctx.cli().args(["fetch", &url]).assert().success();
    ctx.cli()
        .args(["fetch", &url])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    ctx.cli().args(["fetch", &url, "--force"]).assert().success();
}

#[test]
fn vendors_can_be_listed_renamed_and_removed() {
    let ctx = TestContext::new();
    project_including_vendors(&ctx);
    let repo = ctx.scratch("team-rules");
    init_template_repo(&repo, &[("templates/shared.tmpl", SHARED_V1)]);

    ctx.cli().args(["fetch", repo.to_str().unwrap(), "--name", "acme"]).assert().success();
    ctx.cli()
        .args(["vendors", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("acme"));
    ctx.cli()
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vendor 'acme':"))
        .stdout(predicate::str::contains("acme/shared - Shared rules"));

    ctx.cli().args(["vendors", "remove", "acme"]).assert().success();
    assert!(!ctx.work_dir().join("vendors/acme").exists());
    ctx.cli()
        .args(["vendors", "rm", "acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Vendor 'acme' not found"));
}

#[test]
fn fetching_a_missing_repository_fails() {
    let ctx = TestContext::new();
    project_including_vendors(&ctx);
    let missing = ctx.scratch("nowhere").join("missing-repo");

    ctx.cli()
        .args(["fetch", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Git error during clone"));
    assert!(!ctx.work_dir().join("vendors/missing-repo").exists());
}
