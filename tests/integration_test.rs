// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::Command;

use floating_tags::cli::{run_workflow, WorkflowResult};
use floating_tags::config::ActionInputs;
use floating_tags::git::{Git2Repository, Repository};
use floating_tags::ui::ActionOutputs;
use floating_tags::{FloatingTagError, Logger};
use git2::{Oid, Repository as Git2Repo};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_floating-tags");

/// A working repository with an `origin` remote that is a bare repository.
struct Fixture {
    work: TempDir,
    remote: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let work = TempDir::new().expect("Could not create temp dir");
        let remote = TempDir::new().expect("Could not create remote dir");

        Git2Repo::init_bare(remote.path()).expect("Could not init bare remote");
        let repo = Git2Repo::init(work.path()).expect("Could not init git repo");
        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }
        repo.remote("origin", remote.path().to_str().unwrap())
            .expect("Could not add remote");

        Fixture { work, remote }
    }

    fn commit(&self, content: &str, message: &str) -> Oid {
        let repo = Git2Repo::open(self.work.path()).unwrap();
        fs::write(self.work.path().join("README.md"), content).expect("Could not write file");

        let mut index = repo.index().expect("Could not get index");
        index
            .add_path(Path::new("README.md"))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");
        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = repo.find_tree(tree_id).expect("Could not find tree");
        let sig = repo.signature().expect("Could not get sig");

        let parents = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .expect("Could not create commit")
    }

    fn tag(&self, name: &str, oid: Oid) {
        let repo = Git2Repo::open(self.work.path()).unwrap();
        repo.tag_lightweight(name, &repo.find_object(oid, None).unwrap(), false)
            .expect("Could not create tag");
    }

    fn annotated_tag(&self, name: &str, oid: Oid) {
        let repo = Git2Repo::open(self.work.path()).unwrap();
        let sig = repo.signature().unwrap();
        repo.tag(name, &repo.find_object(oid, None).unwrap(), &sig, "release", false)
            .expect("Could not create annotated tag");
    }

    fn remote_tag(&self, name: &str) -> Option<Oid> {
        let repo = Git2Repo::open_bare(self.remote.path()).unwrap();
        let reference = repo.find_reference(&format!("refs/tags/{}", name)).ok()?;
        let id = reference.peel_to_commit().unwrap().id();
        Some(id)
    }

    fn local_tag(&self, name: &str) -> Option<Oid> {
        Git2Repository::open(self.work.path())
            .unwrap()
            .resolve_tag_commit(name)
            .unwrap()
    }

    fn run(&self, inputs: &ActionInputs) -> (floating_tags::Result<WorkflowResult>, ActionOutputs) {
        let repo = Git2Repository::open(self.work.path()).unwrap();
        let logger = Logger::new(inputs.verbose, inputs.debug);
        let mut outputs = ActionOutputs::in_memory();
        let result = run_workflow(inputs, &repo, &logger, &mut outputs);
        (result, outputs)
    }
}

fn cli(fixture: &Fixture) -> Command {
    let mut command = Command::new(BIN);
    command.arg("-C").arg(fixture.work.path());
    for name in [
        "INPUT_TAG",
        "INPUT_REF-TAG",
        "INPUT_PREFIX",
        "INPUT_UPDATE-MINOR",
        "INPUT_IGNORE-PRERELEASE",
        "INPUT_VERBOSE",
        "INPUT_REMOTE",
        "GITHUB_TOKEN",
        "GITHUB_OUTPUT",
        "ACTIONS_STEP_DEBUG",
        "ACTIONS_RUNNER_DEBUG",
        "RUNNER_DEBUG",
        "RUST_LOG",
        "GITHUB_ACTIONS",
    ] {
        command.env_remove(name);
    }
    command
}

#[test]
fn test_help() {
    let output = Command::new(BIN)
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("floating-tags"));
    assert!(stdout.contains("--ref-tag"));
    assert!(stdout.contains("--update-minor"));
}

#[test]
fn test_version_flag() {
    let output = Command::new(BIN)
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_creates_and_pushes_major_and_minor_tags() {
    let fixture = Fixture::new();
    let commit = fixture.commit("one\n", "Initial commit");
    fixture.tag("v1.2.3", commit);

    let inputs = ActionInputs::new("v1.2.3").with_update_minor(true);
    let (result, outputs) = fixture.run(&inputs);
    let result = result.unwrap();

    assert!(result.outcomes.iter().all(|o| o.result.created));
    assert_eq!(fixture.local_tag("v1"), Some(commit));
    assert_eq!(fixture.remote_tag("v1"), Some(commit));
    assert_eq!(fixture.remote_tag("v1.2"), Some(commit));
    assert_eq!(outputs.get("majorTag"), Some("v1"));
    assert_eq!(outputs.get("minorTag"), Some("v1.2"));
}

#[test]
fn test_moves_existing_tags_with_force_push() {
    let fixture = Fixture::new();
    let first = fixture.commit("one\n", "Initial commit");
    fixture.tag("v1.2.3", first);
    let (result, _) = fixture.run(&ActionInputs::new("v1.2.3").with_update_minor(true));
    result.unwrap();

    let second = fixture.commit("two\n", "feat: second");
    fixture.tag("v1.3.0", second);
    let (result, _) = fixture.run(&ActionInputs::new("v1.3.0").with_update_minor(true));
    let result = result.unwrap();

    assert!(result.outcomes[0].result.updated);
    assert!(result.outcomes[1].result.created);
    assert_eq!(fixture.remote_tag("v1"), Some(second));
    assert_eq!(fixture.remote_tag("v1.3"), Some(second));
    assert_eq!(fixture.remote_tag("v1.2"), Some(first));
}

#[test]
fn test_rerun_is_a_noop() {
    let fixture = Fixture::new();
    let commit = fixture.commit("one\n", "Initial commit");
    fixture.tag("v2.0.0", commit);

    fixture.run(&ActionInputs::new("v2.0.0")).0.unwrap();
    let (result, _) = fixture.run(&ActionInputs::new("v2.0.0").with_verbose(true));

    assert!(result.unwrap().outcomes[0].result.is_noop());
    assert_eq!(fixture.remote_tag("v2"), Some(commit));
}

#[test]
fn test_annotated_release_tag_resolves_to_commit() {
    let fixture = Fixture::new();
    let commit = fixture.commit("one\n", "Initial commit");
    fixture.annotated_tag("v3.1.4", commit);

    let (result, _) = fixture.run(&ActionInputs::new("v3.1.4"));

    assert_eq!(result.unwrap().commit, commit);
    assert_eq!(fixture.remote_tag("v3"), Some(commit));
}

#[test]
fn test_branch_ref_tag_with_prerelease() {
    let fixture = Fixture::new();
    let commit = fixture.commit("one\n", "Initial commit");
    let repo = Git2Repo::open(fixture.work.path()).unwrap();
    let branch = repo.head().unwrap().shorthand().unwrap().to_string();

    let inputs = ActionInputs::new("v2.0.0-rc.1")
        .with_ref_tag(branch)
        .with_ignore_prerelease(true);
    let (result, _) = fixture.run(&inputs);

    assert_eq!(result.unwrap().major_tag, "v2");
    assert_eq!(fixture.remote_tag("v2"), Some(commit));
}

#[test]
fn test_missing_ref_tag_fails_commit_resolution() {
    let fixture = Fixture::new();
    fixture.commit("one\n", "Initial commit");

    let (result, _) = fixture.run(&ActionInputs::new("v1.0.0"));

    assert!(matches!(
        result.unwrap_err(),
        FloatingTagError::CommitResolutionFailed { .. }
    ));
    assert_eq!(fixture.local_tag("v1"), None);
}

#[test]
fn test_cli_writes_github_outputs() {
    let fixture = Fixture::new();
    let commit = fixture.commit("one\n", "Initial commit");
    fixture.tag("v1.2.3", commit);
    let output_file = fixture.work.path().join("github_output");

    let output = cli(&fixture)
        .args(["--tag", "v1.2.3", "--update-minor"])
        .env("GITHUB_OUTPUT", &output_file)
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let written = fs::read_to_string(&output_file).unwrap();
    assert_eq!(written, "majorTag=v1\nminorTag=v1.2\n");
    assert_eq!(fixture.remote_tag("v1.2"), Some(commit));
}

#[test]
fn test_cli_reads_action_inputs_from_environment() {
    let fixture = Fixture::new();
    let commit = fixture.commit("one\n", "Initial commit");
    fixture.tag("release-5.1.0", commit);

    let output = cli(&fixture)
        .env("INPUT_TAG", "release-5.1.0")
        .env("INPUT_PREFIX", "rel-")
        .env("INPUT_UPDATE-MINOR", "true")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(fixture.remote_tag("rel-5"), Some(commit));
    assert_eq!(fixture.remote_tag("rel-5.1"), Some(commit));
}

#[test]
fn test_cli_rejects_ignored_prerelease() {
    let fixture = Fixture::new();
    let commit = fixture.commit("one\n", "Initial commit");
    fixture.tag("v2.0.0-rc.1", commit);

    let output = cli(&fixture)
        .args(["--tag", "v2.0.0-rc.1", "--ignore-prerelease", "true"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Prerelease versions are ignored"), "stdout: {}", stdout);
    assert_eq!(fixture.local_tag("v2"), None);
    assert_eq!(fixture.remote_tag("v2"), None);
}

#[test]
fn test_cli_annotates_warnings_and_errors_on_actions_runner() {
    let fixture = Fixture::new();
    let commit = fixture.commit("one\n", "Initial commit");
    fixture.tag("v2.0.0-rc.1", commit);

    let output = cli(&fixture)
        .args(["--tag", "v2.0.0-rc.1", "--ignore-prerelease"])
        .env("GITHUB_ACTIONS", "true")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout
            .lines()
            .any(|line| line.starts_with("::warning::Tag v2.0.0-rc.1 is a prerelease")),
        "stdout: {}",
        stdout
    );
    assert!(
        stdout
            .lines()
            .any(|line| line.starts_with("::error::Prerelease versions are ignored")),
        "stdout: {}",
        stdout
    );
}

#[test]
fn test_cli_requires_tag() {
    let fixture = Fixture::new();
    fixture.commit("one\n", "Initial commit");

    let output = cli(&fixture).output().expect("Failed to execute command");

    assert!(!output.status.success());
}
