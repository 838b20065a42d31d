//! Tests for the provisioning orchestrator: stage ordering, environment
//! assembly, and pre-apply parameter publication.

#![allow(clippy::expect_used)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use tvo_installer::application::ports::WorkDirs;
use tvo_installer::application::services::deploy::{DeployInputs, deploy_stages};
use tvo_installer::domain::config::InstallConfig;
use tvo_installer::domain::credentials::CredentialSet;
use tvo_installer::domain::params;
use tvo_installer::domain::stage::STAGES;
use tvo_installer::infra::fs::LocalFs;

use crate::mocks::{
    DirFetcher, MemoryControlPlane, MemoryStateStore, NoopReporter, RecordingRunner, new_journal,
};

fn credentials() -> CredentialSet {
    CredentialSet {
        access_key_id: "AKIA123".to_owned(),
        secret_access_key: "shhh".to_owned(),
        session_token: None,
        region: "us-east-1".to_owned(),
    }
}

fn config() -> InstallConfig {
    InstallConfig {
        aws_access_key_id: "AKIA123".to_owned(),
        aws_secret_access_key: "shhh".to_owned(),
        aws_region: "us-east-1".to_owned(),
        vpc_id: "vpc-123".to_owned(),
        subnet_id: "subnet-456".to_owned(),
        aes_secret: "0123456789abcdef0123456789abcdef".to_owned(),
        user_name: "ops".to_owned(),
        open_ai_model: "gpt-4o".to_owned(),
        open_ai_api_key: "sk-test".to_owned(),
        terragrunt_bin_dir: Some(PathBuf::from("/tools")),
        ..InstallConfig::default()
    }
}

fn base_env() -> BTreeMap<String, String> {
    BTreeMap::from([("PATH".to_owned(), "/usr/bin".to_owned())])
}

fn work_dirs(root: &std::path::Path) -> WorkDirs {
    WorkDirs {
        infra_dir: root.join("infra"),
        plugin_cache_dir: root.join("terraform-plugins"),
    }
}

#[tokio::test]
async fn happy_path_applies_every_stage_in_order() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let runner = RecordingRunner::ok();
    let fetcher = DirFetcher::new();
    let control = MemoryControlPlane::new();
    let state = MemoryStateStore::new();
    let creds = credentials();
    let cfg = config();
    let dirs = work_dirs(tmp.path());
    let inputs = DeployInputs {
        credentials: &creds,
        config: &cfg,
        dirs: &dirs,
        base_env: base_env(),
        debug: false,
    };

    deploy_stages(&runner, &fetcher, &control, &LocalFs, &state, &NoopReporter, &inputs)
        .await
        .expect("deploy should succeed");

    // Every stage applied, in order.
    let applied = state.applied_stages();
    let expected: Vec<String> = STAGES.iter().map(|s| s.name.to_owned()).collect();
    assert_eq!(applied, expected);

    // init → plan → apply per stage, six stages.
    let iac = runner.iac_calls();
    assert_eq!(iac.len(), STAGES.len() * 3);
    for chunk in iac.chunks(3) {
        assert_eq!(chunk[0].args[1], "init");
        assert_eq!(chunk[1].args[1], "plan");
        assert_eq!(chunk[2].args[1], "apply");
        assert!(chunk[2].args.contains(&"-auto-approve".to_owned()));
    }

    // Base infra inputs were published.
    let params_map = control.params.lock().expect("lock").clone();
    assert_eq!(params_map[params::VPC_ID], "vpc-123");
    assert_eq!(params_map[params::SUBNET_1], "subnet-456");
    assert_eq!(params_map[params::ENCRYPTION_KEY_NAME], params::AES_SECRET_NAME);
    assert_eq!(
        params_map[params::SECRET_MANAGER_ARN],
        MemoryControlPlane::locator(params::AES_SECRET_NAME)
    );
}

#[tokio::test]
async fn stage_environment_is_the_full_merge() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let runner = RecordingRunner::ok();
    let fetcher = DirFetcher::new();
    let control = MemoryControlPlane::new();
    let state = MemoryStateStore::new();
    let creds = credentials();
    let cfg = config();
    let dirs = work_dirs(tmp.path());
    let inputs = DeployInputs {
        credentials: &creds,
        config: &cfg,
        dirs: &dirs,
        base_env: base_env(),
        debug: true,
    };

    deploy_stages(&runner, &fetcher, &control, &LocalFs, &state, &NoopReporter, &inputs)
        .await
        .expect("deploy should succeed");

    let iac = runner.iac_calls();
    let env = iac[0].env.as_ref().expect("iac run carries a full env");
    assert!(env["PATH"].starts_with("/usr/bin"));
    assert!(env["PATH"].ends_with("/tools"));
    assert_eq!(env["AWS_ACCESS_KEY_ID"], "AKIA123");
    assert_eq!(env["AWS_REGION"], "us-east-1");
    assert_eq!(env["AWS_ACCOUNT_ID"], "123456789012");
    assert_eq!(env["AWS_STAGE"], "prod");
    assert!(env["TG_PLUGIN_CACHE_DIR"].ends_with("terraform-plugins"));
    assert_eq!(env["TG_LOG"], "debug");
    assert_eq!(env["TF_LOG"], "DEBUG");
    assert!(!env.contains_key("AWS_SESSION_TOKEN"));
}

#[tokio::test]
async fn later_stages_never_start_after_a_failed_apply() {
    let tmp = tempfile::tempdir().expect("tempdir");
    // Fail the apply of stage 2 (scan-engine, workdir titvo-security-scan/aws).
    let runner = RecordingRunner::failing_when(|cmd| {
        cmd.program == "terragrunt"
            && cmd.args.contains(&"apply".to_owned())
            && cmd
                .current_dir
                .as_ref()
                .is_some_and(|d| d.ends_with("titvo-security-scan/aws"))
    });
    let fetcher = DirFetcher::new();
    let control = MemoryControlPlane::new();
    let state = MemoryStateStore::new();
    let creds = credentials();
    let cfg = config();
    let dirs = work_dirs(tmp.path());
    let inputs = DeployInputs {
        credentials: &creds,
        config: &cfg,
        dirs: &dirs,
        base_env: base_env(),
        debug: false,
    };

    let err = deploy_stages(&runner, &fetcher, &control, &LocalFs, &state, &NoopReporter, &inputs)
        .await
        .expect_err("stage 2 apply should fail the run");

    // Error names the stage and the phase.
    assert!(err.to_string().contains("scan-engine"));
    assert!(format!("{err:#}").contains("apply"));

    // Stage 3 was never fetched, and only stage 1 is recorded as applied.
    let fetched = fetcher.fetched_sources();
    assert_eq!(fetched.len(), 2);
    assert!(!fetched.contains(&STAGES[2].source.to_owned()));
    assert_eq!(state.applied_stages(), vec!["base-infra".to_owned()]);
}

#[tokio::test]
async fn infra_inputs_are_published_before_the_first_iac_run() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let journal = new_journal();
    let runner = RecordingRunner::ok_with_journal(journal.clone());
    let fetcher = DirFetcher::new();
    let control = MemoryControlPlane::with_journal(journal.clone());
    let state = MemoryStateStore::new();
    let creds = credentials();
    let cfg = config();
    let dirs = work_dirs(tmp.path());
    let inputs = DeployInputs {
        credentials: &creds,
        config: &cfg,
        dirs: &dirs,
        base_env: base_env(),
        debug: false,
    };

    deploy_stages(&runner, &fetcher, &control, &LocalFs, &state, &NoopReporter, &inputs)
        .await
        .expect("deploy should succeed");

    let events = journal.lock().expect("lock").clone();
    let first_iac = events
        .iter()
        .position(|e| e.starts_with("run:terragrunt run-all"))
        .expect("an iac run happened");
    let last_write = events
        .iter()
        .rposition(|e| e.starts_with("put:") || e.starts_with("secret:"))
        .expect("writes happened");
    assert!(
        last_write < first_iac,
        "all store writes must land before the first iac run"
    );
}

#[tokio::test]
async fn missing_checkout_after_fetch_is_fatal() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let runner = RecordingRunner::ok();
    let fetcher = DirFetcher::broken();
    let control = MemoryControlPlane::new();
    let state = MemoryStateStore::new();
    let creds = credentials();
    let cfg = config();
    let dirs = work_dirs(tmp.path());
    let inputs = DeployInputs {
        credentials: &creds,
        config: &cfg,
        dirs: &dirs,
        base_env: base_env(),
        debug: false,
    };

    let err = deploy_stages(&runner, &fetcher, &control, &LocalFs, &state, &NoopReporter, &inputs)
        .await
        .expect_err("missing checkout should abort the run");

    assert!(format!("{err:#}").contains("missing after fetch"));
    assert!(state.applied_stages().is_empty());
}

#[tokio::test]
async fn stale_checkout_is_replaced() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dirs = work_dirs(tmp.path());
    // Leave a marker from a previous run inside the first stage checkout.
    let stale = dirs.infra_dir.join(STAGES[0].checkout_dir);
    std::fs::create_dir_all(&stale).expect("create stale checkout");
    std::fs::write(stale.join("leftover.txt"), "old").expect("write marker");

    let runner = RecordingRunner::ok();
    let fetcher = DirFetcher::new();
    let control = MemoryControlPlane::new();
    let state = MemoryStateStore::new();
    let creds = credentials();
    let cfg = config();
    let inputs = DeployInputs {
        credentials: &creds,
        config: &cfg,
        dirs: &dirs,
        base_env: base_env(),
        debug: false,
    };

    deploy_stages(&runner, &fetcher, &control, &LocalFs, &state, &NoopReporter, &inputs)
        .await
        .expect("deploy should succeed");

    assert!(!stale.join("leftover.txt").exists());
}

#[tokio::test]
async fn unusable_toolchain_fails_before_any_fetch() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let runner = RecordingRunner::failing_when(|cmd| cmd.args == ["--version"]);
    let fetcher = DirFetcher::new();
    let control = MemoryControlPlane::new();
    let state = MemoryStateStore::new();
    let creds = credentials();
    let cfg = config();
    let dirs = work_dirs(tmp.path());
    let inputs = DeployInputs {
        credentials: &creds,
        config: &cfg,
        dirs: &dirs,
        base_env: base_env(),
        debug: false,
    };

    let err = deploy_stages(&runner, &fetcher, &control, &LocalFs, &state, &NoopReporter, &inputs)
        .await
        .expect_err("tool check should fail the run");

    assert!(err.to_string().contains("terragrunt is not runnable"));
    assert!(fetcher.fetched_sources().is_empty());
}

#[tokio::test]
async fn node_build_runs_for_flagged_stages_only() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let runner = RecordingRunner::ok();
    let fetcher = DirFetcher::new();
    let control = MemoryControlPlane::new();
    let state = MemoryStateStore::new();
    let creds = credentials();
    let cfg = config();
    let dirs = work_dirs(tmp.path());
    let inputs = DeployInputs {
        credentials: &creds,
        config: &cfg,
        dirs: &dirs,
        base_env: base_env(),
        debug: false,
    };

    deploy_stages(&runner, &fetcher, &control, &LocalFs, &state, &NoopReporter, &inputs)
        .await
        .expect("deploy should succeed");

    let calls = runner.calls.lock().expect("lock").clone();
    let build_stages = STAGES.iter().filter(|s| s.node_build).count();
    let npm_ci = calls
        .iter()
        .filter(|c| c.program == "npm" && c.args == ["ci"])
        .count();
    let npm_build = calls
        .iter()
        .filter(|c| c.program == "npm" && c.args == ["run", "build"])
        .count();
    // One install and one build per flagged stage — never doubled.
    assert_eq!(npm_ci, build_stages);
    assert_eq!(npm_build, build_stages);
}
