// tests/cli_orchestration_test.rs
use botbump::cli::orchestration::{run_bump_workflow, BumpWorkflowArgs};
use botbump::config::{Config, CredentialSource};
use botbump::domain::RunTarget;
use botbump::BotBumpError;
use serial_test::serial;
use std::path::PathBuf;
use tempfile::TempDir;

fn env_config() -> Config {
    let mut config = Config::default();
    config.credentials.source = CredentialSource::Env;
    config.credentials.repository_env = "BOTBUMP_TEST_REPOSITORY".to_string();
    config.credentials.token_env = "BOTBUMP_TEST_TOKEN".to_string();
    config
}

#[test]
fn test_missing_arguments_fail_before_opening_repository() {
    let dir = TempDir::new().unwrap();
    let args = BumpWorkflowArgs {
        repository: None,
        token: None,
        workdir: dir.path().to_path_buf(),
    };

    let err = run_bump_workflow(&args, &Config::default()).unwrap_err();
    assert!(matches!(err, BotBumpError::Config(_)));
    assert!(err.to_string().contains("REPOSITORY"));
}

#[test]
fn test_malformed_repository_argument() {
    let dir = TempDir::new().unwrap();
    let args = BumpWorkflowArgs {
        repository: Some("servest".to_string()),
        token: Some("token".to_string()),
        workdir: dir.path().to_path_buf(),
    };

    let err = run_bump_workflow(&args, &Config::default()).unwrap_err();
    assert!(err.to_string().contains("owner/repo"));
}

#[test]
fn test_outside_repository_is_vcs_error() {
    let dir = TempDir::new().unwrap();
    let args = BumpWorkflowArgs {
        repository: Some("keroxp/servest".to_string()),
        token: Some("token".to_string()),
        workdir: dir.path().to_path_buf(),
    };

    let err = run_bump_workflow(&args, &Config::default()).unwrap_err();
    assert!(matches!(err, BotBumpError::Vcs(_)));
}

#[test]
#[serial]
fn test_env_credentials_are_read_from_process_environment() {
    std::env::set_var("BOTBUMP_TEST_REPOSITORY", "keroxp/servest");
    std::env::set_var("BOTBUMP_TEST_TOKEN", "from-env");

    let config = env_config();
    let target = RunTarget::resolve(&config.credentials, None, None, |k| {
        std::env::var(k).ok()
    })
    .unwrap();

    std::env::remove_var("BOTBUMP_TEST_REPOSITORY");
    std::env::remove_var("BOTBUMP_TEST_TOKEN");

    assert_eq!(target.slug.owner, "keroxp");
    assert_eq!(target.slug.repo, "servest");
    assert_eq!(target.credential.expose(), "from-env");
}

#[test]
#[serial]
fn test_env_source_ignores_positional_arguments() {
    std::env::remove_var("BOTBUMP_TEST_REPOSITORY");
    std::env::remove_var("BOTBUMP_TEST_TOKEN");

    let args = BumpWorkflowArgs {
        repository: Some("keroxp/servest".to_string()),
        token: Some("token".to_string()),
        workdir: PathBuf::from("."),
    };

    let err = run_bump_workflow(&args, &env_config()).unwrap_err();
    assert!(err
        .to_string()
        .contains("BOTBUMP_TEST_REPOSITORY is not set"));
}

#[test]
fn test_bump_workflow_args_structure() {
    let args = BumpWorkflowArgs {
        repository: Some("keroxp/servest".to_string()),
        token: None,
        workdir: PathBuf::from("/tmp/checkout"),
    };

    assert_eq!(args.repository.as_deref(), Some("keroxp/servest"));
    assert_eq!(args.token, None);
    assert_eq!(args.workdir, PathBuf::from("/tmp/checkout"));
}
