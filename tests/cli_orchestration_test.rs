use chrono::NaiveDate;
use git_flow_release::cli::orchestration::{run_workflow, WorkflowResult};
use git_flow_release::config::Config;
use git_flow_release::domain::{WorkflowAction, WorkflowType};
use git_flow_release::git::MockRepository;
use git_flow_release::FlowError;
use regex::Regex;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, 5).unwrap()
}

fn offline_config() -> Config {
    let mut config = Config::default();
    config.behavior.fetch_before_action = false;
    config
}

fn stage_repo() -> MockRepository {
    let mut repo = MockRepository::new();
    repo.add_branch("feature/stage");
    repo.set_current_branch("feature/login");
    repo
}

// ============================================================================
// Action parsing
// ============================================================================

#[test]
fn test_unknown_action_issues_zero_commands() {
    let repo = MockRepository::new();
    let err = run_workflow(&repo, &Config::default(), Some("deploy"), today()).unwrap_err();

    assert!(matches!(err, FlowError::UnknownAction(ref name) if name == "deploy"));
    assert!(repo.commands().is_empty(), "got {:?}", repo.commands());
}

#[test]
fn test_missing_action_is_fatal() {
    let repo = MockRepository::new();
    let err = run_workflow(&repo, &Config::default(), None, today()).unwrap_err();

    assert_eq!(err.to_string(), "empty gitflow action");
    assert!(repo.commands().is_empty());
}

// ============================================================================
// Pre-flight fetch
// ============================================================================

#[test]
fn test_fetch_runs_before_action() {
    let repo = MockRepository::new();
    run_workflow(&repo, &Config::default(), Some("release"), today()).unwrap();

    let commands = repo.commands();
    assert_eq!(commands[0], "git fetch origin");
    assert_eq!(commands[1], "git flow release start 2024.08.05.01");
}

#[test]
fn test_fetch_failure_is_not_fatal() {
    let mut repo = MockRepository::new();
    repo.fail_command("git fetch", "fatal: unable to access remote");

    let result = run_workflow(&repo, &Config::default(), Some("hotfix"), today()).unwrap();

    assert_eq!(result.versions[0].to_string(), "2024.08.05.01");
    assert_eq!(
        repo.flow_commands(),
        vec!["git flow hotfix start 2024.08.05.01".to_string()]
    );
}

#[test]
fn test_fetch_uses_configured_remote() {
    let repo = MockRepository::new();
    let mut config = Config::default();
    config.remote = "upstream".to_string();

    run_workflow(&repo, &config, Some("release"), today()).unwrap();
    assert_eq!(repo.commands()[0], "git fetch upstream");
}

#[test]
fn test_fetch_can_be_disabled() {
    let repo = MockRepository::new();
    run_workflow(&repo, &offline_config(), Some("release"), today()).unwrap();

    assert!(repo.commands().iter().all(|c| !c.starts_with("git fetch")));
}

// ============================================================================
// release / hotfix
// ============================================================================

#[test]
fn test_release_starts_next_free_version() {
    let mut repo = MockRepository::new();
    repo.set_latest_tag("2024.08.05.01");
    repo.add_branch("release/2024.08.05.02");

    let result = run_workflow(&repo, &offline_config(), Some("release"), today()).unwrap();

    assert_eq!(result.action, WorkflowAction::Start(WorkflowType::Release));
    assert_eq!(result.versions[0].to_string(), "2024.08.05.03");
    assert!(result.output.contains("release/2024.08.05.03"));
    assert!(repo.has_branch("release/2024.08.05.03"));
}

#[test]
fn test_hotfix_start_failure_is_fatal() {
    let mut repo = MockRepository::new();
    repo.fail_command("git flow hotfix start", "Fatal: Not a gitflow-enabled repo yet.");

    let err = run_workflow(&repo, &offline_config(), Some("hotfix"), today()).unwrap_err();

    assert!(err.to_string().contains("Not a gitflow-enabled repo"));
    assert_eq!(repo.flow_commands().len(), 1);
}

// ============================================================================
// fast_release
// ============================================================================

#[test]
fn test_fast_release_issues_four_commands_in_order() {
    let repo = MockRepository::new();
    let result = run_workflow(&repo, &Config::default(), Some("fast_release"), today()).unwrap();

    assert_eq!(
        repo.flow_commands(),
        vec![
            "git flow hotfix start 2024.08.05.01".to_string(),
            "git flow hotfix finish 2024.08.05.01 -m \"Tagging version 2024.08.05.01\"".to_string(),
            "git flow release start 2024.08.05.02".to_string(),
            "git flow release finish 2024.08.05.02 -m \"Tagging version 2024.08.05.02\"".to_string(),
        ]
    );
    assert_eq!(result.versions.len(), 2);
}

#[test]
fn test_fast_release_versions_match_invocation_date() {
    let mut repo = MockRepository::new();
    repo.set_latest_tag("2024.08.05.05");

    run_workflow(&repo, &offline_config(), Some("fast_release"), today()).unwrap();

    let shape = Regex::new(r"^git flow (hotfix|release) (start|finish) 2024\.08\.05\.\d{2,}( |$)").unwrap();
    let commands = repo.flow_commands();
    assert_eq!(commands.len(), 4);
    for command in &commands {
        assert!(shape.is_match(command), "unexpected command: {}", command);
    }
    assert!(commands[0].ends_with("2024.08.05.06"));
    assert!(commands[2].ends_with("2024.08.05.07"));
}

#[test]
fn test_fast_release_requeries_after_hotfix() {
    let repo = MockRepository::new();
    let WorkflowResult { versions, .. } =
        run_workflow(&repo, &offline_config(), Some("fast_release"), today()).unwrap();

    assert_ne!(versions[0], versions[1]);
    assert_eq!(repo.tag().as_deref(), Some("2024.08.05.02"));
}

#[test]
fn test_fast_release_hotfix_start_failure_stops_everything() {
    let mut repo = MockRepository::new();
    repo.fail_command("git flow hotfix start", "Fatal: working tree is dirty");

    assert!(run_workflow(&repo, &offline_config(), Some("fast_release"), today()).is_err());
    assert_eq!(repo.flow_commands().len(), 1);
}

#[test]
fn test_fast_release_finish_failure_stops_without_rollback() {
    let mut repo = MockRepository::new();
    repo.fail_command("git flow release finish", "Fatal: merge conflict on master");

    let err = run_workflow(&repo, &offline_config(), Some("fast_release"), today()).unwrap_err();

    assert!(err.to_string().contains("merge conflict on master"));
    // hotfix stays finished, release branch stays open
    assert_eq!(repo.tag().as_deref(), Some("2024.08.05.01"));
    assert!(repo.has_branch("release/2024.08.05.02"));
    assert_eq!(repo.flow_commands().len(), 4);
    assert!(repo.commands().iter().all(|c| !c.starts_with("git checkout")));
}

#[test]
fn test_fast_release_hotfix_finish_failure_skips_release() {
    let mut repo = MockRepository::new();
    repo.fail_command("git flow hotfix finish", "Fatal: tag already exists");

    assert!(run_workflow(&repo, &offline_config(), Some("fast_release"), today()).is_err());
    assert_eq!(repo.flow_commands().len(), 2);
    assert!(!repo.flow_commands().iter().any(|c| c.contains("release")));
}

// ============================================================================
// merge_cur_to_stage
// ============================================================================

#[test]
fn test_merge_success_returns_to_original_branch() {
    let repo = stage_repo();
    let result = run_workflow(&repo, &offline_config(), Some("merge_cur_to_stage"), today()).unwrap();

    assert_eq!(
        repo.commands(),
        vec![
            "git checkout feature/stage".to_string(),
            "git merge feature/login".to_string(),
            "git checkout feature/login".to_string(),
        ]
    );
    assert_eq!(repo.current_branch().as_deref(), Some("feature/login"));
    assert!(result.output.contains("Merge made by"));
    assert!(result.versions.is_empty());
}

// `git rev-parse --abbrev-ref HEAD` style output ends in a newline
#[test]
fn test_merge_trims_current_branch_name() {
    let mut repo = MockRepository::new();
    repo.add_branch("feature/stage");
    repo.add_branch("feature/login");
    repo.set_current_branch("feature/login\n");

    run_workflow(&repo, &offline_config(), Some("merge_cur_to_stage"), today()).unwrap();

    assert_eq!(
        repo.commands(),
        vec![
            "git checkout feature/stage".to_string(),
            "git merge feature/login".to_string(),
            "git checkout feature/login".to_string(),
        ]
    );
    assert_eq!(repo.current_branch().as_deref(), Some("feature/login"));
}

#[test]
fn test_merge_failure_returns_to_original_branch() {
    let mut repo = stage_repo();
    repo.fail_command("git merge", "CONFLICT (content): Merge conflict in src/lib.rs");

    let err = run_workflow(&repo, &offline_config(), Some("merge_cur_to_stage"), today()).unwrap_err();

    assert!(err.to_string().contains("Merge conflict in src/lib.rs"));
    assert_eq!(repo.current_branch().as_deref(), Some("feature/login"));
    assert_eq!(
        repo.commands().last().map(String::as_str),
        Some("git checkout feature/login")
    );
}

#[test]
fn test_merge_failure_reports_merge_error_even_if_switch_back_fails() {
    let mut repo = stage_repo();
    repo.fail_command("git merge", "CONFLICT");
    repo.fail_command("git checkout feature/login", "error: local changes");

    let err = run_workflow(&repo, &offline_config(), Some("merge_cur_to_stage"), today()).unwrap_err();

    assert!(err.to_string().starts_with("`git merge feature/login` failed"));
}

#[test]
fn test_missing_stage_branch_fails_before_anything() {
    let mut repo = MockRepository::new();
    repo.set_current_branch("feature/login");

    let err = run_workflow(&repo, &offline_config(), Some("merge_cur_to_stage"), today()).unwrap_err();

    assert_eq!(err.to_string(), "branch feature/stage does not exist");
    assert!(repo.commands().is_empty());
    assert_eq!(repo.current_branch_queries(), 0);
}

#[test]
fn test_stage_checkout_failure_stays_on_original() {
    let mut repo = stage_repo();
    repo.fail_command("git checkout feature/stage", "error: local changes would be overwritten");

    assert!(run_workflow(&repo, &offline_config(), Some("merge_cur_to_stage"), today()).is_err());
    assert_eq!(repo.commands(), vec!["git checkout feature/stage".to_string()]);
    assert_eq!(repo.current_branch().as_deref(), Some("feature/login"));
}

#[test]
fn test_detached_head_is_fatal_before_checkout() {
    let mut repo = MockRepository::new();
    repo.add_branch("feature/stage");

    let err = run_workflow(&repo, &offline_config(), Some("merge_cur_to_stage"), today()).unwrap_err();

    assert!(matches!(err, FlowError::DetachedHead));
    assert!(repo.commands().is_empty());
}

#[test]
fn test_configured_stage_branch() {
    let mut repo = MockRepository::new();
    repo.add_branch("integration");
    repo.set_current_branch("feature/search");
    let mut config = offline_config();
    config.stage_branch = "integration".to_string();

    run_workflow(&repo, &config, Some("merge_cur_to_stage"), today()).unwrap();
    assert_eq!(repo.commands()[0], "git checkout integration");
}
