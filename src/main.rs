use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use git_flow_release::cli::{parse_action, Orchestrator, WorkflowResult};
use git_flow_release::git::GitCliRepository;
use git_flow_release::{config, telemetry, ui};

#[derive(clap::Parser)]
#[command(
    name = "git-flow-release",
    version,
    about = "Start and finish date-versioned gitflow release/hotfix branches"
)]
struct Args {
    #[arg(
        value_name = "ACTION",
        help = "release | hotfix | fast_release | merge_cur_to_stage"
    )]
    action: Option<String>,
}

fn main() {
    telemetry::init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(result) => report(&result),
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<WorkflowResult> {
    // reject bad actions before touching the repository
    let action = parse_action(args.action.as_deref())?;

    let config = config::load_config(None).context("Error loading config")?;
    let repo = GitCliRepository::open(".").context("Not in a git repository")?;
    let today = Local::now().date_naive();

    let result = Orchestrator::new(&repo, &config, today).run(action)?;
    Ok(result)
}

fn report(result: &WorkflowResult) {
    let versions: Vec<String> = result.versions.iter().map(|v| v.to_string()).collect();
    if versions.is_empty() {
        ui::display_success(&format!("{} done", result.action));
    } else {
        ui::display_success(&format!("{} done: {}", result.action, versions.join(", ")));
    }
}
