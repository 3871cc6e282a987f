use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};

use tagger::browser::SystemBrowser;
use tagger::config;
use tagger::git::Git2Repository;
use tagger::history;
use tagger::ui::{self, ConsolePrompter};
use tagger::workflow::{self, WorkflowArgs};

#[derive(Parser)]
#[command(
    name = "tagger",
    about = "Create and manage semantic version git tags",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    #[arg(short, long, help = "Tag message (creates an annotated tag)")]
    message: Option<String>,

    #[arg(long, help = "Push the tag to the remote without asking")]
    push: bool,

    #[arg(long, conflicts_with = "push", help = "Never push the tag")]
    no_push: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Create a tagger.config.json configuration file
    Init,

    /// Show the semantic version tag history
    History {
        #[arg(
            short = 'n',
            long = "limit",
            default_value_t = history::DEFAULT_LIMIT,
            help = "Number of versions to show (0 for all)"
        )]
        limit: usize,
    },
}

fn main() {
    let args = Args::parse();

    let result = match &args.command {
        Some(Command::Init) => run_init(),
        Some(Command::History { limit }) => run_history(*limit),
        None => run_tag(&args),
    };

    if let Err(e) = result {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run_tag(args: &Args) -> Result<()> {
    let config = config::load()?;
    let repo = Git2Repository::discover()?;
    let prompter = ConsolePrompter::new();
    let browser = SystemBrowser;

    let workflow_args = WorkflowArgs {
        message: args.message.clone(),
        auto_push: args.push,
        no_push: args.no_push,
        dry_run: args.dry_run,
    };

    // Every outcome (including cancellation and a failed push after a
    // successful tag creation) exits with status zero; only Err is fatal.
    workflow::run(&repo, &prompter, &browser, config.as_ref(), &workflow_args)?;
    Ok(())
}

fn run_init() -> Result<()> {
    ui::display_info("Creating tagger configuration file...");

    let path = config::create_default_in(Path::new("."))?;

    ui::display_success(&format!("Created {}", path.display()));
    ui::display_info(&format!("  Schema: {}", config::schema_url()));
    println!();
    ui::display_help("You can now customize your configuration:");
    ui::display_help("  - gitHostingProvider: GitHub or Other");
    ui::display_help("  - github.openActionPage: true (Actions page) or false (homepage)");
    Ok(())
}

fn run_history(limit: usize) -> Result<()> {
    let repo = Git2Repository::discover()?;
    history::run(&repo, limit)?;
    Ok(())
}
