//! The release workflow: a strictly ordered sequence of decision points
//! that turns an operator choice into a committed, possibly-pushed tag.
//!
//! Each step performs one collaborator call or one operator prompt, then
//! advances on its result. Infrastructure failures abort the run; prompt
//! cancellations and post-creation push failures are normal outcomes,
//! reported through [WorkflowOutcome] rather than errors. Mutations are
//! never rolled back: once the tag exists, every later failure leaves it
//! in place.

use crate::browser::BrowserLauncher;
use crate::config::Config;
use crate::error::{Result, TaggerError};
use crate::git::Repository;
use crate::hosting::{self, OpenAction};
use crate::ui::{
    display_error, display_help, display_info, display_success, display_warning, Answer,
    BumpPreviews, Prompter,
};
use crate::version::{self, Bump};

/// Workflow parameters, already validated by the CLI layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowArgs {
    /// Tag message given on the command line; skips the message prompts
    /// and forces an annotated tag.
    pub message: Option<String>,

    /// Push without asking.
    pub auto_push: bool,

    /// Never push, never ask.
    pub no_push: bool,

    /// Compute and report every decision without issuing a mutating call.
    pub dry_run: bool,
}

/// Terminal record of a workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// The operator backed out before the tag was created.
    Cancelled,
    /// Tag created; push skipped or declined.
    TagCreated,
    /// Tag created and pushed.
    TagCreatedAndPushed,
    /// Tag created but the push failed; the tag stays in place.
    TagCreatedPushFailed,
    /// Dry-run completed without any mutating call.
    DryRun,
}

/// Run the tag workflow against the given collaborators.
///
/// Every [WorkflowOutcome] maps to a zero exit status; `Err` is reserved
/// for fatal conditions (not a repository, listing failure, duplicate
/// tag, creation failure, prompt infrastructure failure).
pub fn run(
    repo: &dyn Repository,
    prompter: &dyn Prompter,
    browser: &dyn BrowserLauncher,
    config: Option<&Config>,
    args: &WorkflowArgs,
) -> Result<WorkflowOutcome> {
    if !repo.is_repository() {
        return Err(TaggerError::repository(
            "not a git repository (or any of the parent directories)",
        ));
    }

    if repo.has_uncommitted_changes()? {
        display_warning("You have uncommitted changes");
    }

    let tags = repo
        .list_tags()
        .map_err(|e| TaggerError::tag(format!("failed to list tags: {}", e)))?;
    let versions = version::parse_tags(&tags);
    let current = version::latest(&versions);
    let current_tag = version::format_tag(&current);

    let previews = BumpPreviews {
        patch: preview(&current_tag, &current, Bump::Patch),
        minor: preview(&current_tag, &current, Bump::Minor),
        major: preview(&current_tag, &current, Bump::Major),
    };

    let kind = match prompter.select_bump(&current_tag, &previews)? {
        Answer::Value(kind) => kind,
        Answer::Cancelled => return cancelled(),
    };

    let new_version = version::bump(&current, kind);
    let new_tag = version::format_tag(&new_version);

    let message = match &args.message {
        Some(message) => message.clone(),
        None => match prompter.confirm("Add a tag message?", false)? {
            Answer::Cancelled => return cancelled(),
            Answer::Value(false) => String::new(),
            Answer::Value(true) => {
                let default_text = format!("Release {}: ", new_tag);
                match prompter.input_text("Tag message", &default_text)? {
                    Answer::Value(text) => text,
                    Answer::Cancelled => return cancelled(),
                }
            }
        },
    };

    let summary = confirmation_summary(&current_tag, &new_tag, &message);
    match prompter.confirm(&summary, true)? {
        Answer::Value(true) => {}
        Answer::Value(false) | Answer::Cancelled => return cancelled(),
    }

    // Correctness guard: never silently overwrite or no-op on a
    // duplicate tag.
    let exists = repo
        .tag_exists(&new_tag)
        .map_err(|e| TaggerError::tag(format!("failed to check tag existence: {}", e)))?;
    if exists {
        return Err(TaggerError::tag(format!("tag {} already exists", new_tag)));
    }

    if args.dry_run {
        display_info(&format!("Dry run: would create tag {}", new_tag));
        if !message.is_empty() {
            display_info(&format!("  Message: {}", message));
        }
    } else {
        let created = if message.is_empty() {
            repo.create_tag(&new_tag)
        } else {
            repo.create_annotated_tag(&new_tag, &message)
        };
        created.map_err(|e| TaggerError::tag(format!("failed to create tag '{}': {}", new_tag, e)))?;
        display_success(&format!("Tag {} created successfully!", new_tag));
    }

    let has_remote = repo
        .has_remote()
        .map_err(|e| TaggerError::remote(format!("failed to check remote: {}", e)))?;
    if !has_remote {
        display_info("No remote repository configured, skipping push");
        return Ok(completed(args, WorkflowOutcome::TagCreated));
    }

    let should_push = if args.auto_push {
        true
    } else if args.no_push {
        false
    } else {
        match prompter.confirm(&format!("Push tag {} to remote?", new_tag), true)? {
            Answer::Value(confirmed) => confirmed,
            Answer::Cancelled => {
                // The tag already exists; backing out of the prompt just
                // means "do not push".
                display_info("Skipping push");
                false
            }
        }
    };

    if !should_push {
        return Ok(completed(args, WorkflowOutcome::TagCreated));
    }

    if args.dry_run {
        display_info(&format!("Dry run: would push tag {} to remote", new_tag));
        return Ok(WorkflowOutcome::DryRun);
    }

    if let Err(e) = repo.push_tag(&new_tag) {
        display_error(&format!("Failed to push tag: {}", e));
        display_help(&format!(
            "  You can manually push with: git push origin {}",
            new_tag
        ));
        return Ok(WorkflowOutcome::TagCreatedPushFailed);
    }
    display_success(&format!("Tag {} pushed to remote successfully!", new_tag));

    // Tag and push both succeeded; nothing after this point changes the
    // outcome.
    if let Err(e) = open_repository_page(repo, prompter, browser, config) {
        display_error(&e.to_string());
    }

    Ok(WorkflowOutcome::TagCreatedAndPushed)
}

fn preview(current_tag: &str, current: &semver::Version, kind: Bump) -> String {
    format!(
        "{} → {}",
        current_tag,
        version::format_tag(&version::bump(current, kind))
    )
}

fn confirmation_summary(current_tag: &str, new_tag: &str, message: &str) -> String {
    if message.is_empty() {
        return format!("Create tag {} → {}?", current_tag, new_tag);
    }

    let preview: String = if message.chars().count() > 50 {
        let truncated: String = message.chars().take(50).collect();
        format!("{}...", truncated)
    } else {
        message.to_string()
    };
    format!(
        "Create tag {} → {}\nMessage: {}",
        current_tag, new_tag, preview
    )
}

fn cancelled() -> Result<WorkflowOutcome> {
    display_info("Operation cancelled");
    Ok(WorkflowOutcome::Cancelled)
}

fn completed(args: &WorkflowArgs, outcome: WorkflowOutcome) -> WorkflowOutcome {
    if args.dry_run {
        WorkflowOutcome::DryRun
    } else {
        outcome
    }
}

/// Open-repository step, reached only after a successful push.
///
/// Errors from this step never change the workflow outcome; the caller
/// reports them and moves on.
fn open_repository_page(
    repo: &dyn Repository,
    prompter: &dyn Prompter,
    browser: &dyn BrowserLauncher,
    config: Option<&Config>,
) -> Result<()> {
    let raw_url = repo
        .remote_url()
        .map_err(|e| TaggerError::remote(format!("failed to get repository URL: {}", e)))?;
    let repo_url = hosting::normalize_remote_url(&raw_url);

    if let Some(cfg) = config {
        if let Some(provider) = cfg.git_hosting_provider {
            display_info(&format!("Detected git hosting provider: {}", provider));
            if cfg.is_github() && !hosting::is_github_url(&repo_url) {
                display_warning("Config specifies GitHub, but repository URL is not github.com");
            }
        }
    }

    match hosting::plan_open_action(config, &repo_url) {
        OpenAction::Open { url } => {
            if url.ends_with("/actions") {
                display_info("Opening GitHub Actions page (configured in tagger.config.json)");
            } else {
                display_info("Opening repository homepage (configured in tagger.config.json)");
            }
            launch_browser(browser, &url);
        }
        OpenAction::Prompt { url } => {
            match prompter.confirm("Open repository in browser?", false)? {
                Answer::Value(true) => launch_browser(browser, &url),
                Answer::Value(false) | Answer::Cancelled => {}
            }
        }
    }

    Ok(())
}

fn launch_browser(browser: &dyn BrowserLauncher, url: &str) {
    match browser.open(url) {
        Ok(()) => display_success(&format!("Opening {} in browser...", url)),
        Err(e) => {
            display_error(&format!("Failed to open browser: {}", e));
            display_help(&format!("  Repository URL: {}", url));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::MockBrowser;
    use crate::config::{GithubConfig, HostingProvider};
    use crate::git::MockRepository;
    use crate::ui::ScriptedPrompter;

    fn run_workflow(
        repo: &MockRepository,
        prompter: ScriptedPrompter,
        config: Option<&Config>,
        args: &WorkflowArgs,
    ) -> (Result<WorkflowOutcome>, MockBrowser) {
        let browser = MockBrowser::new();
        let outcome = run(repo, &prompter, &browser, config, args);
        (outcome, browser)
    }

    #[test]
    fn test_not_a_repository_is_fatal() {
        let repo = MockRepository::new().not_a_repository();
        let (outcome, _) = run_workflow(
            &repo,
            ScriptedPrompter::new(),
            None,
            &WorkflowArgs::default(),
        );
        assert!(outcome.is_err());
    }

    #[test]
    fn test_tag_listing_failure_is_fatal() {
        let repo = MockRepository::new().with_failing_tag_listing();
        let (outcome, _) = run_workflow(
            &repo,
            ScriptedPrompter::new(),
            None,
            &WorkflowArgs::default(),
        );
        assert!(outcome.is_err());
        assert!(repo.created_tags().is_empty());
    }

    #[test]
    fn test_cancel_at_bump_selection_leaves_no_side_effects() {
        let repo = MockRepository::new()
            .with_tag("v1.2.0")
            .with_remote("git@github.com:owner/repo.git");
        let prompter = ScriptedPrompter::new().cancel_bump();

        let (outcome, browser) = run_workflow(&repo, prompter, None, &WorkflowArgs::default());

        assert_eq!(outcome.unwrap(), WorkflowOutcome::Cancelled);
        assert!(repo.created_tags().is_empty());
        assert!(repo.pushed_tags().is_empty());
        assert!(browser.opened_urls().is_empty());
    }

    #[test]
    fn test_decline_at_final_confirmation_cancels() {
        let repo = MockRepository::new().with_tag("v1.2.0");
        let prompter = ScriptedPrompter::new()
            .pick_bump(Bump::Patch)
            .answer(false) // no message
            .answer(false); // do not create

        let (outcome, _) = run_workflow(&repo, prompter, None, &WorkflowArgs::default());

        assert_eq!(outcome.unwrap(), WorkflowOutcome::Cancelled);
        assert!(repo.created_tags().is_empty());
    }

    #[test]
    fn test_no_remote_ends_in_tag_created() {
        let repo = MockRepository::new().with_tag("v1.2.0");
        let prompter = ScriptedPrompter::new()
            .pick_bump(Bump::Patch)
            .answer(false)
            .answer(true);

        let (outcome, _) = run_workflow(&repo, prompter, None, &WorkflowArgs::default());

        assert_eq!(outcome.unwrap(), WorkflowOutcome::TagCreated);
        assert_eq!(repo.created_tags(), vec![("v1.2.1".to_string(), None)]);
        assert!(repo.pushed_tags().is_empty());
    }

    #[test]
    fn test_first_tag_in_empty_repository() {
        let repo = MockRepository::new();
        let prompter = ScriptedPrompter::new()
            .pick_bump(Bump::Patch)
            .answer(false)
            .answer(true);

        let (outcome, _) = run_workflow(&repo, prompter, None, &WorkflowArgs::default());

        assert_eq!(outcome.unwrap(), WorkflowOutcome::TagCreated);
        assert_eq!(repo.created_tags(), vec![("v0.0.1".to_string(), None)]);
    }

    #[test]
    fn test_message_flow_creates_annotated_tag() {
        let repo = MockRepository::new().with_tag("v1.2.0");
        let prompter = ScriptedPrompter::new()
            .pick_bump(Bump::Minor)
            .answer(true) // add a message
            .type_text("Release v1.3.0: highlights")
            .answer(true); // create

        let (outcome, _) = run_workflow(&repo, prompter, None, &WorkflowArgs::default());

        assert_eq!(outcome.unwrap(), WorkflowOutcome::TagCreated);
        assert_eq!(
            repo.created_tags(),
            vec![(
                "v1.3.0".to_string(),
                Some("Release v1.3.0: highlights".to_string())
            )]
        );
    }

    #[test]
    fn test_message_flag_skips_message_prompts() {
        let repo = MockRepository::new().with_tag("v1.2.0");
        let prompter = ScriptedPrompter::new()
            .pick_bump(Bump::Patch)
            .answer(true); // create confirmation only

        let args = WorkflowArgs {
            message: Some("hotfix".to_string()),
            ..WorkflowArgs::default()
        };
        let (outcome, _) = run_workflow(&repo, prompter, None, &args);

        assert_eq!(outcome.unwrap(), WorkflowOutcome::TagCreated);
        assert_eq!(
            repo.created_tags(),
            vec![("v1.2.1".to_string(), Some("hotfix".to_string()))]
        );
    }

    #[test]
    fn test_existing_target_tag_is_fatal() {
        // v1.2.1 appeared after the listing (e.g. a second shell); the
        // guard must abort instead of overwriting it.
        let repo = MockRepository::new()
            .with_tag("v1.2.0")
            .with_unlisted_tag("v1.2.1");
        let prompter = ScriptedPrompter::new()
            .pick_bump(Bump::Patch)
            .answer(false)
            .answer(true);

        let (outcome, _) = run_workflow(&repo, prompter, None, &WorkflowArgs::default());

        let err = outcome.unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(repo.created_tags().is_empty());
        assert!(repo.pushed_tags().is_empty());
    }

    #[test]
    fn test_push_confirmed_ends_in_pushed() {
        let repo = MockRepository::new()
            .with_tag("v1.2.0")
            .with_remote("git@github.com:owner/repo.git");
        let prompter = ScriptedPrompter::new()
            .pick_bump(Bump::Patch)
            .answer(false) // no message
            .answer(true) // create
            .answer(true) // push
            .answer(false); // do not open browser

        let (outcome, browser) = run_workflow(&repo, prompter, None, &WorkflowArgs::default());

        assert_eq!(outcome.unwrap(), WorkflowOutcome::TagCreatedAndPushed);
        assert_eq!(repo.pushed_tags(), vec!["v1.2.1".to_string()]);
        assert!(browser.opened_urls().is_empty());
    }

    #[test]
    fn test_push_failure_is_non_fatal_and_keeps_tag() {
        let repo = MockRepository::new()
            .with_tag("v1.2.0")
            .with_remote("git@github.com:owner/repo.git")
            .with_failing_push();
        let prompter = ScriptedPrompter::new()
            .pick_bump(Bump::Patch)
            .answer(false)
            .answer(true)
            .answer(true); // push (fails)

        let (outcome, browser) = run_workflow(&repo, prompter, None, &WorkflowArgs::default());

        assert_eq!(outcome.unwrap(), WorkflowOutcome::TagCreatedPushFailed);
        // The tag stays in place; no rollback, no retry, no browser.
        assert_eq!(repo.created_tags(), vec![("v1.2.1".to_string(), None)]);
        assert!(repo.pushed_tags().is_empty());
        assert!(browser.opened_urls().is_empty());
    }

    #[test]
    fn test_cancel_at_push_prompt_keeps_tag() {
        let repo = MockRepository::new()
            .with_tag("v1.2.0")
            .with_remote("git@github.com:owner/repo.git");
        let prompter = ScriptedPrompter::new()
            .pick_bump(Bump::Patch)
            .answer(false)
            .answer(true)
            .cancel_confirm(); // cancel the push prompt

        let (outcome, _) = run_workflow(&repo, prompter, None, &WorkflowArgs::default());

        assert_eq!(outcome.unwrap(), WorkflowOutcome::TagCreated);
        assert_eq!(repo.created_tags(), vec![("v1.2.1".to_string(), None)]);
        assert!(repo.pushed_tags().is_empty());
    }

    #[test]
    fn test_auto_push_skips_the_prompt() {
        let repo = MockRepository::new()
            .with_tag("v1.2.0")
            .with_remote("git@github.com:owner/repo.git");
        let prompter = ScriptedPrompter::new()
            .pick_bump(Bump::Major)
            .answer(false)
            .answer(true)
            .answer(false); // do not open browser

        let args = WorkflowArgs {
            auto_push: true,
            ..WorkflowArgs::default()
        };
        let (outcome, _) = run_workflow(&repo, prompter, None, &args);

        assert_eq!(outcome.unwrap(), WorkflowOutcome::TagCreatedAndPushed);
        assert_eq!(repo.pushed_tags(), vec!["v2.0.0".to_string()]);
    }

    #[test]
    fn test_no_push_skips_push_entirely() {
        let repo = MockRepository::new()
            .with_tag("v1.2.0")
            .with_remote("git@github.com:owner/repo.git");
        let prompter = ScriptedPrompter::new()
            .pick_bump(Bump::Patch)
            .answer(false)
            .answer(true);

        let args = WorkflowArgs {
            no_push: true,
            ..WorkflowArgs::default()
        };
        let (outcome, _) = run_workflow(&repo, prompter, None, &args);

        assert_eq!(outcome.unwrap(), WorkflowOutcome::TagCreated);
        assert!(repo.pushed_tags().is_empty());
    }

    #[test]
    fn test_dry_run_never_mutates() {
        let repo = MockRepository::new()
            .with_tag("v1.2.0")
            .with_remote("git@github.com:owner/repo.git");
        let prompter = ScriptedPrompter::new()
            .pick_bump(Bump::Patch)
            .answer(false)
            .answer(true)
            .answer(true); // push (reported only)

        let args = WorkflowArgs {
            dry_run: true,
            ..WorkflowArgs::default()
        };
        let (outcome, browser) = run_workflow(&repo, prompter, None, &args);

        assert_eq!(outcome.unwrap(), WorkflowOutcome::DryRun);
        assert!(repo.created_tags().is_empty());
        assert!(repo.pushed_tags().is_empty());
        assert!(browser.opened_urls().is_empty());
    }

    #[test]
    fn test_dry_run_without_remote_is_still_dry_run() {
        let repo = MockRepository::new().with_tag("v1.2.0");
        let prompter = ScriptedPrompter::new()
            .pick_bump(Bump::Patch)
            .answer(false)
            .answer(true);

        let args = WorkflowArgs {
            dry_run: true,
            ..WorkflowArgs::default()
        };
        let (outcome, _) = run_workflow(&repo, prompter, None, &args);

        assert_eq!(outcome.unwrap(), WorkflowOutcome::DryRun);
        assert!(repo.created_tags().is_empty());
    }

    #[test]
    fn test_dry_run_cancel_still_reports_cancelled() {
        let repo = MockRepository::new().with_tag("v1.2.0");
        let prompter = ScriptedPrompter::new().cancel_bump();

        let args = WorkflowArgs {
            dry_run: true,
            ..WorkflowArgs::default()
        };
        let (outcome, _) = run_workflow(&repo, prompter, None, &args);

        assert_eq!(outcome.unwrap(), WorkflowOutcome::Cancelled);
    }

    #[test]
    fn test_github_config_opens_actions_without_prompt() {
        let config = Config {
            schema: None,
            git_hosting_provider: Some(HostingProvider::GitHub),
            github: Some(GithubConfig {
                open_action_page: None,
            }),
        };
        let repo = MockRepository::new()
            .with_tag("v1.2.0")
            .with_remote("git@github.com:owner/repo.git");
        let prompter = ScriptedPrompter::new()
            .pick_bump(Bump::Patch)
            .answer(false)
            .answer(true)
            .answer(true); // push; no open prompt expected

        let (outcome, browser) = run_workflow(&repo, prompter, Some(&config), &WorkflowArgs::default());

        assert_eq!(outcome.unwrap(), WorkflowOutcome::TagCreatedAndPushed);
        assert_eq!(
            browser.opened_urls(),
            vec!["https://github.com/owner/repo/actions".to_string()]
        );
    }

    #[test]
    fn test_open_prompt_accepted_opens_homepage_for_unrecognized_host() {
        let repo = MockRepository::new()
            .with_tag("v1.2.0")
            .with_remote("git@gitlab.com:owner/repo.git");
        let prompter = ScriptedPrompter::new()
            .pick_bump(Bump::Patch)
            .answer(false)
            .answer(true)
            .answer(true) // push
            .answer(true); // open browser

        let (outcome, browser) = run_workflow(&repo, prompter, None, &WorkflowArgs::default());

        assert_eq!(outcome.unwrap(), WorkflowOutcome::TagCreatedAndPushed);
        assert_eq!(
            browser.opened_urls(),
            vec!["https://gitlab.com/owner/repo".to_string()]
        );
    }

    #[test]
    fn test_browser_failure_does_not_change_outcome() {
        let repo = MockRepository::new()
            .with_tag("v1.2.0")
            .with_remote("git@github.com:owner/repo.git");
        let prompter = ScriptedPrompter::new()
            .pick_bump(Bump::Patch)
            .answer(false)
            .answer(true)
            .answer(true) // push
            .answer(true); // open browser (fails)
        let browser = MockBrowser::new().with_failing_launch();

        let outcome = run(&repo, &prompter, &browser, None, &WorkflowArgs::default());

        assert_eq!(outcome.unwrap(), WorkflowOutcome::TagCreatedAndPushed);
    }

    #[test]
    fn test_confirmation_summary_truncates_long_messages() {
        let long = "x".repeat(80);
        let summary = confirmation_summary("v1.0.0", "v1.0.1", &long);
        assert!(summary.contains(&format!("{}...", "x".repeat(50))));
        assert!(!summary.contains(&"x".repeat(51)));
    }

    #[test]
    fn test_confirmation_summary_without_message() {
        let summary = confirmation_summary("v1.0.0", "v1.0.1", "");
        assert_eq!(summary, "Create tag v1.0.0 → v1.0.1?");
    }
}
