//! Hosting-provider policy: remote-URL normalization, host detection,
//! and the open-repository decision.
//!
//! Everything here is pure so the decision table can be tested without
//! touching the git or browser collaborators.

use crate::config::Config;

/// Applied when the configuration names GitHub but leaves
/// `openActionPage` unset.
pub const DEFAULT_OPEN_ACTIONS_PAGE: bool = true;

/// What to do after a successful push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenAction {
    /// Open `url` without prompting (the configuration named the
    /// recognized provider).
    Open { url: String },
    /// Ask the operator first; open `url` on a yes.
    Prompt { url: String },
}

/// Normalize a remote URL to its HTTPS web form.
///
/// SSH shorthand such as `git@github.com:owner/repo.git` becomes
/// `https://github.com/owner/repo`: the user prefix is stripped, the
/// first colon becomes a slash, and the `.git` suffix is removed. URLs
/// that already carry a scheme only lose the `.git` suffix.
pub fn normalize_remote_url(raw: &str) -> String {
    let mut url = raw.trim().to_string();

    if !url.contains("://") {
        if let Some(at) = url.find('@') {
            let rest = &url[at + 1..];
            url = format!("https://{}", rest.replacen(':', "/", 1));
        }
    }

    if let Some(stripped) = url.strip_suffix(".git") {
        url = stripped.to_string();
    }

    url
}

/// Whether a web URL points at github.com.
pub fn is_github_url(url: &str) -> bool {
    host_of(url).is_some_and(|host| host == "github.com")
}

fn host_of(url: &str) -> Option<&str> {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = rest.split('/').next()?;
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    let host = host.split(':').next()?;
    (!host.is_empty()).then_some(host)
}

/// Decide how to handle the open-repository step for a normalized
/// repository URL.
///
/// With a configuration naming GitHub, the page opens without a prompt;
/// the Actions page unless `openActionPage` is explicitly false. A
/// configuration naming another provider, or no configuration at all,
/// falls back to prompting — with the Actions page as the target only
/// when the remote host actually is github.com.
pub fn plan_open_action(config: Option<&Config>, repo_url: &str) -> OpenAction {
    if let Some(cfg) = config {
        if cfg.git_hosting_provider.is_some() {
            if cfg.is_github() {
                let url = if cfg.open_action_page().unwrap_or(DEFAULT_OPEN_ACTIONS_PAGE) {
                    format!("{}/actions", repo_url)
                } else {
                    repo_url.to_string()
                };
                return OpenAction::Open { url };
            }
            return OpenAction::Prompt {
                url: repo_url.to_string(),
            };
        }
    }

    let url = if is_github_url(repo_url) {
        format!("{}/actions", repo_url)
    } else {
        repo_url.to_string()
    };
    OpenAction::Prompt { url }
}
