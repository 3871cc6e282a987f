//! The `history` subcommand: semantic-version tags, newest first.

use console::style;
use semver::Version;

use crate::error::{Result, TaggerError};
use crate::git::{Repository, TagInfo};
use crate::ui::{display_help, display_info};
use crate::version;

/// Number of versions shown when no limit is given.
pub const DEFAULT_LIMIT: usize = 10;

/// Keep the semantic-version subset of the tags and sort it newest-first
/// by version precedence.
fn semver_entries(tag_infos: Vec<TagInfo>) -> Vec<(Version, TagInfo)> {
    let mut entries: Vec<(Version, TagInfo)> = tag_infos
        .into_iter()
        .filter_map(|info| {
            version::parse_tags(std::slice::from_ref(&info.name))
                .pop()
                .map(|parsed| (parsed, info))
        })
        .collect();

    entries.sort_by(|a, b| b.0.cmp(&a.0));
    entries
}

/// Print the version history of the repository.
///
/// A `limit` of zero means "show everything".
pub fn run(repo: &dyn Repository, limit: usize) -> Result<()> {
    if !repo.is_repository() {
        return Err(TaggerError::repository(
            "not a git repository (or any of the parent directories)",
        ));
    }

    let tag_infos = repo
        .list_tags_with_dates()
        .map_err(|e| TaggerError::tag(format!("failed to list tags: {}", e)))?;

    if tag_infos.is_empty() {
        display_info("No tags found in this repository");
        return Ok(());
    }

    let total_tags = tag_infos.len();
    let entries = semver_entries(tag_infos);

    if entries.is_empty() {
        display_info("No semantic version tags found in this repository");
        display_help(&format!(
            "Total tags: {} (none match vX.Y.Z format)",
            total_tags
        ));
        return Ok(());
    }

    let total = entries.len();
    let shown = if limit > 0 && limit < total { limit } else { total };

    println!("{}", style("Version History").magenta().bold());
    println!();

    for (i, (parsed, info)) in entries.iter().take(shown).enumerate() {
        let version_str = version::format_tag(parsed);
        let date_str = info.date.format("%Y-%m-%d").to_string();
        let suffix = if i == 0 {
            format!(" {}", style("← Latest").green().bold())
        } else {
            String::new()
        };

        println!(
            "{}  ({}){}",
            style(&version_str).cyan().bold(),
            style(&date_str).dim(),
            suffix
        );
    }

    println!();
    if shown < total {
        display_help(&format!("Showing {} of {} versions", shown, total));
    } else {
        display_help(&format!("Total: {} versions", total));
    }

    Ok(())
}
