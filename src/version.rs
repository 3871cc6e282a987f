use semver::Version;

/// Represents the type of semantic version bump to apply.
///
/// Chosen by the operator at the bump-selection prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bump {
    Major,
    Minor,
    Patch,
}

/// Parses git tag strings into semantic versions.
///
/// Strips an optional leading 'v' (or 'V') from each tag and attempts to
/// parse the remainder as `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`. Tags
/// that do not parse are dropped silently — release-candidate markers and
/// unrelated labels are expected noise, not errors. Output order is
/// unspecified.
///
/// # Example
/// ```ignore
/// let versions = parse_tags(&["v1.2.3".into(), "not-a-version".into()]);
/// assert_eq!(versions.len(), 1);
/// ```
pub fn parse_tags(tags: &[String]) -> Vec<Version> {
    tags.iter()
        .filter_map(|tag| {
            let stripped = tag
                .strip_prefix('v')
                .or_else(|| tag.strip_prefix('V'))
                .unwrap_or(tag);
            Version::parse(stripped).ok()
        })
        .collect()
}

/// Returns the maximum version by semantic-version precedence.
///
/// An empty input yields `0.0.0`, the bootstrap value for a repository
/// with no prior semantic tags.
pub fn latest(versions: &[Version]) -> Version {
    versions
        .iter()
        .max()
        .cloned()
        .unwrap_or_else(|| Version::new(0, 0, 0))
}

/// Bumps a version according to the specified bump type.
///
/// Increments the chosen component and resets lower-order components to
/// zero. Pre-release and build metadata are cleared — the bumped version
/// is always a plain release version.
pub fn bump(version: &Version, kind: Bump) -> Version {
    match kind {
        Bump::Major => Version::new(version.major + 1, 0, 0),
        Bump::Minor => Version::new(version.major, version.minor + 1, 0),
        Bump::Patch => Version::new(version.major, version.minor, version.patch + 1),
    }
}

/// Formats a version as its canonical tag string, e.g. `v1.2.3`.
///
/// Round-trips with [parse_tags]: pre-release and build metadata are
/// rendered when present.
pub fn format_tag(version: &Version) -> String {
    format!("v{}", version)
}
