//! Generated files excluded from every git-backed diff.
//!
//! Lockfiles and package-manager logs are large, machine-written, and
//! not worth reviewer attention.

/// File names excluded from diffs, wherever they appear in the tree.
pub const IGNORED_FILES: &[&str] = &[
    // JavaScript / Node.js
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    // Python
    "Pipfile.lock",
    "poetry.lock",
    // Ruby
    "Gemfile.lock",
    // PHP
    "composer.lock",
    // .NET
    "packages.lock.json",
    // Java
    "gradle.lockfile",
    // Rust
    "Cargo.lock",
    // Go
    "go.sum",
    // Swift / Objective-C
    "Podfile.lock",
    // Dart / Flutter
    "pubspec.lock",
    // Package manager logs
    "yarn-error.log",
    "npm-debug.log",
    ".pnpm-debug.log",
];

/// Exclusion pathspecs for [`IGNORED_FILES`].
///
/// Each name yields a root-level and a nested pattern, since a plain
/// pathspec only matches relative to the repository root.
pub fn exclude_pathspecs() -> Vec<String> {
    IGNORED_FILES
        .iter()
        .flat_map(|name| [format!(":!{name}"), format!(":!*/{name}")])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_has_root_and_nested_pattern() {
        let specs = exclude_pathspecs();
        assert_eq!(specs.len(), IGNORED_FILES.len() * 2);
        assert!(specs.contains(&":!Cargo.lock".to_string()));
        assert!(specs.contains(&":!*/package-lock.json".to_string()));
        assert!(specs.iter().all(|s| s.starts_with(":!")));
    }
}
