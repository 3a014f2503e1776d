//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/site/content/faq/   ← cwd
/// /home/user/site/faqmark.toml   ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

/// Walk up from `start` looking for `config_name`.
pub fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    // Absolute path: no search
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        // Move to parent directory
        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_in_ancestor() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("content/faq/deep");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("faqmark.toml"), "").unwrap();

        let found = find_config_file_from(&nested, Path::new("faqmark.toml")).unwrap();
        assert_eq!(found, dir.path().join("faqmark.toml"));
    }

    #[test]
    fn test_nearest_wins() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("sub");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("faqmark.toml"), "").unwrap();
        fs::write(nested.join("faqmark.toml"), "").unwrap();

        let found = find_config_file_from(&nested, Path::new("faqmark.toml")).unwrap();
        assert_eq!(found, nested.join("faqmark.toml"));
    }

    #[test]
    fn test_directory_with_config_name_ignored() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("not-a-file.toml")).unwrap();
        assert!(find_config_file_from(dir.path(), Path::new("not-a-file.toml")).is_none());
    }

    #[test]
    fn test_absolute_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        assert!(find_config_file_from(dir.path(), &path).is_none());
        fs::write(&path, "").unwrap();
        assert_eq!(find_config_file_from(Path::new("/"), &path), Some(path));
    }
}
