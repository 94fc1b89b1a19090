//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Extract the path component of a URL as a base path.
///
/// The result always starts and ends with `/`, ready for `<base href>`.
/// Returns `None` if the URL is invalid.
///
/// # Examples
/// ```ignore
/// base_path_from_url("https://example.github.io/pildoras") -> Some("/pildoras/")
/// base_path_from_url("https://example.com")                -> Some("/")
/// base_path_from_url("invalid")                            -> None
/// ```
pub fn base_path_from_url(url_str: &str) -> Option<String> {
    let parsed = url::Url::parse(url_str).ok()?;
    let path = parsed.path().trim_matches('/');
    if path.is_empty() {
        Some("/".to_string())
    } else {
        Some(format!("/{path}/"))
    }
}

/// Find config file by searching upward from current directory
///
/// ```text
/// /home/user/pildoras/images/   ← cwd
/// /home/user/pildoras/pildoras.toml  ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_path_from_url() {
        assert_eq!(
            base_path_from_url("https://example.github.io/pildoras/"),
            Some("/pildoras/".to_string())
        );
        assert_eq!(base_path_from_url("https://example.com/a/b"), Some("/a/b/".to_string()));
        assert_eq!(base_path_from_url("https://example.com"), Some("/".to_string()));
        assert_eq!(
            base_path_from_url("https://example.com:8080/path?query=1"),
            Some("/path/".to_string())
        );
        assert_eq!(base_path_from_url("invalid-url"), None);
    }

    #[test]
    fn test_find_config_file_absolute_missing() {
        assert_eq!(find_config_file(Path::new("/no/such/dir/pildoras.toml")), None);
    }
}
