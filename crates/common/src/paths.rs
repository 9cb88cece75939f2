use std::path::{Path, PathBuf};

/// Render `path` relative to `home` as `~/...`.
///
/// Paths outside `home` are returned unchanged.
pub fn display_path_with_home(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home
        && let Ok(rest) = path.strip_prefix(home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", rest.display());
    }
    path.display().to_string()
}

/// Render `path` relative to the current user's home directory.
pub fn display_path(path: &Path) -> String {
    let home = home_dir();
    display_path_with_home(path, home.as_deref())
}

fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_path_under_home() {
        let home = Path::new("/home/ada");
        assert_eq!(
            display_path_with_home(Path::new("/home/ada/src/widget"), Some(home)),
            "~/src/widget"
        );
        assert_eq!(display_path_with_home(home, Some(home)), "~");
    }

    #[test]
    fn display_path_outside_home() {
        let home = Path::new("/home/ada");
        assert_eq!(
            display_path_with_home(Path::new("/srv/widget"), Some(home)),
            "/srv/widget"
        );
        assert_eq!(
            display_path_with_home(Path::new("/srv/widget"), None),
            "/srv/widget"
        );
    }
}
