//! Share platform backed by external commands.

use super::{ShareError, SharePayload, SharePlatform, SharedFile};
use crate::config::SiteConfig;
use crate::utils::{exec::Cmd, mime};
use crate::{debug, log};
use std::path::{Component, Path, PathBuf};

/// Clipboard writers tried in order; the first one on `PATH` wins.
const CLIPBOARD_CANDIDATES: &[&[&str]] = &[
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
    &["pbcopy"],
    &["clip.exe"],
];

/// Native share = configured `[share].command`, clipboard = configured or
/// discovered clipboard writer. Both receive the share text on stdin.
#[derive(Debug, Clone)]
pub struct CommandPlatform {
    share_command: Vec<String>,
    files: bool,
    clipboard: Option<Vec<String>>,
    images_dir: PathBuf,
}

impl CommandPlatform {
    /// `native = false` disables the share command entirely.
    pub fn from_config(config: &SiteConfig, native: bool) -> Self {
        let share_command = if native {
            config.share.command.clone()
        } else {
            Vec::new()
        };
        let clipboard = if config.share.clipboard.is_empty() {
            detect_clipboard()
        } else {
            Some(config.share.clipboard.clone())
        };
        Self {
            share_command,
            files: config.share.files,
            clipboard,
            images_dir: config.build.images.clone(),
        }
    }
}

fn detect_clipboard() -> Option<Vec<String>> {
    let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
    CLIPBOARD_CANDIDATES
        .iter()
        .filter(|argv| wayland || argv[0] != "wl-copy")
        .find(|argv| which::which(argv[0]).is_ok())
        .map(|argv| argv.iter().map(|s| s.to_string()).collect())
}

/// Plain relative file name, no parent or root components.
fn is_contained(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty() && path.components().all(|c| matches!(c, Component::Normal(_)))
}

impl SharePlatform for CommandPlatform {
    fn can_share(&self) -> bool {
        self.share_command
            .first()
            .is_some_and(|program| which::which(program).is_ok())
    }

    fn can_share_file(&self, file: &SharedFile) -> bool {
        self.files && mime::is_image(file.mime)
    }

    fn fetch_image(&mut self, name: &str) -> Result<SharedFile, ShareError> {
        if !is_contained(name) {
            return Err(ShareError::InvalidImage(name.to_string()));
        }
        let path = self.images_dir.join(name);
        let meta = std::fs::metadata(&path).map_err(|e| ShareError::Image(path.clone(), e))?;
        if !meta.is_file() {
            return Err(ShareError::InvalidImage(name.to_string()));
        }
        Ok(SharedFile {
            name: name.to_string(),
            mime: mime::from_path(&path),
            path,
        })
    }

    fn share(&mut self, payload: &SharePayload) -> Result<(), ShareError> {
        if self.share_command.is_empty() {
            return Err(ShareError::Unavailable);
        }
        let mut cmd = Cmd::from_slice(&self.share_command);
        if let Some(file) = payload.file {
            cmd = cmd.arg(&file.path);
        }
        debug!("share"; "{} ({})", self.share_command.join(" "), payload.title);
        cmd.stdin(payload.text)
            .run()
            .map(drop)
            .map_err(|e| ShareError::Command(format!("{e:#}")))
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ShareError> {
        let argv = self.clipboard.as_ref().ok_or(ShareError::NoClipboard)?;
        Cmd::from_slice(argv)
            .stdin(text)
            .run()
            .map(drop)
            .map_err(|e| ShareError::Command(format!("{e:#}")))
    }

    fn notify(&mut self, message: &str) {
        log!("share"; "{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn platform(images_dir: &Path) -> CommandPlatform {
        CommandPlatform {
            share_command: Vec::new(),
            files: true,
            clipboard: None,
            images_dir: images_dir.to_path_buf(),
        }
    }

    #[test]
    fn test_is_contained() {
        assert!(is_contained("cache.png"));
        assert!(is_contained("2024/cache.png"));
        assert!(!is_contained("../secret.png"));
        assert!(!is_contained("/etc/passwd"));
        assert!(!is_contained(""));
    }

    #[test]
    fn test_fetch_image() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("cache.png"), b"png").unwrap();
        let mut p = platform(tmp.path());

        let file = p.fetch_image("cache.png").unwrap();
        assert_eq!(file.mime, mime::types::PNG);
        assert!(p.can_share_file(&file));

        assert!(matches!(p.fetch_image("missing.png"), Err(ShareError::Image(..))));
        assert!(matches!(p.fetch_image("../x.png"), Err(ShareError::InvalidImage(_))));
    }

    #[test]
    fn test_without_command_nothing_is_available() {
        let tmp = tempfile::tempdir().unwrap();
        let mut p = platform(tmp.path());
        assert!(!p.can_share());
        assert!(matches!(p.write_clipboard("x"), Err(ShareError::NoClipboard)));
        let payload = SharePayload {
            title: "t",
            text: "x",
            file: None,
        };
        assert!(matches!(p.share(&payload), Err(ShareError::Unavailable)));
    }

    #[test]
    fn test_files_disabled_rejects_image() {
        let tmp = tempfile::tempdir().unwrap();
        let mut p = platform(tmp.path());
        p.files = false;
        let file = SharedFile {
            name: "a.png".into(),
            path: tmp.path().join("a.png"),
            mime: mime::types::PNG,
        };
        assert!(!p.can_share_file(&file));
    }

    #[cfg(unix)]
    #[test]
    fn test_clipboard_command_receives_text() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("clip.txt");
        let mut p = platform(tmp.path());
        p.clipboard = Some(vec![
            "sh".into(),
            "-c".into(),
            format!("cat > '{}'", out.display()),
        ]);
        p.write_clipboard("https://x/2024-11-08/\n\nX").unwrap();
        assert_eq!(fs::read_to_string(out).unwrap(), "https://x/2024-11-08/\n\nX");
    }
}
