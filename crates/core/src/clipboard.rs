//! Clipboard access for the copy buttons.
//!
//! The system clipboard goes through `arboard`. When that is unavailable (no
//! display server, sandboxed session) the text is piped into a platform copy
//! command instead.
//!
//! On X11 and Wayland the selection is served by the process that set it, so a
//! process that exits right after copying uses [`ClipboardService::persistent`].

use std::{
    io::{ErrorKind, Write},
    process::{Child, Command, Stdio},
    sync::Arc,
    time::Duration,
};

use arboard::Clipboard;

use crate::error::ClipboardError;

pub trait ClipboardBackend: Send + Sync + 'static {
    fn name(&self) -> &'static str;
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Upper bound on how long a held write keeps serving the selection.
pub const SELECTION_HOLD: Duration = Duration::from_secs(15);

/// The system clipboard, opened fresh for every write.
#[derive(Debug, Default)]
pub struct SystemClipboard {
    hold: Option<Duration>,
}

impl SystemClipboard {
    /// On Linux, blocks after writing until another client takes the
    /// selection or `hold` runs out.
    pub fn holding(hold: Duration) -> Self {
        Self { hold: Some(hold) }
    }
}

#[cfg(target_os = "linux")]
fn set_text(
    clipboard: &mut Clipboard,
    text: &str,
    hold: Option<Duration>,
) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    match hold {
        Some(hold) => clipboard
            .set()
            .wait_until(std::time::Instant::now() + hold)
            .text(text),
        None => clipboard.set_text(text),
    }
}

#[cfg(not(target_os = "linux"))]
fn set_text(
    clipboard: &mut Clipboard,
    text: &str,
    _hold: Option<Duration>,
) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        set_text(&mut clipboard, text, self.hold)
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

/// Pipes text into the first copy command found on PATH.
pub struct CommandClipboard {
    candidates: Vec<(&'static str, Vec<&'static str>)>,
}

impl Default for CommandClipboard {
    fn default() -> Self {
        let candidates = if cfg!(target_os = "macos") {
            vec![("pbcopy", vec![])]
        } else if cfg!(windows) {
            vec![("clip", vec![])]
        } else {
            vec![
                ("wl-copy", vec![]),
                ("xclip", vec!["-selection", "clipboard"]),
                ("xsel", vec!["--clipboard", "--input"]),
            ]
        };
        Self { candidates }
    }
}

impl CommandClipboard {
    pub fn with_candidates(candidates: Vec<(&'static str, Vec<&'static str>)>) -> Self {
        Self { candidates }
    }
}

/// Child process that is always reaped, whichever way the copy ends.
struct ScratchProcess(Child);

impl Drop for ScratchProcess {
    fn drop(&mut self) {
        if let Ok(None) = self.0.try_wait() {
            let _ = self.0.kill();
        }
        let _ = self.0.wait();
    }
}

fn pipe_into(program: &str, args: &[&str], text: &str) -> Result<(), ClipboardError> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => ClipboardError::NoCommand,
            _ => ClipboardError::CommandFailed {
                program: program.to_string(),
                reason: e.to_string(),
            },
        })?;
    let mut scratch = ScratchProcess(child);

    let failed = |reason: String| ClipboardError::CommandFailed {
        program: program.to_string(),
        reason,
    };

    {
        let mut stdin = scratch
            .0
            .stdin
            .take()
            .ok_or_else(|| failed("stdin not captured".to_string()))?;
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| failed(e.to_string()))?;
    }

    let status = scratch.0.wait().map_err(|e| failed(e.to_string()))?;
    if !status.success() {
        return Err(failed(status.to_string()));
    }
    Ok(())
}

impl ClipboardBackend for CommandClipboard {
    fn name(&self) -> &'static str {
        "command"
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut last_err = ClipboardError::NoCommand;
        for (program, args) in &self.candidates {
            match pipe_into(program, args, text) {
                Ok(()) => return Ok(()),
                Err(ClipboardError::NoCommand) => continue,
                Err(e) => {
                    tracing::debug!(program, error = %e, "clipboard command failed");
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }
}

/// Primary backend with a fallback.
#[derive(Clone)]
pub struct ClipboardService {
    primary: Arc<dyn ClipboardBackend>,
    fallback: Arc<dyn ClipboardBackend>,
}

impl Default for ClipboardService {
    fn default() -> Self {
        Self::new(
            Arc::new(SystemClipboard::default()),
            Arc::new(CommandClipboard::default()),
        )
    }
}

impl ClipboardService {
    pub fn new(primary: Arc<dyn ClipboardBackend>, fallback: Arc<dyn ClipboardBackend>) -> Self {
        Self { primary, fallback }
    }

    /// For processes that exit right after copying. On Linux the copy
    /// commands go first since `wl-copy`, `xclip` and `xsel` leave a server
    /// behind; arboard is the fallback and holds the selection for a while.
    pub fn persistent() -> Self {
        if cfg!(target_os = "linux") {
            Self::new(
                Arc::new(CommandClipboard::default()),
                Arc::new(SystemClipboard::holding(SELECTION_HOLD)),
            )
        } else {
            Self::default()
        }
    }

    pub fn primary_name(&self) -> &'static str {
        self.primary.name()
    }

    pub fn fallback_name(&self) -> &'static str {
        self.fallback.name()
    }

    /// Returns the name of the backend that took the text.
    pub fn copy(&self, text: &str) -> Result<&'static str, ClipboardError> {
        match self.primary.write_text(text) {
            Ok(()) => Ok(self.primary.name()),
            Err(e) => {
                tracing::debug!(error = %e, backend = self.primary.name(), "falling back");
                self.fallback.write_text(text)?;
                Ok(self.fallback.name())
            }
        }
    }

    /// [`copy`](Self::copy) off the async executor; clipboard access blocks.
    pub async fn copy_async(&self, text: String) -> Result<&'static str, ClipboardError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.copy(&text))
            .await
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recording {
        fail: bool,
        writes: Mutex<Vec<String>>,
    }

    impl ClipboardBackend for Recording {
        fn name(&self) -> &'static str {
            if self.fail { "broken" } else { "recording" }
        }

        fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Unavailable("headless".to_string()));
            }
            self.writes.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn primary_success_skips_fallback() {
        let primary = Arc::new(Recording::default());
        let fallback = Arc::new(Recording::default());
        let service = ClipboardService::new(primary.clone(), fallback.clone());

        assert_eq!(service.copy("hi").unwrap(), "recording");
        assert_eq!(primary.writes.lock().unwrap().as_slice(), ["hi"]);
        assert!(fallback.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn primary_failure_uses_fallback() {
        let primary = Arc::new(Recording {
            fail: true,
            ..Default::default()
        });
        let fallback = Arc::new(Recording::default());
        let service = ClipboardService::new(primary, fallback.clone());

        service.copy("summary").unwrap();
        assert_eq!(fallback.writes.lock().unwrap().as_slice(), ["summary"]);
    }

    #[test]
    fn both_failing_is_an_error() {
        let broken = || {
            Arc::new(Recording {
                fail: true,
                ..Default::default()
            })
        };
        let service = ClipboardService::new(broken(), broken());
        assert!(service.copy("x").is_err());
    }

    #[test]
    fn default_service_prefers_the_system_clipboard() {
        let service = ClipboardService::default();
        assert_eq!(service.primary_name(), "system");
        assert_eq!(service.fallback_name(), "command");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn persistent_service_prefers_forking_copy_commands() {
        let service = ClipboardService::persistent();
        assert_eq!(service.primary_name(), "command");
        assert_eq!(service.fallback_name(), "system");
    }

    #[test]
    fn missing_commands_report_no_command() {
        let clipboard =
            CommandClipboard::with_candidates(vec![("viddigest-no-such-copy-tool", vec![])]);
        assert!(matches!(
            clipboard.write_text("x"),
            Err(ClipboardError::NoCommand)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn command_exit_status_is_checked() {
        let ok = CommandClipboard::with_candidates(vec![("cat", vec![])]);
        assert!(ok.write_text("piped").is_ok());

        let failing = CommandClipboard::with_candidates(vec![("false", vec![])]);
        assert!(matches!(
            failing.write_text("piped"),
            Err(ClipboardError::CommandFailed { .. })
        ));
    }
}
