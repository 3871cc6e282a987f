//! Browser-launch collaborator.

use std::process::Command;

use crate::error::Result;

/// Best-effort launcher for the operator's GUI browser.
///
/// Failure is reported to the caller but never treated as fatal by the
/// workflow.
pub trait BrowserLauncher {
    fn open(&self, url: &str) -> Result<()>;
}

/// Platform launcher: `xdg-open` on Linux, `open` on macOS,
/// `cmd /c start` on Windows. Spawns and does not wait.
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        let mut command = if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/c", "start"]);
            cmd
        } else {
            Command::new("xdg-open")
        };

        command.arg(url).spawn()?;
        Ok(())
    }
}

/// Recording launcher for tests.
pub struct MockBrowser {
    fail: bool,
    opened: std::sync::Mutex<Vec<String>>,
}

impl MockBrowser {
    pub fn new() -> Self {
        MockBrowser {
            fail: false,
            opened: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Make every `open` call fail.
    pub fn with_failing_launch(mut self) -> Self {
        self.fail = true;
        self
    }

    /// URLs opened through this mock.
    pub fn opened_urls(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Default for MockBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserLauncher for MockBrowser {
    fn open(&self, url: &str) -> Result<()> {
        if self.fail {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "mock browser launch failure",
            )
            .into());
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
