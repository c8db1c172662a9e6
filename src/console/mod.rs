//! # Terminal surface / 终端界面
//!
//! Line-oriented rendering of one [`ClipboardView`]: every command maps to
//! one view operation, and notices are printed by the run loop as they
//! are raised.

mod commands;
mod notifier;
mod render;

use std::io::{self, Write};
use std::sync::Arc;

use ck_app::{ClipboardView, CopyError};
use ck_core::ports::WindowPort;
use tracing::warn;

pub use commands::{Command, CommandError, USAGE};
pub use notifier::NotificationCenter;
pub use render::notice_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console {
    view: Arc<ClipboardView>,
    window: Arc<dyn WindowPort>,
    notices: Arc<NotificationCenter>,
}

impl Console {
    pub fn new(
        view: Arc<ClipboardView>,
        window: Arc<dyn WindowPort>,
        notices: Arc<NotificationCenter>,
    ) -> Self {
        Self {
            view,
            window,
            notices,
        }
    }

    /// Parse and run one input line.
    pub async fn handle_line<W: Write>(&self, line: &str, out: &mut W) -> io::Result<Flow> {
        match Command::parse_line(line) {
            Ok(Some(command)) => self.execute(command, out).await,
            Ok(None) => Ok(Flow::Continue),
            Err(err) => {
                writeln!(out, "{err}\n{USAGE}")?;
                Ok(Flow::Continue)
            }
        }
    }

    pub async fn execute<W: Write>(&self, command: Command, out: &mut W) -> io::Result<Flow> {
        match command {
            Command::List => self.print_list(out)?,
            Command::Filter(filter) => {
                self.view.set_filter(filter);
                self.print_list(out)?;
            }
            Command::Preview(timestamp) => match self.view.open_preview(timestamp) {
                Some(entry) => writeln!(out, "{}", render::preview(&entry))?,
                None => writeln!(out, "no entry with timestamp {timestamp}")?,
            },
            Command::Close => {
                if self.view.close_preview().is_none() {
                    writeln!(out, "no preview open")?;
                }
            }
            Command::Copy(timestamp) => {
                // Success and write-back failures arrive as notices.
                if let Err(err @ CopyError::NotFound(_)) = self.view.copy(timestamp).await {
                    writeln!(out, "{err}")?;
                }
            }
            Command::Clear => {
                let _ = self.view.clear_history().await;
            }
            Command::Autostart(None) => {
                let state = if self.view.autostart() { "on" } else { "off" };
                writeln!(out, "launch at login: {state}")?;
            }
            Command::Autostart(Some(enabled)) => {
                let _ = self.view.set_autostart(enabled).await;
            }
            Command::Hide => {
                if let Err(err) = self.window.hide().await {
                    warn!(error = %err, "Failed to hide window");
                    writeln!(out, "failed to hide window: {err}")?;
                }
            }
            Command::Show => {
                if let Err(err) = self.window.show().await {
                    warn!(error = %err, "Failed to show window");
                    writeln!(out, "failed to show window: {err}")?;
                }
            }
            Command::Help => writeln!(out, "{USAGE}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn print_list<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let entries = self.view.visible_entries();
        writeln!(
            out,
            "{}",
            render::list_header(self.view.filter(), entries.len(), self.view.snapshot().len())
        )?;
        for entry in &entries {
            writeln!(out, "{}", render::list_line(entry))?;
        }
        if let Some(active) = self.view.active_preview() {
            writeln!(out, "previewing {}", active.timestamp)?;
        }
        for notice in self.notices.active() {
            writeln!(out, "{}", render::notice_line(&notice))?;
        }
        Ok(())
    }
}
