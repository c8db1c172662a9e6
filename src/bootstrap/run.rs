//! Run loop: mount the view, start capture, then serve stdin commands and
//! print notices until `quit`, end of input, or Ctrl-C.

use std::io::Write;

use anyhow::Context;
use ck_core::{AppConfig, UiNotice};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

use super::wiring::{wire_dependencies, AppRuntime};
use crate::console::{notice_line, Console, Flow};

pub async fn run_app(config: AppConfig, capture_enabled: bool) -> anyhow::Result<()> {
    let AppRuntime {
        view,
        capture,
        backend: _,
        window,
        notices,
        notice_rx,
    } = wire_dependencies(&config, capture_enabled)?;

    view.mount().await;
    if let Some(capture) = &capture {
        capture.start().await;
    }

    let console = Console::new(view.clone(), window, notices);
    let stdin = BufReader::new(tokio::io::stdin());
    let result = tokio::select! {
        result = drive(&console, stdin, notice_rx, std::io::stdout()) => result,
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            info!("Interrupted");
            Ok(())
        }
    };

    view.unmount();
    if let Some(capture) = &capture {
        capture.stop().await;
    }
    info!("clipkeep stopped");
    result
}

/// Serve `input` line by line, printing each raised notice to `out`.
pub async fn drive<R, W>(
    console: &Console,
    input: R,
    mut notice_rx: mpsc::UnboundedReceiver<UiNotice>,
    mut out: W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "clipkeep ready, type `help` for commands")?;
    out.flush()?;

    let mut lines = input.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                let mut buf = Vec::new();
                let flow = console.handle_line(&line, &mut buf).await?;
                out.write_all(&buf)?;
                out.flush()?;
                if flow == Flow::Quit {
                    break;
                }
            }
            Some(notice) = notice_rx.recv() => {
                writeln!(out, "{}", notice_line(&notice))?;
                out.flush()?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::wiring::wire_with;
    use async_trait::async_trait;
    use ck_core::ports::SystemClipboardPort;
    use ck_platform::autostart::UnsupportedAutostart;
    use std::sync::Arc;

    struct EmptyClipboard;

    #[async_trait]
    impl SystemClipboardPort for EmptyClipboard {
        async fn set_text(&self, _text: &str) -> anyhow::Result<()> {
            Ok(())
        }

        async fn set_image(&self, _png: &[u8]) -> anyhow::Result<()> {
            Ok(())
        }

        async fn get_text(&self) -> anyhow::Result<Option<String>> {
            Ok(None)
        }

        async fn get_image(&self) -> anyhow::Result<Option<Vec<u8>>> {
            Ok(None)
        }
    }

    fn runtime() -> AppRuntime {
        wire_with(
            &AppConfig::default(),
            Arc::new(EmptyClipboard),
            Arc::new(UnsupportedAutostart),
            false,
        )
    }

    #[tokio::test]
    async fn quit_ends_the_session() {
        let rt = runtime();
        rt.view.mount().await;
        rt.backend.record_text("one");
        let console = Console::new(rt.view.clone(), rt.window, rt.notices);

        let mut out = Vec::new();
        drive(&console, &b"list\nquit\nlist\n"[..], rt.notice_rx, &mut out)
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("clipkeep ready"));
        assert_eq!(out.matches("history (all)").count(), 1);
        rt.view.unmount();
    }

    #[tokio::test]
    async fn end_of_input_ends_the_session() {
        let rt = runtime();
        let console = Console::new(rt.view.clone(), rt.window, rt.notices);

        let mut out = Vec::new();
        drive(&console, &b"help\n"[..], rt.notice_rx, &mut out)
            .await
            .unwrap();

        assert!(String::from_utf8(out).unwrap().contains("commands:"));
    }
}
