//! Transport wrapper that can log the MCP messages passing through it
//!
//! With `--enable-command-logging` every chunk read from the client or written
//! back to it is logged at info level under the [`COMMAND_TARGET`] target.
//! Disabled, the wrapper is a plain pass-through, so the server always runs
//! over the same transport type.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

/// Tracing target for logged frames
pub const COMMAND_TARGET: &str = "github_mcp::command";

/// Which way the traffic flows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Client to server
    Inbound,
    /// Server to client
    Outbound,
}

impl Direction {
    fn arrow(self) -> &'static str {
        match self {
            Direction::Inbound => "<--",
            Direction::Outbound => "-->",
        }
    }
}

/// Reader or writer that optionally logs what passes through
#[derive(Debug)]
pub struct CommandLogger<T> {
    inner: T,
    direction: Direction,
    enabled: bool,
}

impl<T> CommandLogger<T> {
    /// Wrap the stream carrying client requests
    pub fn inbound(inner: T, enabled: bool) -> Self {
        Self {
            inner,
            direction: Direction::Inbound,
            enabled,
        }
    }

    /// Wrap the stream carrying server responses
    pub fn outbound(inner: T, enabled: bool) -> Self {
        Self {
            inner,
            direction: Direction::Outbound,
            enabled,
        }
    }

    fn record(&self, data: &[u8]) {
        if !self.enabled || data.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(data);
        for line in text.lines().filter(|line| !line.trim().is_empty()) {
            tracing::info!(target: COMMAND_TARGET, "{} {}", self.direction.arrow(), line);
        }
    }
}

impl<T: AsyncRead + Unpin> AsyncRead for CommandLogger<T> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let before = buf.filled().len();
        let poll = Pin::new(&mut self.inner).poll_read(cx, buf);
        if let Poll::Ready(Ok(())) = &poll {
            self.record(&buf.filled()[before..]);
        }
        poll
    }
}

impl<T: AsyncWrite + Unpin> AsyncWrite for CommandLogger<T> {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let poll = Pin::new(&mut self.inner).poll_write(cx, buf);
        if let Poll::Ready(Ok(written)) = &poll {
            self.record(&buf[..*written]);
        }
        poll
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_shutdown(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tracing::Level;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(level: Level, command_logging: bool) -> (Captured, tracing::subscriber::DefaultGuard) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_env_filter(crate::logging::env_filter(level, command_logging))
            .with_ansi(false)
            .finish();
        (captured, tracing::subscriber::set_default(subscriber))
    }

    #[tokio::test]
    async fn test_reader_passes_data_through() {
        let input: &[u8] = b"{\"jsonrpc\":\"2.0\",\"method\":\"ping\",\"id\":1}\n";
        let mut reader = CommandLogger::inbound(input, true);

        let mut received = String::new();
        reader.read_to_string(&mut received).await.unwrap();

        assert_eq!(received.as_bytes(), input);
    }

    #[tokio::test]
    async fn test_writer_passes_data_through() {
        let mut writer = CommandLogger::outbound(Vec::new(), false);
        writer.write_all(b"{\"id\":1,\"result\":{}}\n").await.unwrap();
        writer.flush().await.unwrap();

        assert_eq!(writer.inner, b"{\"id\":1,\"result\":{}}\n");
        assert_eq!(writer.direction, Direction::Outbound);
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_enabled_frames_reach_default_filter() {
        std::env::remove_var("RUST_LOG");
        let (captured, _guard) = capture(Level::INFO, true);

        let mut writer = CommandLogger::outbound(Vec::new(), true);
        writer.write_all(b"{\"id\":1,\"result\":{}}\n").await.unwrap();

        let logged = captured.text();
        assert!(logged.contains("--> {\"id\":1,\"result\":{}}"), "{logged}");
        assert!(logged.contains(COMMAND_TARGET));
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_frames_survive_quiet_level() {
        std::env::remove_var("RUST_LOG");
        let (captured, _guard) = capture(Level::WARN, true);

        let mut reader = CommandLogger::inbound(&b"{\"method\":\"ping\"}\n"[..], true);
        let mut received = String::new();
        reader.read_to_string(&mut received).await.unwrap();

        assert!(captured.text().contains("<-- {\"method\":\"ping\"}"));
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_disabled_logger_stays_silent() {
        std::env::remove_var("RUST_LOG");
        let (captured, _guard) = capture(Level::INFO, false);

        let mut writer = CommandLogger::outbound(Vec::new(), false);
        writer.write_all(b"{\"id\":1}\n").await.unwrap();

        assert!(!captured.text().contains("-->"));
    }
}
