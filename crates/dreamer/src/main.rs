//! An interactive terminal client for the Dreamer service.
//!
//! Type a message and press Enter to chat. `/dream` fetches a dream,
//! `/quit` (or end of input) leaves. Set `DREAMER_BASE_URL` to talk to a
//! service other than `http://localhost:8000`.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::time::Duration;

use dreamer::core::{Message, Role};
use dreamer::view::{self, DISMISS_LABEL};
use dreamer::{HttpConfigBuilder, SessionBuilder};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt};
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

enum SessionEvent {
    Appended(Message),
    DreamOpened(String),
    Idle,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    log_subscriber(std::io::stderr).init();

    let mut config = HttpConfigBuilder::new();
    if let Ok(base_url) = env::var("DREAMER_BASE_URL") {
        config = config.with_base_url(base_url);
    }

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let session = SessionBuilder::with_config(config.build())
        .on_append({
            let event_tx = event_tx.clone();
            move |msg| {
                event_tx.send(SessionEvent::Appended(msg.clone())).ok();
            }
        })
        .on_dream({
            let event_tx = event_tx.clone();
            move |dream| {
                if let Some(dream) = dream {
                    event_tx
                        .send(SessionEvent::DreamOpened(dream.to_owned()))
                        .ok();
                }
            }
        })
        .on_idle({
            let event_tx = event_tx.clone();
            move || {
                event_tx.send(SessionEvent::Idle).ok();
            }
        })
        .build();

    let progress_style =
        match ProgressStyle::with_template("{spinner} {wide_msg}") {
            Ok(style) => style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
            Err(err) => {
                error!("invalid progress template: {err}");
                ProgressStyle::default_spinner()
            }
        };

    // One reader for the whole session, lines it buffers ahead belong to
    // the following prompts.
    let mut stdin = io::BufReader::new(io::stdin());

    println!("{}", "Dreamer".bold());
    println!("Type /dream for a dream, /quit to exit\n");

    'outer: loop {
        prompt("> ");
        let Some(line) = read_line(&mut stdin).await else {
            break;
        };
        let line = line.trim_end_matches(['\r', '\n']);

        match line.trim() {
            "/quit" => break,
            "/dream" => session.request_dream(),
            // Nothing to send, and the service is never contacted.
            "" => continue,
            _ => {
                session.update_draft(line);
                session.submit_message();
            }
        }

        let mut progress_bar = None;
        let mut dream_opened = false;

        // Input stays closed until the request finishes.
        loop {
            progress_bar
                .get_or_insert_with(|| {
                    let progress_bar = ProgressBar::new_spinner();
                    progress_bar.set_style(progress_style.clone());
                    progress_bar.set_message("Thinking...");
                    progress_bar
                })
                .inc(1);

            let sleep = sleep(Duration::from_millis(100));
            let event = select! {
                event = event_rx.recv() => {
                    let Some(event) = event else {
                        break 'outer;
                    };
                    event
                },
                _ = sleep => {
                    continue;
                }
            };

            // Finish the progress bar before printing anything else.
            if let Some(progress_bar) = progress_bar.take() {
                progress_bar.finish_and_clear();
            }

            match event {
                SessionEvent::Appended(msg) => {
                    // The user's own line is already on the screen.
                    if msg.role() == Role::Assistant {
                        println!("{}", view::render_message(&msg));
                    }
                }
                SessionEvent::DreamOpened(dream) => {
                    println!("\n{}", view::render_dream(&dream));
                    dream_opened = true;
                }
                SessionEvent::Idle => break,
            }
        }

        if dream_opened {
            prompt(&format!("[Enter] {DISMISS_LABEL} "));
            if read_line(&mut stdin).await.is_none() {
                break;
            }
            session.dismiss_dream();
            println!();
        }
    }
}

/// Logs go to `writer`, which must not be stdout: the chat is printed
/// there, and failed dreams must stay out of it.
fn log_subscriber<W>(writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .finish()
}

fn prompt(text: &str) {
    print!("{text}");
    if let Err(err) = std::io::stdout().flush() {
        warn!("error flushing stdout: {err}");
    }
}

async fn read_line<R: AsyncBufRead + Unpin>(
    reader: &mut R,
) -> Option<String> {
    let mut line = String::new();

    match reader.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_logs_go_to_the_given_writer() {
        let captured = Captured::default();
        let subscriber = log_subscriber({
            let captured = captured.clone();
            move || captured.clone()
        });

        tracing::subscriber::with_default(subscriber, || {
            error!("fetching dream failed: connection refused");
        });

        let logs = String::from_utf8(captured.0.lock().unwrap().clone())
            .unwrap();
        assert!(logs.contains("fetching dream failed"));
    }

    #[tokio::test]
    async fn test_read_line_keeps_buffered_lines() {
        let mut input: &[u8] = b"hello\nworld\n\nagain";

        assert_eq!(read_line(&mut input).await.as_deref(), Some("hello\n"));
        assert_eq!(read_line(&mut input).await.as_deref(), Some("world\n"));
        assert_eq!(read_line(&mut input).await.as_deref(), Some("\n"));
        assert_eq!(read_line(&mut input).await.as_deref(), Some("again"));
        assert_eq!(read_line(&mut input).await, None);
    }

    #[tokio::test]
    async fn test_read_line_through_one_buffer() {
        let mut reader = io::BufReader::new(&b"first\nsecond\n"[..]);

        let lines = [
            read_line(&mut reader).await,
            read_line(&mut reader).await,
            read_line(&mut reader).await,
        ];
        assert_eq!(
            lines,
            [Some("first\n".to_owned()), Some("second\n".to_owned()), None]
        );
    }
}
