//! Terminal event source — merges crossterm input with tick/render timers.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Events consumed by the main loop.
#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
    Render,
}

/// Background reader pumping terminal events and timers into one channel.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    /// Spawn the reader task. `tick_rate` drives periodic app updates
    /// (notification expiry, spinner frames); `render_rate` caps the FPS.
    pub fn new(tick_rate: Duration, render_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let child = cancel.clone();

        tokio::spawn(async move {
            let mut stream = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);
            let mut render = tokio::time::interval(render_rate);

            loop {
                tokio::select! {
                    () = child.cancelled() => break,

                    _ = tick.tick() => {
                        if tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                    _ = render.tick() => {
                        if tx.send(Event::Render).is_err() {
                            break;
                        }
                    }
                    maybe = stream.next() => match maybe {
                        Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                            let _ = tx.send(Event::Key(key));
                        }
                        Some(Ok(CrosstermEvent::Resize(w, h))) => {
                            let _ = tx.send(Event::Resize(w, h));
                        }
                        Some(Ok(_)) => {}
                        Some(Err(_)) | None => break,
                    }
                }
            }
        });

        Self { rx, cancel }
    }

    /// Next event, or None once the reader task has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Stop the reader task.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}
