use crossterm::event::{KeyEvent, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Refresh, // Auto-refresh timer fired
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, refresh_interval: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);
            let mut refresh_interval = tokio::time::interval(refresh_interval);

            // The first refresh tick fires immediately; the initial fetch is
            // already spawned by the caller.
            refresh_interval.tick().await;

            loop {
                let event = tokio::select! {
                    maybe_event = reader.next() => match maybe_event {
                        // Press only (Windows reports releases too)
                        Some(Ok(crossterm::event::Event::Key(key)))
                            if key.kind == KeyEventKind::Press => Event::Key(key),
                        Some(Ok(_)) => continue,
                        Some(Err(e)) => {
                            tracing::warn!("Terminal event error: {}", e);
                            continue;
                        }
                        None => break,
                    },
                    _ = tick_interval.tick() => Event::Tick,
                    _ = refresh_interval.tick() => Event::Refresh,
                };

                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        EventHandler { rx }
    }

    pub async fn next(&mut self) -> Event {
        self.rx.recv().await.unwrap_or(Event::Tick)
    }
}
