use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub enum AppEvent {
    Key(KeyEvent),
    /// Nothing happened for one tick; redraw so the running clock advances.
    Tick,
    Resize,
}

/// Polls the terminal on a background thread and forwards key presses.
/// Quiz transitions only ever run on the receiving side.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            loop {
                let event = match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                            AppEvent::Key(key)
                        }
                        Ok(Event::Resize(_, _)) => AppEvent::Resize,
                        Ok(_) => continue,
                        Err(e) => {
                            tracing::error!(error = %e, "terminal read failed");
                            return;
                        }
                    },
                    Ok(false) => AppEvent::Tick,
                    Err(e) => {
                        tracing::error!(error = %e, "terminal poll failed");
                        return;
                    }
                };
                if tx.send(event).is_err() {
                    return;
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
