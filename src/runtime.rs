use std::sync::mpsc::{self, Receiver, RecvError};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app runner. The quiz has no timed
/// state, so there is no tick; the loop blocks until the user acts.
#[derive(Clone, Debug)]
pub enum QuizEvent {
    Key(KeyEvent),
    Resize,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait QuizEventSource: Send + 'static {
    /// Block until the next event arrives. An error means the source is
    /// gone and the app should shut down.
    fn recv(&self) -> Result<QuizEvent, RecvError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<QuizEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(QuizEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(QuizEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizEventSource for CrosstermEventSource {
    fn recv(&self) -> Result<QuizEvent, RecvError> {
        self.rx.recv()
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<QuizEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<QuizEvent>) -> Self {
        Self { rx }
    }
}

impl QuizEventSource for TestEventSource {
    fn recv(&self) -> Result<QuizEvent, RecvError> {
        self.rx.recv()
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: QuizEventSource> {
    event_source: E,
}

impl<E: QuizEventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    /// Blocks for the next event; `None` once the source has disconnected.
    pub fn step(&self) -> Option<QuizEvent> {
        self.event_source.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(QuizEvent::Resize).unwrap();
        let runner = Runner::new(TestEventSource::new(rx));

        match runner.step() {
            Some(QuizEvent::Resize) => {}
            other => panic!("expected Resize event, got {other:?}"),
        }
    }

    #[test]
    fn step_returns_none_when_disconnected() {
        let (tx, rx) = mpsc::channel::<QuizEvent>();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx));

        assert!(runner.step().is_none());
    }
}
