use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app loop
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
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

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// How long a disarmed runner waits on the source per attempt.
const IDLE_WAIT: Duration = Duration::from_millis(250);

/// Advances the application one event at a time, interleaving input events
/// with countdown ticks generated from an explicit deadline.
///
/// The tick schedule is armed when a session's clock starts and disarmed
/// when the session reaches a terminal state or is replaced. While disarmed
/// the runner only waits on the event source, so no tick can fire for a
/// session that is gone.
pub struct Runner<E: EventSource> {
    source: E,
    interval: Duration,
    next_tick: Option<Instant>,
}

impl<E: EventSource> Runner<E> {
    pub fn new(source: E, interval: Duration) -> Self {
        Self {
            source,
            interval,
            next_tick: None,
        }
    }

    /// Schedules the first tick one interval from now.
    pub fn arm(&mut self) {
        self.next_tick = Some(Instant::now() + self.interval);
    }

    /// Cancels any pending tick.
    pub fn disarm(&mut self) {
        self.next_tick = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Blocks until the next event. When armed, returns Tick if the deadline
    /// passes before an event arrives and reschedules the one after it.
    pub fn step(&mut self) -> AppEvent {
        loop {
            match self.next_tick {
                None => match self.source.recv_timeout(IDLE_WAIT) {
                    Ok(ev) => return ev,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => return AppEvent::Tick,
                },
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        self.next_tick = Some(deadline + self.interval);
                        return AppEvent::Tick;
                    }
                    match self.source.recv_timeout(deadline - now) {
                        Ok(ev) => return ev,
                        Err(RecvTimeoutError::Timeout) => {
                            self.next_tick = Some(deadline + self.interval);
                            return AppEvent::Tick;
                        }
                        Err(RecvTimeoutError::Disconnected) => return AppEvent::Tick,
                    }
                }
            }
        }
    }
}
