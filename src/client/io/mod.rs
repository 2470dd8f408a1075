//! # Input Abstraction
//!
//! The event loop reads input through the [`EventStream`] trait so the
//! controller can be driven by a real terminal in production and by a
//! scripted queue in tests.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::Event;

/// Source of input events.
pub trait EventStream: Send {
    /// True when an event is ready within the timeout.
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Read the next event. Only call after `poll` returned true.
    fn read(&mut self) -> Result<Event>;
}

/// Production stream over the crossterm event queue.
#[derive(Debug, Default)]
pub struct TerminalEventStream;

impl TerminalEventStream {
    pub fn new() -> Self {
        Self
    }
}

impl EventStream for TerminalEventStream {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        Ok(crossterm::event::poll(timeout)?)
    }

    fn read(&mut self) -> Result<Event> {
        Ok(crossterm::event::read()?)
    }
}
