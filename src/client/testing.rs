//! # Test Support
//!
//! Scripted doubles for the controller's injected capabilities:
//! a gateway with canned responses, an input stream backed by a queue,
//! and a renderer that captures frames instead of drawing them.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

use crate::client::io::EventStream;
use crate::client::models::Session;
use crate::client::services::{Gateway, GatewayError, GatewayFuture, GatewayResult};
use crate::client::views::{render_text, ViewRenderer};

/// Gateway returning canned results in order and recording every call.
#[derive(Default)]
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<GatewayResult>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: Vec<GatewayResult>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_response(&self, result: GatewayResult) {
        self.responses.lock().unwrap().push_back(result);
    }

    /// All `(path, body)` pairs posted so far.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Gateway for ScriptedGateway {
    fn post(&self, path: &str, body: Value) -> GatewayFuture {
        self.calls.lock().unwrap().push((path.to_string(), body));
        let result = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport("no scripted response".into())));
        Box::pin(async move { result })
    }
}

/// Input stream over a pre-programmed event queue.
#[derive(Debug, Default)]
pub struct ScriptedEventStream {
    events: VecDeque<Event>,
}

impl ScriptedEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into(),
        }
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }
}

impl EventStream for ScriptedEventStream {
    fn poll(&mut self, _timeout: std::time::Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow!("scripted event stream exhausted"))
    }
}

/// Renderer that keeps every rendered frame for assertions.
#[derive(Debug, Default)]
pub struct CapturingRenderer {
    pub frames: Vec<String>,
}

impl CapturingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> &str {
        self.frames.last().map(String::as_str).unwrap_or("")
    }
}

impl ViewRenderer for CapturingRenderer {
    fn render(&mut self, session: &Session) -> Result<()> {
        self.frames.push(render_text(session));
        Ok(())
    }
}

/// Key event for a plain character press.
pub fn key(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)
}

/// Key event for a control chord.
pub fn ctrl(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

/// Key event for a non-character key.
pub fn code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Type a whole string as individual key presses.
pub fn typed(text: &str) -> Vec<KeyEvent> {
    text.chars().map(key).collect()
}
