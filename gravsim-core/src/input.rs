use crate::body::Body;
use crate::edit::Edit;
use glam::Vec2;

/// Pointer buttons the shell reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Input events in normalized device coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A click at `pos`. Secondary selects, Middle spawns (a heavy body when
    /// `ctrl` is held).
    Pointer {
        button: PointerButton,
        pos: Vec2,
        ctrl: bool,
    },
    /// One press of the pause key
    TogglePause,
    SpawnBody { pos: Vec2 },
    SpawnHeavy { pos: Vec2 },
}

impl InputEvent {
    /// Resolve pointer clicks into the discrete command they stand for
    pub fn normalize(self) -> Option<InputEvent> {
        match self {
            InputEvent::Pointer {
                button: PointerButton::Middle,
                pos,
                ctrl,
            } => Some(if ctrl {
                InputEvent::SpawnHeavy { pos }
            } else {
                InputEvent::SpawnBody { pos }
            }),
            InputEvent::Pointer {
                button: PointerButton::Primary,
                ..
            } => None,
            other => Some(other),
        }
    }
}

/// Events collected by the shell, drained once per frame
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

/// A change to the entity store, applied between frames
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Spawn(Body),
    Edit(Edit),
    DeleteSelected,
}
