use crate::core::{BodyHandle, ConstraintHandle};
use std::collections::VecDeque;

/// Types of body events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEventType {
    /// A body has been added to the world
    Added,

    /// A body has been removed from the world
    Removed,

    /// A body has gone to sleep
    Sleep,

    /// A body has been awakened
    Awake,

    /// A body's full state was overwritten from outside the solver
    StateInjected,
}

/// An event related to a single body
#[derive(Debug, Clone)]
pub struct BodyEvent {
    /// The type of body event
    pub event_type: BodyEventType,

    /// The body that the event refers to
    pub body: BodyHandle,
}

/// Types of constraint events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintEventType {
    Added,
    Removed,
}

/// An event related to a constraint
#[derive(Debug, Clone)]
pub struct ConstraintEvent {
    pub event_type: ConstraintEventType,
    pub constraint: ConstraintHandle,
}

/// A queue of physics events
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Body events
    body_events: VecDeque<BodyEvent>,

    /// Constraint events
    constraint_events: VecDeque<ConstraintEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a body event to the queue
    pub fn add_body_event(&mut self, event: BodyEvent) {
        self.body_events.push_back(event);
    }

    /// Adds a constraint event to the queue
    pub fn add_constraint_event(&mut self, event: ConstraintEvent) {
        self.constraint_events.push_back(event);
    }

    /// Gets the next body event from the queue
    pub fn next_body_event(&mut self) -> Option<BodyEvent> {
        self.body_events.pop_front()
    }

    /// Gets the next constraint event from the queue
    pub fn next_constraint_event(&mut self) -> Option<ConstraintEvent> {
        self.constraint_events.pop_front()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.body_events.is_empty() && self.constraint_events.is_empty()
    }

    /// Clears all events from the queue
    pub fn clear(&mut self) {
        self.body_events.clear();
        self.constraint_events.clear();
    }

    /// Gets all body events of a specific type
    pub fn get_body_events_of_type(&self, event_type: BodyEventType) -> Vec<&BodyEvent> {
        self.body_events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Gets all body events for a specific body
    pub fn get_body_events_for_body(&self, body: BodyHandle) -> Vec<&BodyEvent> {
        self.body_events
            .iter()
            .filter(|e| e.body == body)
            .collect()
    }

    /// Gets all constraint events of a specific type
    pub fn get_constraint_events_of_type(&self, event_type: ConstraintEventType) -> Vec<&ConstraintEvent> {
        self.constraint_events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }
}
