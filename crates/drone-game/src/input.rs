//! Drone input feed
//!
//! Input callbacks may fire from any thread. They push events into a bounded
//! queue which the frame update drains in one go, so a frame always sees a
//! consistent snapshot of the cached axes.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::Vec2;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::drone::{CachedInput, NEARLY_ZERO};

/// Default number of events buffered between two frames
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// A single input event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Planar move axis (X = right, Y = forward)
    Move(Vec2),
    /// Move axis released or canceled
    MoveCompleted,
    /// Vertical thrust axis (+up / -down)
    UpDown(f32),
    /// Look delta (X = yaw, Y = pitch)
    Look(Vec2),
    /// Roll axis
    Roll(f32),
    /// Request to hand control back to the previous agent
    ReturnToPlayer,
}

impl InputEvent {
    /// Write this event into the cached input. Each event touches exactly one
    /// field. Returns true for a return-to-player request.
    pub fn apply(self, input: &mut CachedInput) -> bool {
        match self {
            InputEvent::Move(value) => {
                let nearly_zero = value.x.abs() <= NEARLY_ZERO && value.y.abs() <= NEARLY_ZERO;
                input.move_input = if nearly_zero { Vec2::ZERO } else { value };
            }
            InputEvent::MoveCompleted => input.move_input = Vec2::ZERO,
            InputEvent::UpDown(value) => input.up_down = value,
            InputEvent::Look(value) => input.look = value,
            InputEvent::Roll(value) => {
                input.roll = if value.abs() <= NEARLY_ZERO { 0.0 } else { value };
            }
            InputEvent::ReturnToPlayer => return true,
        }
        false
    }
}

/// Bounded input event queue shared between producers and the frame update
#[derive(Debug, Clone)]
pub struct InputQueue {
    events: Arc<Mutex<VecDeque<InputEvent>>>,
    capacity: usize,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }
}

impl InputQueue {
    /// Create a queue holding at most `capacity` events per frame
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Handle for producers on other threads
    pub fn sender(&self) -> InputSender {
        InputSender {
            events: Arc::clone(&self.events),
            capacity: self.capacity,
        }
    }

    /// Queue an event directly
    pub fn push(&self, event: InputEvent) {
        push_bounded(&self.events, self.capacity, event);
    }

    /// Number of events waiting
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Check if no events are waiting
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Remove every queued event, oldest first
    pub fn drain(&self) -> Vec<InputEvent> {
        self.events.lock().drain(..).collect()
    }
}

/// Producer handle for an [`InputQueue`]
#[derive(Debug, Clone)]
pub struct InputSender {
    events: Arc<Mutex<VecDeque<InputEvent>>>,
    capacity: usize,
}

impl InputSender {
    /// Queue an event. When the queue is full the oldest event is dropped.
    pub fn send(&self, event: InputEvent) {
        push_bounded(&self.events, self.capacity, event);
    }
}

fn push_bounded(events: &Mutex<VecDeque<InputEvent>>, capacity: usize, event: InputEvent) {
    let mut events = events.lock();
    if events.len() >= capacity {
        if let Some(dropped) = events.pop_front() {
            warn!("Input queue full, dropping {:?}", dropped);
        }
    }
    events.push_back(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_event_touches_one_field() {
        let mut input = CachedInput::default();

        InputEvent::Move(Vec2::new(0.5, 1.0)).apply(&mut input);
        assert_eq!(input.move_input, Vec2::new(0.5, 1.0));
        assert_eq!(input.up_down, 0.0);

        InputEvent::UpDown(-1.0).apply(&mut input);
        assert_eq!(input.up_down, -1.0);
        assert_eq!(input.move_input, Vec2::new(0.5, 1.0));

        InputEvent::MoveCompleted.apply(&mut input);
        assert_eq!(input.move_input, Vec2::ZERO);
        assert_eq!(input.up_down, -1.0);
    }

    #[test]
    fn test_near_zero_axes_snap_to_zero() {
        let mut input = CachedInput {
            roll: 1.0,
            move_input: Vec2::ONE,
            ..Default::default()
        };

        InputEvent::Roll(1.0e-6).apply(&mut input);
        InputEvent::Move(Vec2::new(1.0e-6, -1.0e-6)).apply(&mut input);
        assert_eq!(input.roll, 0.0);
        assert_eq!(input.move_input, Vec2::ZERO);
    }

    #[test]
    fn test_return_request_leaves_axes_alone() {
        let mut input = CachedInput {
            up_down: 0.7,
            ..Default::default()
        };
        assert!(InputEvent::ReturnToPlayer.apply(&mut input));
        assert_eq!(input.up_down, 0.7);
        assert!(!InputEvent::Look(Vec2::X).apply(&mut input));
    }

    #[test]
    fn test_queue_drains_in_order() {
        let queue = InputQueue::default();
        let sender = queue.sender();
        sender.send(InputEvent::UpDown(1.0));
        sender.send(InputEvent::UpDown(0.0));
        queue.push(InputEvent::Roll(1.0));

        assert_eq!(queue.len(), 3);
        let events = queue.drain();
        assert_eq!(
            events,
            vec![
                InputEvent::UpDown(1.0),
                InputEvent::UpDown(0.0),
                InputEvent::Roll(1.0)
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_drops_oldest_when_full() {
        let queue = InputQueue::with_capacity(2);
        queue.push(InputEvent::UpDown(1.0));
        queue.push(InputEvent::UpDown(2.0));
        queue.push(InputEvent::UpDown(3.0));

        assert_eq!(
            queue.drain(),
            vec![InputEvent::UpDown(2.0), InputEvent::UpDown(3.0)]
        );
    }

    #[test]
    fn test_sender_from_other_thread() {
        let queue = InputQueue::default();
        let sender = queue.sender();

        let handle = std::thread::spawn(move || {
            for _ in 0..10 {
                sender.send(InputEvent::Look(Vec2::new(1.0, 0.0)));
            }
        });
        handle.join().unwrap();

        assert_eq!(queue.len(), 10);
    }
}
