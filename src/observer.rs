//! Observer pattern for the sequencer - display-side pub/sub
//!
//! Events are emitted after a tick commits, so an observer always sees the
//! state that the display collaborator would read on the following tick.
//! Observers never feed anything back into the core.

use crate::ring::Spin;
use crate::rule::Neighborhood;

/// Event emitted when a tick crosses a phase boundary or decides a spin
#[derive(Clone, Debug, PartialEq)]
pub enum RingEvent {
    /// Populate finished and the ring holds its seeded configuration
    Populated { snapshot: u16, tick: u64 },
    /// A trigger was accepted and a sweep began
    SweepStarted { sweep: u64, tick: u64 },
    /// A new value was staged for one position
    SpinDecided {
        index: usize,
        sample: u8,
        neighborhood: Neighborhood,
        value: Spin,
    },
    /// Position 15 was staged and the sequencer is idle again
    SweepCompleted { sweep: u64, snapshot: u16, tick: u64 },
}

/// Observer that receives ring events
pub trait RingObserver: Send + Sync {
    /// Called when a ring event occurs
    fn on_event(&self, event: RingEvent);
}

/// Function-based observer for simple cases
pub struct FnObserver<F: Fn(RingEvent) + Send + Sync>(pub F);

impl<F: Fn(RingEvent) + Send + Sync> RingObserver for FnObserver<F> {
    fn on_event(&self, event: RingEvent) {
        (self.0)(event);
    }
}

/// Channel-based observer - sends events to a channel
pub struct ChannelObserver {
    sender: std::sync::mpsc::Sender<RingEvent>,
}

impl ChannelObserver {
    pub fn new(sender: std::sync::mpsc::Sender<RingEvent>) -> Self {
        Self { sender }
    }
}

impl RingObserver for ChannelObserver {
    fn on_event(&self, event: RingEvent) {
        let _ = self.sender.send(event);
    }
}
