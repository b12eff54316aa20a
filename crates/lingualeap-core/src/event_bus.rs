//! Per-conversation event channel from the runtime to the UI.
//!
//! Single-threaded (WASM): the queue sits behind `Rc<RefCell<..>>` and the
//! UI drains it once per frame. Ending a conversation closes its bus;
//! from then on `emit` discards whatever a still-running turn produces,
//! so a late reply can never leak into the next conversation's view.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use lingualeap_types::event::ConversationEvent;

#[derive(Default)]
struct Channel {
    queue: VecDeque<ConversationEvent>,
    closed: bool,
    dropped: usize,
}

/// Handle to one conversation's channel. Clones share the channel.
#[derive(Clone, Default)]
pub struct EventBus {
    channel: Rc<RefCell<Channel>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event, or discard it if the bus is closed.
    pub fn emit(&self, event: ConversationEvent) {
        let mut channel = self.channel.borrow_mut();
        if channel.closed {
            channel.dropped += 1;
            log::debug!("Discarding event on closed bus: {:?}", event);
            return;
        }
        channel.queue.push_back(event);
    }

    /// Take all queued events in emission order.
    pub fn drain(&self) -> Vec<ConversationEvent> {
        self.channel.borrow_mut().queue.drain(..).collect()
    }

    /// Close the bus: pending events are discarded and later emits are ignored.
    /// Idempotent.
    pub fn close(&self) {
        let mut channel = self.channel.borrow_mut();
        if channel.closed {
            return;
        }
        channel.closed = true;
        channel.dropped += channel.queue.len();
        channel.queue.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.channel.borrow().closed
    }

    /// Events discarded because they arrived at, or after, `close`
    pub fn dropped(&self) -> usize {
        self.channel.borrow().dropped
    }
}
