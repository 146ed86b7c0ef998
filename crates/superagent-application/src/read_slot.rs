//! Stale-response guard for one read slot of a panel.

use superagent_core::SessionContext;
use superagent_core::freshness::{RequestSequencer, RequestTicket};
use tracing::warn;

/// Issued when a read starts, checked when its response is applied.
#[derive(Debug, Clone, Copy)]
pub struct SlotTicket {
    ticket: RequestTicket,
    generation: u64,
}

#[derive(Debug)]
pub struct ReadSlot {
    name: &'static str,
    sequencer: RequestSequencer,
}

impl ReadSlot {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            sequencer: RequestSequencer::new(),
        }
    }

    pub fn begin(&self, session: &SessionContext) -> SlotTicket {
        SlotTicket {
            ticket: self.sequencer.issue(),
            generation: session.generation(),
        }
    }

    /// `false` when a newer read was started on this slot or the session
    /// changed since `ticket` was issued. Call with the view lock held.
    pub fn accepts(&self, session: &SessionContext, ticket: SlotTicket) -> bool {
        if !self.sequencer.is_current(ticket.ticket) {
            warn!(
                "[ReadSlot] Discarding stale {} response (ticket {})",
                self.name,
                ticket.ticket.value()
            );
            return false;
        }
        if session.generation() != ticket.generation {
            warn!("[ReadSlot] Discarding {} response from an ended session", self.name);
            return false;
        }
        true
    }
}
