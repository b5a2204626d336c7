//! Single-slot audit view state with stale-response protection.
//!
//! Each request gets a ticket from a monotonically increasing sequence.
//! A result is applied only if its ticket is still the latest one issued,
//! so a slow response can never overwrite the outcome of a newer request.
//! Updates are expected to arrive through one event loop; there is no
//! locking.

use tracing::debug;

use crate::error::AuditError;
use crate::record::model::AuditRecord;
use crate::source::PayloadSource;

/// Identifies one audit request within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub enum AuditState {
    #[default]
    Idle,
    Loading {
        ticket: RequestTicket,
    },
    Complete(AuditRecord),
    Failed(AuditError),
}

#[derive(Debug, Default)]
pub struct AuditSession {
    last_issued: u64,
    state: AuditState,
}

impl AuditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding any in flight.
    pub fn begin(&mut self) -> RequestTicket {
        self.last_issued += 1;
        let ticket = RequestTicket(self.last_issued);
        self.state = AuditState::Loading { ticket };
        ticket
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.last_issued
    }

    /// Apply `result` if `ticket` is still current. Returns whether it was applied.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        result: Result<AuditRecord, AuditError>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(
                stale = ticket.0,
                current = self.last_issued,
                "dropping superseded audit result"
            );
            return false;
        }

        self.state = match result {
            Ok(record) => AuditState::Complete(record),
            Err(err) => AuditState::Failed(err),
        };
        true
    }

    /// Load, normalize and apply an audit in one step.
    pub fn run(&mut self, source: &dyn PayloadSource, input: &str) -> &AuditState {
        let ticket = self.begin();
        let result = crate::audit(source, input);
        self.resolve(ticket, result);
        &self.state
    }

    pub fn state(&self) -> &AuditState {
        &self.state
    }

    /// The record on display, if the latest request completed.
    pub fn current(&self) -> Option<&AuditRecord> {
        match &self.state {
            AuditState::Complete(record) => Some(record),
            _ => None,
        }
    }
}
