//! The state machine which rings touches of a [`Method`].

use crate::{
    call::{CallType, LeadType},
    row::CallMarker,
    Block, Method, Row, SizeMismatchError,
};

/// A call which has started but not yet had all its changes rung
#[derive(Debug)]
struct ActiveCall<'m> {
    call_type: CallType,
    /// The variant of the call for the lead part where it started.  This is used until the call
    /// finishes, even if it runs into the next lead part.
    changes: &'m Block,
    /// The index (in `changes`) of the next change to ring
    cursor: usize,
}

/// Everything needed to ring a touch of some [`Method`].
#[derive(Debug)]
pub(super) struct TouchState<'m> {
    method: &'m Method,
    /// One entry per lead to ring.  This includes the plain leads added to fill up the last
    /// repeating unit, or to realign an offset method.
    leads: Vec<LeadType>,
    active_call: Option<ActiveCall<'m>>,
}

impl<'m> TouchState<'m> {
    pub(super) fn new(method: &'m Method, mut leads: Vec<LeadType>) -> Self {
        // A method like Stedman can only be rung in whole repeating units, so pad any partial unit
        // with plain leads
        let num_parts = method.num_lead_parts();
        while num_parts > 1 && leads.len() % num_parts != 0 {
            leads.push(LeadType::Plain);
        }
        // An offset splits one lead over the start and end of the touch.  If the calling position
        // comes before the first row rung, the touch's first call has to wait until the next lead.
        if method.offset() > 0 {
            if method.calling_position() > method.offset() {
                leads.push(LeadType::Plain);
            } else {
                leads.insert(0, LeadType::Plain);
            }
        }

        TouchState {
            method,
            leads,
            active_call: None,
        }
    }

    /// Ring every lead of this touch onto the end of `block`.  `block` must have already been
    /// checked to be large enough for the [`Method`].
    pub(super) fn ring(mut self, block: &mut Block) -> crate::Result<()> {
        let leads = std::mem::take(&mut self.leads);
        for (lead_idx, &lead) in leads.iter().enumerate() {
            let is_last = lead_idx == leads.len() - 1;
            self.ring_lead(block, lead_idx, lead, is_last)?;
        }
        Ok(())
    }

    fn ring_lead(
        &mut self,
        block: &mut Block,
        lead_idx: usize,
        lead: LeadType,
        is_last: bool,
    ) -> Result<(), SizeMismatchError> {
        let method = self.method;
        let offset = method.offset();
        let part = lead_idx % method.num_lead_parts();
        let plain = &method.plain_leads[part];

        let first_row = if lead_idx == 0 && offset > 0 {
            1 + offset
        } else {
            1
        };
        let last_row = if is_last && offset > 0 {
            offset.min(plain.len())
        } else {
            plain.len()
        };
        log::trace!(
            "Lead {} ({}): part {}, rows {}..={}",
            lead_idx,
            lead.to_char(),
            part,
            first_row,
            last_row
        );

        for row_idx in first_row..=last_row {
            let mut marker = None;
            if row_idx == method.calling_position() {
                if let Some(call_type) = lead.call() {
                    marker = self.start_call(call_type, part, lead_idx);
                }
            }
            let transposition = match self.next_call_change() {
                Some(change) => change,
                None => &plain.rows()[row_idx],
            };
            block.ring(transposition)?;
            block.last_row_mut().set_call(marker);
        }
        Ok(())
    }

    /// Start ringing a call, returning the marker for its first row.  If the call isn't defined,
    /// nothing happens and the lead stays plain.
    fn start_call(
        &mut self,
        call_type: CallType,
        part: usize,
        lead_idx: usize,
    ) -> Option<CallMarker> {
        match self.method.call_block(call_type, part) {
            Some(changes) => {
                self.active_call = Some(ActiveCall {
                    call_type,
                    changes,
                    cursor: 1,
                });
                Some(CallMarker::Call(call_type))
            }
            None => {
                log::warn!(
                    "{} has no {} for lead {}; ringing it plain",
                    self.method.title(),
                    call_type,
                    lead_idx + 1
                );
                None
            }
        }
    }

    /// Take the next change of the active call, if there is one
    fn next_call_change(&mut self) -> Option<&'m Row> {
        let call = self.active_call.as_mut()?;
        let changes: &'m Block = call.changes;
        let change = &changes.rows()[call.cursor];
        call.cursor += 1;
        if call.cursor > changes.len() {
            log::trace!("Finished {}", call.call_type);
            self.active_call = None;
        }
        Some(change)
    }
}
