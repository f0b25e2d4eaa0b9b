//! Interaction bookkeeping for the INP emulator.
//!
//! Owns the advisory busy flag, the click counter, and the reconciliation of
//! passive event-timing observations with the interactions the page itself
//! dispatched. The busy flag is display state only: overlapping interactions
//! are permitted and serialize through the single thread.

/// Event names worth surfacing from the event-timing stream.
const TRACKED_EVENTS: [&str; 4] = ["click", "pointerdown", "keydown", "keyup"];

/// A raw event-timing observation, before reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedEvent {
    pub name: String,
    pub start_time: f64,
    pub duration: f64,
    pub processing_start: Option<f64>,
    pub processing_end: Option<f64>,
    pub interaction_id: Option<u64>,
}

/// A reconciled interaction record, as surfaced on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRecord {
    /// Event name, suffixed with the dispatch label when one was pending.
    pub name: String,
    pub start_time: f64,
    pub duration: f64,
    pub processing_start: Option<f64>,
    pub processing_end: Option<f64>,
    pub interaction_id: Option<u64>,
}

/// Advisory interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusyState {
    #[default]
    Idle,
    Busy,
}

/// Per-page interaction state: `idle → busy → idle` once per interaction.
#[derive(Debug, Default)]
pub struct InteractionTracker {
    state: BusyState,
    clicks: u64,
    last: Option<InteractionRecord>,
    last_interaction_id: Option<u64>,
    pending_label: Option<String>,
}

impl InteractionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BusyState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == BusyState::Busy
    }

    /// Completed interactions since mount (or the last reset).
    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    /// The most recent reconciled interaction, if any.
    pub fn last(&self) -> Option<&InteractionRecord> {
        self.last.as_ref()
    }

    /// Note the label of the interaction about to run and enter `Busy`.
    pub fn begin(&mut self, label: &str) {
        self.pending_label = Some(label.to_string());
        self.state = BusyState::Busy;
    }

    /// Count the completed interaction and return to `Idle`.
    pub fn finish(&mut self) {
        self.clicks = self.clicks.saturating_add(1);
        self.state = BusyState::Idle;
    }

    /// Clear counters and display state.
    pub fn reset(&mut self) {
        self.pending_label = Some("reset".to_string());
        self.clicks = 0;
        self.last = None;
    }

    /// Feed one event-timing observation.
    ///
    /// Returns the updated record when the entry was a tracked event and not
    /// a duplicate observation of the previous interaction identifier.
    pub fn observe(&mut self, event: ObservedEvent) -> Option<&InteractionRecord> {
        if let Some(id) = event.interaction_id {
            if self.last_interaction_id == Some(id) {
                return None;
            }
            self.last_interaction_id = Some(id);
        }

        if !TRACKED_EVENTS.contains(&event.name.as_str()) {
            return None;
        }

        let name = match self.pending_label.take() {
            Some(label) => format!("{} ({})", event.name, label),
            None => event.name.clone(),
        };

        self.last = Some(InteractionRecord {
            name,
            start_time: event.start_time,
            duration: event.duration,
            processing_start: event.processing_start,
            processing_end: event.processing_end,
            interaction_id: event.interaction_id,
        });
        self.last.as_ref()
    }
}

/// Round-and-suffix formatting used by the status cards.
pub fn format_ms(ms: f64) -> String {
    format!("{}ms", ms.round() as i64)
}
