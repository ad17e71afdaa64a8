/// Driver-side mirror of one state category, and the per-session defaults.

use crate::state::{RenderState, StateId, StateType};

/// What a context believes the driver currently holds for one category.
///
/// An invalid record means "unknown": the next apply for the category is
/// always issued.
#[derive(Debug, Clone, Default)]
pub struct StateRecord {
    valid: bool,
    applied: Option<StateId>,
    values: Option<RenderState>,
}

impl StateRecord {
    /// A fresh, invalid record
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Identity of the last state applied through this record
    pub fn applied_id(&self) -> Option<StateId> {
        self.applied
    }

    /// Values of the last state applied
    pub fn values(&self) -> Option<&RenderState> {
        self.values.as_ref()
    }

    /// Forget everything; the next apply is never skipped.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Whether `state` has to reach the driver.
    pub fn needs_apply(&self, state: &RenderState) -> bool {
        !self.valid || self.applied != Some(state.id()) || state.needs_refresh()
    }

    pub(crate) fn record(&mut self, state: &RenderState) {
        self.applied = Some(state.id());
        self.values = Some(state.duplicate());
        self.valid = true;
    }
}

/// Fallback state per category, used when nothing is enforced or supplied.
#[derive(Debug, Clone)]
pub struct DefaultStates {
    states: [RenderState; StateType::COUNT],
}

impl DefaultStates {
    /// Built-in defaults: a disabled state of every category.
    pub fn new() -> Self {
        Self {
            states: std::array::from_fn(|index| RenderState::default_for(StateType::ALL[index])),
        }
    }

    pub fn get(&self, state_type: StateType) -> &RenderState {
        &self.states[state_type.index()]
    }

    pub fn get_mut(&mut self, state_type: StateType) -> &mut RenderState {
        &mut self.states[state_type.index()]
    }

    /// Replace the default for the state's category; returns the old one.
    pub fn set(&mut self, state: RenderState) -> RenderState {
        let slot = &mut self.states[state.state_type().index()];
        std::mem::replace(slot, state)
    }
}

impl Default for DefaultStates {
    fn default() -> Self {
        Self::new()
    }
}
