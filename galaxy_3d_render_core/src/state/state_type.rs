/// State categories, identities and the fields every state shares.

use std::sync::atomic::{AtomicU64, Ordering};

/// Render state category. A context holds one record per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateType {
    Blend,
    Clip,
    Cull,
    Material,
    Shader,
    Stencil,
    Texture,
    Wireframe,
    ZBuffer,
}

impl StateType {
    /// Number of categories
    pub const COUNT: usize = 9;

    /// All categories, in index order
    pub const ALL: [StateType; Self::COUNT] = [
        StateType::Blend,
        StateType::Clip,
        StateType::Cull,
        StateType::Material,
        StateType::Shader,
        StateType::Stencil,
        StateType::Texture,
        StateType::Wireframe,
        StateType::ZBuffer,
    ];

    /// Dense index into per-category tables
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Identity of a state instance.
///
/// Two states are "the same" for redundancy checks only if they share an
/// identity. Cloning a state yields a fresh identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u64);

static NEXT_STATE_ID: AtomicU64 = AtomicU64::new(1);

impl StateId {
    fn next() -> Self {
        Self(NEXT_STATE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value (for logs)
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Fields shared by every concrete state.
#[derive(Debug)]
pub struct StateCommon {
    id: StateId,
    enabled: bool,
    needs_refresh: bool,
}

impl StateCommon {
    /// Copy keeping the identity (driver-side snapshots only)
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            id: self.id,
            enabled: self.enabled,
            needs_refresh: self.needs_refresh,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.needs_refresh = true;
    }
}

impl Default for StateCommon {
    fn default() -> Self {
        Self {
            id: StateId::next(),
            enabled: true,
            needs_refresh: true,
        }
    }
}

impl Clone for StateCommon {
    fn clone(&self) -> Self {
        Self {
            id: StateId::next(),
            enabled: self.enabled,
            needs_refresh: true,
        }
    }
}

/// Behaviour common to every concrete state struct.
///
/// Any setter marks the state as needing a refresh, so an edited state is
/// re-applied even when its identity matches the context record.
pub trait ConcreteState: Clone + Into<crate::state::RenderState> {
    /// Category of this state
    const TYPE: StateType;

    fn common(&self) -> &StateCommon;

    fn common_mut(&mut self) -> &mut StateCommon;

    fn id(&self) -> StateId {
        self.common().id
    }

    fn is_enabled(&self) -> bool {
        self.common().enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        let common = self.common_mut();
        common.enabled = enabled;
        common.needs_refresh = true;
    }

    fn needs_refresh(&self) -> bool {
        self.common().needs_refresh
    }

    fn set_needs_refresh(&mut self, refresh: bool) {
        self.common_mut().needs_refresh = refresh;
    }
}

/// Implements `ConcreteState` and the `RenderState` conversion for a struct
/// with a `common: StateCommon` field.
macro_rules! concrete_state {
    ($state:ident, $variant:ident) => {
        impl $crate::state::ConcreteState for $state {
            const TYPE: $crate::state::StateType = $crate::state::StateType::$variant;

            fn common(&self) -> &$crate::state::StateCommon {
                &self.common
            }

            fn common_mut(&mut self) -> &mut $crate::state::StateCommon {
                &mut self.common
            }
        }

        impl From<$state> for $crate::state::RenderState {
            fn from(state: $state) -> Self {
                $crate::state::RenderState::$variant(state)
            }
        }
    };
}

pub(crate) use concrete_state;
