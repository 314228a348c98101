//! Random activation scheduler.
//!
//! Holds every live agent, of every kind, in one queue. Each step the
//! queue is snapshotted and shuffled into a fresh uniform permutation;
//! the engine then activates each entry exactly once, in that order.
//! The snapshot means nothing done during the pass can change which
//! agents the pass visits.

use crate::{
    agent::AgentKind,
    registry::AgentRegistry,
    rng::SimRng,
    types::AgentId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub agent_id: AgentId,
    pub kind:     AgentKind,
}

#[derive(Debug, Default, Clone)]
pub struct Scheduler {
    agents: Vec<Activation>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule every registered agent, in registration order.
    pub fn from_registry(registry: &AgentRegistry) -> Self {
        Self {
            agents: registry
                .iter()
                .map(|a| Activation {
                    agent_id: a.id().clone(),
                    kind:     a.kind(),
                })
                .collect(),
        }
    }

    pub fn add(&mut self, agent_id: AgentId, kind: AgentKind) {
        self.agents.push(Activation { agent_id, kind });
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// This step's activation order. Never cached.
    pub fn activation_order(&self, rng: &mut SimRng) -> Vec<Activation> {
        let mut order = self.agents.clone();
        rng.shuffle(&mut order);
        order
    }
}
