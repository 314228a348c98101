//! Agent registry — the single source of truth for agent identity.
//!
//! RULE: Agents are registered once while the world is built.
//! During stepping the set of ids never changes; transitions only
//! mutate fields of agents they resolve here.
//!
//! Lookups are indexed. Iteration is always in registration order so
//! every full scan is deterministic for a given seed.

use crate::{
    agent::{Agent, AgentKind},
    error::{ConfigError, SimError, SimResult},
    firm_agent::Firm,
    government_agent::Government,
    individual_agent::Individual,
    region_agent::Region,
    types::AgentId,
};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
    index:  HashMap<AgentId, usize>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an agent under its own id. A duplicate id is fatal.
    pub fn register(&mut self, agent: Agent) -> SimResult<()> {
        let id = agent.id().clone();
        if self.index.contains_key(&id) {
            return Err(ConfigError::DuplicateAgent { id }.into());
        }
        self.index.insert(id, self.agents.len());
        self.agents.push(agent);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Agent> {
        self.index.get(id).map(|&i| &self.agents[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Agent> {
        match self.index.get(id) {
            Some(&i) => Some(&mut self.agents[i]),
            None => None,
        }
    }

    /// All agents in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn count_of_kind(&self, kind: AgentKind) -> usize {
        self.agents.iter().filter(|a| a.kind() == kind).count()
    }

    // ── Typed lookups: None on miss or on kind mismatch ────────────

    pub fn individual(&self, id: &str) -> Option<&Individual> {
        self.get(id).and_then(Agent::as_individual)
    }

    pub fn individual_mut(&mut self, id: &str) -> Option<&mut Individual> {
        self.get_mut(id).and_then(Agent::as_individual_mut)
    }

    pub fn firm(&self, id: &str) -> Option<&Firm> {
        self.get(id).and_then(Agent::as_firm)
    }

    pub fn firm_mut(&mut self, id: &str) -> Option<&mut Firm> {
        self.get_mut(id).and_then(Agent::as_firm_mut)
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.get(id).and_then(Agent::as_region)
    }

    pub fn region_mut(&mut self, id: &str) -> Option<&mut Region> {
        self.get_mut(id).and_then(Agent::as_region_mut)
    }

    pub fn government(&self, id: &str) -> Option<&Government> {
        self.get(id).and_then(Agent::as_government)
    }

    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.agents.iter().filter_map(Agent::as_individual)
    }

    pub fn firms(&self) -> impl Iterator<Item = &Firm> {
        self.agents.iter().filter_map(Agent::as_firm)
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.agents.iter().filter_map(Agent::as_region)
    }

    // ── Strict lookups for an agent's own record ───────────────────
    //
    // A scheduled agent that cannot find itself is a fault, not a
    // resolution miss, so these return errors.

    pub fn require(&self, id: &str, expected: AgentKind) -> SimResult<&Agent> {
        let agent = self
            .get(id)
            .ok_or_else(|| SimError::AgentNotFound { id: id.to_string() })?;
        if agent.kind() != expected {
            return Err(SimError::KindMismatch {
                id: id.to_string(),
                expected,
                actual: agent.kind(),
            });
        }
        Ok(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::government_agent::{Government, GovernmentLevel};

    fn gov(id: &str) -> Agent {
        Agent::Government(Government::new(id.into(), GovernmentLevel::State))
    }

    #[test]
    fn duplicate_registration_is_a_configuration_error() {
        let mut registry = AgentRegistry::new();
        registry.register(gov("gov-01")).unwrap();
        let err = registry.register(gov("gov-01")).unwrap_err();
        assert!(matches!(
            err,
            SimError::Configuration(ConfigError::DuplicateAgent { ref id }) if id == "gov-01"
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn typed_lookup_misses_on_kind_mismatch() {
        let mut registry = AgentRegistry::new();
        registry.register(gov("gov-01")).unwrap();
        assert!(registry.get("gov-01").is_some());
        assert!(registry.firm("gov-01").is_none());
        assert!(registry.individual("nobody").is_none());

        let err = registry.require("gov-01", AgentKind::Firm).unwrap_err();
        assert!(matches!(err, SimError::KindMismatch { .. }));
    }
}
