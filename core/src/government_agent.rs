//! Governments — policy holders. Inert for now.
//!
//! A government still takes its slot in every activation order, so a
//! policy behavior can later be registered in place of
//! `GovernmentBehavior` without touching the scheduler.

use crate::{
    agent::{AgentKind, GovernmentProjection},
    behavior::AgentBehavior,
    error::SimResult,
    event::SimEvent,
    rng::SimRandom,
    types::{AgentId, Step},
    world::World,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernmentLevel {
    Federal,
    State,
    Local,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Government {
    pub id:                              AgentId,
    pub level:                           GovernmentLevel,
    pub relocation_incentives:           BTreeMap<String, f64>,
    pub retraining_programs:             BTreeMap<String, f64>,
    pub regional_development_strategies: BTreeMap<String, f64>,
}

impl Government {
    pub fn new(id: AgentId, level: GovernmentLevel) -> Self {
        Self {
            id,
            level,
            relocation_incentives: BTreeMap::new(),
            retraining_programs: BTreeMap::new(),
            regional_development_strategies: BTreeMap::new(),
        }
    }

    pub fn projection(&self) -> GovernmentProjection {
        GovernmentProjection {
            agent_id: self.id.clone(),
            level:    self.level,
        }
    }
}

#[derive(Debug, Default)]
pub struct GovernmentBehavior;

impl AgentBehavior for GovernmentBehavior {
    fn name(&self) -> &'static str {
        "government"
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Government
    }

    fn step(
        &mut self,
        _step: Step,
        agent_id: &str,
        world: &mut World,
        _rng: &mut dyn SimRandom,
    ) -> SimResult<Vec<SimEvent>> {
        world.registry.require(agent_id, AgentKind::Government)?;
        Ok(vec![])
    }
}
