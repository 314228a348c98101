//! Per-step data collection.
//!
//! After every step the engine records one model-level sample and the
//! projection of every agent. Projections are explicit per-kind
//! functions (see agent.rs), computed on demand from the world.

use crate::{
    agent::AgentProjection,
    types::Step,
    world::World,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSample {
    pub step:              Step,
    pub employed:          usize,
    pub unemployed:        usize,
    pub open_vacancies:    usize,
    pub resolution_misses: u64,
}

impl ModelSample {
    pub fn of(step: Step, world: &World) -> Self {
        let employed = world.employed_count();
        let individuals = world.registry.individuals().count();
        Self {
            step,
            employed,
            unemployed: individuals - employed,
            open_vacancies: world.job_board.len(),
            resolution_misses: world.resolution_misses(),
        }
    }

    pub fn unemployment_rate(&self) -> f64 {
        let total = self.employed + self.unemployed;
        if total == 0 {
            return 0.0;
        }
        self.unemployed as f64 / total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSample {
    pub step:        Step,
    pub projections: Vec<AgentProjection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataCollector {
    pub model_samples: Vec<ModelSample>,
    pub agent_samples: Vec<AgentSample>,
}

impl DataCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state of `world` at the end of `step`.
    pub fn collect(&mut self, step: Step, world: &World) -> ModelSample {
        let sample = ModelSample::of(step, world);
        self.model_samples.push(sample);
        self.agent_samples.push(AgentSample {
            step,
            projections: world.registry.iter().map(|a| a.projection()).collect(),
        });
        sample
    }

    pub fn latest(&self) -> Option<&ModelSample> {
        self.model_samples.last()
    }
}
