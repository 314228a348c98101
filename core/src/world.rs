//! Shared mutable state seen by every transition during a step.

use crate::{job_board::JobBoard, registry::AgentRegistry, types::Step};

#[derive(Debug, Default, Clone)]
pub struct World {
    pub registry:  AgentRegistry,
    pub job_board: JobBoard,
    /// Lookups of employer/employee/region ids that found nothing.
    /// Each one turned the triggering action into a no-op.
    resolution_misses: u64,
}

impl World {
    pub fn new(registry: AgentRegistry) -> Self {
        Self {
            registry,
            job_board: JobBoard::new(),
            resolution_misses: 0,
        }
    }

    pub fn resolution_misses(&self) -> u64 {
        self.resolution_misses
    }

    /// Record a silent miss. Behavior stays a no-op; this only counts it.
    pub fn note_resolution_miss(&mut self, step: Step, agent_id: &str, missing_id: &str) {
        self.resolution_misses += 1;
        log::debug!("step={step} registry: {agent_id} could not resolve {missing_id}");
    }

    /// Individuals that currently have an employer.
    pub fn employed_count(&self) -> usize {
        self.registry
            .individuals()
            .filter(|p| p.is_employed())
            .count()
    }
}
