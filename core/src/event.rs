//! Simulation events — the observable record of every state change.
//!
//! Transitions return the events they caused; the engine appends them
//! to the run's event log in activation order.

use crate::{
    firm_agent::AiAdoptionStage,
    types::{AgentId, RegionId, RunId, Step},
};
use serde::{Deserialize, Serialize};

/// Every event emitted during simulation.
/// Variants may be added — never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Engine events ──────────────────────────────
    RunInitialized {
        run_id: RunId,
        seed: u64,
        agents: usize,
    },
    StepStarted {
        step: Step,
    },
    StepCompleted {
        step: Step,
        activations: usize,
        open_vacancies: usize,
    },
    AgentStepFailed {
        step: Step,
        agent_id: AgentId,
        reason: String,
    },
    ResolutionMissed {
        step: Step,
        agent_id: AgentId,
        missing_id: AgentId,
    },

    // ── Labor market ───────────────────────────────
    VacancyPosted {
        step: Step,
        firm_id: AgentId,
        soc_code: String,
        msa: RegionId,
    },
    Hired {
        step: Step,
        individual_id: AgentId,
        firm_id: AgentId,
        soc_code: String,
        msa: RegionId,
        /// True when no vacancy matched in the home region and the
        /// search was widened to every region.
        relaxed_search: bool,
    },
    LaidOff {
        step: Step,
        firm_id: AgentId,
        individual_id: AgentId,
        ai_adoption_stage: AiAdoptionStage,
    },

    // ── Geography ──────────────────────────────────
    Migrated {
        step: Step,
        individual_id: AgentId,
        from_msa: RegionId,
        to_msa: RegionId,
        housing_costs: f64,
    },
    RegionUpdated {
        step: Step,
        region_id: RegionId,
        residents: usize,
        unemployment_rate: f64,
        wage_growth: f64,
        vacancy_rates: f64,
    },
}

impl SimEvent {
    /// Stable name used for the event_type column in event_log.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::RunInitialized { .. }   => "run_initialized",
            Self::StepStarted { .. }      => "step_started",
            Self::StepCompleted { .. }    => "step_completed",
            Self::AgentStepFailed { .. }  => "agent_step_failed",
            Self::ResolutionMissed { .. } => "resolution_missed",
            Self::VacancyPosted { .. }    => "vacancy_posted",
            Self::Hired { .. }            => "hired",
            Self::LaidOff { .. }          => "laid_off",
            Self::Migrated { .. }         => "migrated",
            Self::RegionUpdated { .. }    => "region_updated",
        }
    }

    /// The agent the event is about, if any. Engine events have none.
    pub fn agent_id(&self) -> Option<&AgentId> {
        match self {
            Self::RunInitialized { .. }
            | Self::StepStarted { .. }
            | Self::StepCompleted { .. } => None,
            Self::AgentStepFailed { agent_id, .. }
            | Self::ResolutionMissed { agent_id, .. } => Some(agent_id),
            Self::VacancyPosted { firm_id, .. } | Self::LaidOff { firm_id, .. } => Some(firm_id),
            Self::Hired { individual_id, .. } | Self::Migrated { individual_id, .. } => {
                Some(individual_id)
            }
            Self::RegionUpdated { region_id, .. } => Some(region_id),
        }
    }
}

/// The event log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id:         Option<i64>,
    pub run_id:     RunId,
    pub step:       Step,
    pub agent_id:   Option<AgentId>,
    pub event_type: String,
    pub payload:    String, // JSON-serialized SimEvent
}
