//! Firms — employers that shed workers as they adopt AI and post openings.
//!
//! Transition, once per step:
//!   1. Layoff: one draw against a probability keyed by AI adoption
//!      stage. On success one employee, chosen uniformly, is released.
//!   2. Vacancy: one draw; on success a vacancy for a random SOC code in
//!      the firm's own region goes on the job board.
//!
//! Both draws are always taken, so the stream position does not depend
//! on whether the firm has employees.

use crate::{
    agent::{AgentKind, FirmProjection},
    behavior::AgentBehavior,
    config::FirmParams,
    error::{SimError, SimResult},
    event::SimEvent,
    job_board::Vacancy,
    rng::SimRandom,
    types::{AgentId, RegionId, Step},
    world::World,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiAdoptionStage {
    #[serde(rename = "none")]
    NotAdopted,
    #[serde(rename = "early")]
    Early,
    #[serde(rename = "mature")]
    Mature,
    /// Any value we do not model. Never triggers layoffs.
    #[serde(other, rename = "unrecognized")]
    Unrecognized,
}

/// Attribute record as produced by the population generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmAttributes {
    // Characteristics
    pub industry:              String,
    pub size_category:         String,
    pub age:                   u32,
    pub remote_work_policy:    String,
    pub ai_adoption_stage:     AiAdoptionStage,
    // Economics
    pub revenue_growth:        f64,
    pub labor_intensity:       f64,
    pub geographic_footprint:  String,
    pub automation_investment: f64,
    // Employment outlook
    pub layoff_history:        bool,
    pub hiring_projections:    f64,
    pub wage_structure:        String,
    // Location
    pub msa:                   RegionId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Firm {
    pub id:            AgentId,
    pub attrs:         FirmAttributes,
    /// Ordered, duplicate-free.
    pub employees:     Vec<AgentId>,
    /// Always equal to `employees.len()`.
    pub total_workers: usize,
}

impl Firm {
    pub fn new(id: AgentId, attrs: FirmAttributes) -> Self {
        Self {
            id,
            attrs,
            employees: Vec::new(),
            total_workers: 0,
        }
    }

    /// Returns false if the individual was already on the payroll.
    pub fn add_employee(&mut self, individual_id: &str) -> bool {
        if self.employees.iter().any(|e| e == individual_id) {
            return false;
        }
        self.employees.push(individual_id.to_string());
        self.total_workers += 1;
        true
    }

    /// Returns false if the individual was not on the payroll.
    pub fn remove_employee(&mut self, individual_id: &str) -> bool {
        match self.employees.iter().position(|e| e == individual_id) {
            Some(pos) => {
                self.employees.remove(pos);
                self.total_workers = self.total_workers.saturating_sub(1);
                true
            }
            None => false,
        }
    }

    pub fn projection(&self) -> FirmProjection {
        FirmProjection {
            agent_id:          self.id.clone(),
            msa:               self.attrs.msa.clone(),
            total_workers:     self.total_workers,
            ai_adoption_stage: self.attrs.ai_adoption_stage,
        }
    }
}

pub struct FirmBehavior {
    params: FirmParams,
}

impl FirmBehavior {
    pub fn new(params: FirmParams) -> Self {
        Self { params }
    }

    pub fn layoff(
        &self,
        step: Step,
        firm_id: &str,
        world: &mut World,
        rng: &mut dyn SimRandom,
    ) -> SimResult<Option<SimEvent>> {
        let draw = rng.next_f64();

        let (stage, employee_id) = {
            let firm = world
                .registry
                .firm(firm_id)
                .ok_or_else(|| SimError::AgentNotFound { id: firm_id.to_string() })?;
            let threshold = self.params.layoff_probability(firm.attrs.ai_adoption_stage);
            if draw >= threshold || firm.employees.is_empty() {
                return Ok(None);
            }
            let pick = rng.pick_index(firm.employees.len());
            (firm.attrs.ai_adoption_stage, firm.employees[pick].clone())
        };

        match world.registry.individual_mut(&employee_id) {
            Some(person) => person.employer_id = None,
            None => {
                world.note_resolution_miss(step, firm_id, &employee_id);
                return Ok(Some(SimEvent::ResolutionMissed {
                    step,
                    agent_id: firm_id.to_string(),
                    missing_id: employee_id,
                }));
            }
        }
        if let Some(firm) = world.registry.firm_mut(firm_id) {
            firm.remove_employee(&employee_id);
        }

        log::debug!("step={step} firm: {firm_id} laid off {employee_id} (stage={stage:?})");

        Ok(Some(SimEvent::LaidOff {
            step,
            firm_id: firm_id.to_string(),
            individual_id: employee_id,
            ai_adoption_stage: stage,
        }))
    }

    pub fn post_job_vacancy(
        &self,
        step: Step,
        firm_id: &str,
        world: &mut World,
        rng: &mut dyn SimRandom,
    ) -> SimResult<Option<SimEvent>> {
        if !rng.chance(self.params.vacancy_probability) {
            return Ok(None);
        }

        let msa = world
            .registry
            .firm(firm_id)
            .map(|f| f.attrs.msa.clone())
            .ok_or_else(|| SimError::AgentNotFound { id: firm_id.to_string() })?;

        // Placeholder occupation space, not tied to the firm's staffing.
        let span = self.params.soc_max - self.params.soc_min + 1;
        let code = self.params.soc_min + rng.next_u64_below(span);
        let soc_code = format!("{}{code}", self.params.soc_prefix);

        world
            .job_board
            .post(Vacancy::new(firm_id, soc_code.clone(), msa.clone()));

        Ok(Some(SimEvent::VacancyPosted {
            step,
            firm_id: firm_id.to_string(),
            soc_code,
            msa,
        }))
    }
}

impl AgentBehavior for FirmBehavior {
    fn name(&self) -> &'static str {
        "firm"
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Firm
    }

    fn step(
        &mut self,
        step: Step,
        agent_id: &str,
        world: &mut World,
        rng: &mut dyn SimRandom,
    ) -> SimResult<Vec<SimEvent>> {
        world.registry.require(agent_id, AgentKind::Firm)?;

        let mut events = Vec::new();
        events.extend(self.layoff(step, agent_id, world, rng)?);
        events.extend(self.post_job_vacancy(step, agent_id, world, rng)?);
        Ok(events)
    }
}
