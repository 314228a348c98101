//! Individuals — workers who search for jobs and occasionally relocate.
//!
//! Transition, once per step:
//!   1. If unemployed, search the job board. Same-occupation vacancies in
//!      the home region win; otherwise any region. One match is taken
//!      uniformly at random and filled on the spot.
//!   2. With a small probability, compare the home region against a
//!      random sample of others and move to a strictly better one.
//!
//! Depends on: firm records (employer resolution), region records, job board.

use crate::{
    agent::{AgentKind, IndividualProjection},
    behavior::AgentBehavior,
    config::IndividualParams,
    error::SimResult,
    event::SimEvent,
    job_board::Vacancy,
    region_agent::Region,
    rng::SimRandom,
    types::{AgentId, RegionId, Step},
    world::World,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Education {
    HighSchool,
    Bachelor,
    Master,
    Phd,
}

/// Attribute record as produced by the population generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualAttributes {
    // Demographics
    pub age:                            u32,
    pub education:                      Education,
    pub race_ethnicity:                 String,
    pub marital_status:                 String,
    pub household_size:                 u32,
    pub homeownership:                  bool,
    // Occupation
    pub soc_code:                       String,
    pub industry_naics:                 String,
    pub ai_exposure_index:              f64,
    /// Missing values count as the median when regions aggregate.
    #[serde(default)]
    pub wage_percentile:                Option<f64>,
    pub tenure:                         f64,
    // Location
    pub current_msa:                    RegionId,
    pub commute_distance:               f64,
    pub housing_costs:                  f64,
    pub local_network_strength:         f64,
    // Financial
    pub liquid_savings:                 f64,
    pub debt_levels:                    f64,
    pub equity_holdings:                f64,
    pub unemployment_benefits_eligible: bool,
    // Preferences
    pub climate_preference:             String,
    pub urban_rural_preference:         String,
    pub family_proximity_weight:        f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub id:          AgentId,
    pub attrs:       IndividualAttributes,
    /// The employment link. Employment status is derived from it.
    pub employer_id: Option<AgentId>,
}

impl Individual {
    pub fn new(id: AgentId, attrs: IndividualAttributes) -> Self {
        Self { id, attrs, employer_id: None }
    }

    pub fn is_employed(&self) -> bool {
        self.employer_id.is_some()
    }

    pub fn current_msa(&self) -> &RegionId {
        &self.attrs.current_msa
    }

    pub fn projection(&self) -> IndividualProjection {
        IndividualProjection {
            agent_id:    self.id.clone(),
            age:         self.attrs.age,
            education:   self.attrs.education,
            current_msa: self.attrs.current_msa.clone(),
            is_employed: self.is_employed(),
        }
    }
}

/// Region attractiveness; lower is better.
pub fn migration_score(region: &Region, price_scale: f64) -> f64 {
    region.attrs.unemployment_rate + region.attrs.median_price / price_scale
}

pub struct IndividualBehavior {
    params: IndividualParams,
}

impl IndividualBehavior {
    pub fn new(params: IndividualParams) -> Self {
        Self { params }
    }

    /// Try to fill one matching vacancy. Returns the resulting event, if any.
    pub fn search_for_job(
        &self,
        step: Step,
        agent_id: &str,
        world: &mut World,
        rng: &mut dyn SimRandom,
    ) -> SimResult<Option<SimEvent>> {
        let (soc_code, msa) = match world.registry.individual(agent_id) {
            Some(me) => (me.attrs.soc_code.clone(), me.attrs.current_msa.clone()),
            None => return Ok(None),
        };

        let mut relaxed_search = false;
        let mut matches = world
            .job_board
            .find(|v| v.soc_code == soc_code && v.msa == msa);
        if matches.is_empty() {
            relaxed_search = true;
            matches = world.job_board.find(|v| v.soc_code == soc_code);
        }
        if matches.is_empty() {
            return Ok(None);
        }

        let vacancy: Vacancy = matches.swap_remove(rng.pick_index(matches.len()));

        match world.registry.firm_mut(&vacancy.firm_id) {
            Some(firm) => {
                firm.add_employee(agent_id);
            }
            None => {
                world.note_resolution_miss(step, agent_id, &vacancy.firm_id);
                return Ok(Some(SimEvent::ResolutionMissed {
                    step,
                    agent_id: agent_id.to_string(),
                    missing_id: vacancy.firm_id,
                }));
            }
        }
        if let Some(me) = world.registry.individual_mut(agent_id) {
            me.employer_id = Some(vacancy.firm_id.clone());
        }
        world.job_board.remove(&vacancy);

        log::debug!(
            "step={step} individual: {agent_id} hired by {} ({}, {})",
            vacancy.firm_id,
            vacancy.soc_code,
            vacancy.msa
        );

        Ok(Some(SimEvent::Hired {
            step,
            individual_id: agent_id.to_string(),
            firm_id: vacancy.firm_id,
            soc_code: vacancy.soc_code,
            msa: vacancy.msa,
            relaxed_search,
        }))
    }

    /// Compare the home region against a sample of others and move if one
    /// scores strictly lower.
    pub fn decide_migration(
        &self,
        step: Step,
        agent_id: &str,
        world: &mut World,
        rng: &mut dyn SimRandom,
    ) -> SimResult<Option<SimEvent>> {
        let current_id = match world.registry.individual(agent_id) {
            Some(me) => me.attrs.current_msa.clone(),
            None => return Ok(None),
        };
        let Some(current) = world.registry.region(&current_id) else {
            world.note_resolution_miss(step, agent_id, &current_id);
            return Ok(Some(SimEvent::ResolutionMissed {
                step,
                agent_id: agent_id.to_string(),
                missing_id: current_id,
            }));
        };

        let others: Vec<&Region> = world
            .registry
            .regions()
            .filter(|r| r.id != current_id)
            .collect();
        if others.is_empty() {
            return Ok(None);
        }

        let sample = rng.sample_indices(others.len(), self.params.migration_sample_size);

        let mut best = current;
        let mut best_score = migration_score(current, self.params.price_scale);
        for i in sample {
            let candidate = others[i];
            let score = migration_score(candidate, self.params.price_scale);
            if score < best_score {
                best = candidate;
                best_score = score;
            }
        }

        if best.id == current_id {
            return Ok(None);
        }
        let to_msa = best.id.clone();
        let housing_costs = best.attrs.median_price / self.params.housing_cost_months;

        if let Some(me) = world.registry.individual_mut(agent_id) {
            me.attrs.current_msa = to_msa.clone();
            me.attrs.housing_costs = housing_costs;
        }

        log::debug!("step={step} individual: {agent_id} moved {current_id} -> {to_msa}");

        Ok(Some(SimEvent::Migrated {
            step,
            individual_id: agent_id.to_string(),
            from_msa: current_id,
            to_msa,
            housing_costs,
        }))
    }
}

impl AgentBehavior for IndividualBehavior {
    fn name(&self) -> &'static str {
        "individual"
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Individual
    }

    fn step(
        &mut self,
        step: Step,
        agent_id: &str,
        world: &mut World,
        rng: &mut dyn SimRandom,
    ) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();

        let employed = world
            .registry
            .require(agent_id, AgentKind::Individual)?
            .as_individual()
            .is_some_and(Individual::is_employed);

        if !employed {
            events.extend(self.search_for_job(step, agent_id, world, rng)?);
        }

        // Drawn regardless of the search outcome.
        if rng.chance(self.params.migration_probability) {
            events.extend(self.decide_migration(step, agent_id, world, rng)?);
        }

        Ok(events)
    }
}
