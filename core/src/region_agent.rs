//! Regions (MSAs) — aggregate labor and housing indicators.
//!
//! A region never owns individuals. Each step it scans the whole
//! population for current residents and recomputes its indicators from
//! that snapshot. Activation order matters: a region stepped before a
//! layoff in the same pass reports the pre-layoff rate.

use crate::{
    agent::{AgentKind, RegionProjection},
    behavior::AgentBehavior,
    config::RegionParams,
    error::SimResult,
    event::SimEvent,
    rng::SimRandom,
    types::{RegionId, Step},
    world::World,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute record as produced by the population generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionAttributes {
    // Labor markets
    pub unemployment_rate:        f64,
    pub wage_growth:              f64,
    pub job_openings_rate:        f64,
    pub skills_mismatch:          f64,
    // Housing
    pub median_price:             f64,
    pub rent_burden:              f64,
    pub construction_permits:     u32,
    pub vacancy_rates:            f64,
    // Demographics
    pub population_growth:        f64,
    pub in_migration:             u32,
    pub out_migration:            u32,
    #[serde(default)]
    pub age_distribution:         BTreeMap<String, f64>,
    // Economics
    pub gdp_growth:               f64,
    pub productivity:             f64,
    pub industry_diversification: f64,
    pub startup_density:          f64,
    // Policy
    pub minimum_wage:             f64,
    pub right_to_work:            bool,
    pub remote_work_incentives:   bool,
    pub retraining_funding:       f64,
}

/// A region record with its MSA code, as supplied by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub msa_code: RegionId,
    #[serde(flatten)]
    pub attrs:    RegionAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// The MSA code.
    pub id:    RegionId,
    pub attrs: RegionAttributes,
}

impl Region {
    pub fn new(id: RegionId, attrs: RegionAttributes) -> Self {
        Self { id, attrs }
    }

    pub fn projection(&self) -> RegionProjection {
        RegionProjection {
            agent_id:          self.id.clone(),
            unemployment_rate: self.attrs.unemployment_rate,
            wage_growth:       self.attrs.wage_growth,
            vacancy_rates:     self.attrs.vacancy_rates,
        }
    }
}

/// Resident snapshot for one region.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResidentStats {
    pub residents:           usize,
    pub employed:            usize,
    pub avg_wage_percentile: f64,
}

/// Scan every individual currently located in `region_id`.
pub fn resident_stats(world: &World, region_id: &str, default_wage_percentile: f64) -> ResidentStats {
    let mut stats = ResidentStats::default();
    let mut wage_sum = 0.0;
    for person in world
        .registry
        .individuals()
        .filter(|p| p.attrs.current_msa == region_id)
    {
        stats.residents += 1;
        if person.is_employed() {
            stats.employed += 1;
        }
        wage_sum += person.attrs.wage_percentile.unwrap_or(default_wage_percentile);
    }
    if stats.residents > 0 {
        stats.avg_wage_percentile = wage_sum / stats.residents as f64;
    }
    stats
}

pub struct RegionBehavior {
    params: RegionParams,
}

impl RegionBehavior {
    pub fn new(params: RegionParams) -> Self {
        Self { params }
    }

    /// Apply one step of indicator updates given a resident snapshot.
    pub fn apply(&self, attrs: &mut RegionAttributes, stats: ResidentStats) {
        let p = &self.params;
        if stats.residents > 0 {
            attrs.unemployment_rate = 1.0 - stats.employed as f64 / stats.residents as f64;
            attrs.wage_growth = p.wage_smoothing * attrs.wage_growth
                + (1.0 - p.wage_smoothing) * (stats.avg_wage_percentile - p.wage_baseline);
        }
        attrs.vacancy_rates = (attrs.vacancy_rates
            + attrs.construction_permits as f64 / p.permit_scale
            - p.vacancy_drift)
            .clamp(p.vacancy_rate_min, p.vacancy_rate_max);
    }
}

impl AgentBehavior for RegionBehavior {
    fn name(&self) -> &'static str {
        "region"
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Region
    }

    fn step(
        &mut self,
        step: Step,
        agent_id: &str,
        world: &mut World,
        _rng: &mut dyn SimRandom,
    ) -> SimResult<Vec<SimEvent>> {
        world.registry.require(agent_id, AgentKind::Region)?;

        let stats = resident_stats(world, agent_id, self.params.default_wage_percentile);

        let Some(region) = world.registry.region_mut(agent_id) else {
            return Ok(vec![]);
        };
        self.apply(&mut region.attrs, stats);

        Ok(vec![SimEvent::RegionUpdated {
            step,
            region_id: region.id.clone(),
            residents: stats.residents,
            unemployment_rate: region.attrs.unemployment_rate,
            wage_growth: region.attrs.wage_growth,
            vacancy_rates: region.attrs.vacancy_rates,
        }])
    }
}
