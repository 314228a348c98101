//! Synthetic population generator.
//!
//! Produces attribute records only. Ids and employment links are assigned
//! later by `population::build_world`.
//!
//! All draws come from the Population stream at step 0, so a seed always
//! yields the same starting population.

use crate::{
    config::ModelConfig,
    firm_agent::{AiAdoptionStage, FirmAttributes},
    individual_agent::{Education, IndividualAttributes},
    population::PopulationData,
    region_agent::{RegionAttributes, RegionRecord},
    rng::{RngBank, RngSlot, SimRandom, SimRng},
    types::RegionId,
};
use std::collections::BTreeMap;

const INDUSTRIES: &[&str] = &["tech", "finance", "manufacturing", "retail", "healthcare"];
const SIZE_CATEGORIES: &[&str] = &["small", "medium", "large"];
const SIZE_WEIGHTS: &[f64] = &[0.6, 0.3, 0.1];
const REMOTE_POLICIES: &[&str] = &["none", "hybrid", "full"];
const STAGES: &[AiAdoptionStage] = &[
    AiAdoptionStage::NotAdopted,
    AiAdoptionStage::Early,
    AiAdoptionStage::Mature,
];
const FOOTPRINTS: &[&str] = &["local", "national", "global"];
const WAGE_STRUCTURES: &[&str] = &["below_market", "market_rate", "above_market"];

const EDUCATION: &[Education] = &[
    Education::HighSchool,
    Education::Bachelor,
    Education::Master,
    Education::Phd,
];
const EDUCATION_WEIGHTS: &[f64] = &[0.3, 0.5, 0.15, 0.05];
const ETHNICITIES: &[&str] = &["white", "black", "hispanic", "asian", "other"];
const ETHNICITY_WEIGHTS: &[f64] = &[0.6, 0.13, 0.18, 0.06, 0.03];
const MARITAL: &[&str] = &["single", "married"];
const NAICS: &[&str] = &["54", "62", "44-45", "72", "31-33"];
const CLIMATES: &[&str] = &["warm", "moderate", "cold"];
const SETTINGS: &[&str] = &["urban", "suburban", "rural"];

pub struct PopulationGenerator {
    rng: SimRng,
}

impl PopulationGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RngBank::new(seed).stream(RngSlot::Population, 0),
        }
    }

    /// Regions first, since firms and individuals are placed in them.
    pub fn generate(&mut self, config: &ModelConfig) -> PopulationData {
        let regions = self.regions(config.n_regions);
        let region_ids: Vec<RegionId> = regions.iter().map(|r| r.msa_code.clone()).collect();
        let firms = self.firms(config.n_firms, &region_ids);
        let individuals = self.individuals(config.n_individuals, &region_ids);
        PopulationData {
            regions,
            firms,
            individuals,
        }
    }

    pub fn regions(&mut self, n: usize) -> Vec<RegionRecord> {
        (0..n).map(|i| self.region(i + 1)).collect()
    }

    pub fn firms(&mut self, n: usize, region_ids: &[RegionId]) -> Vec<FirmAttributes> {
        (0..n).map(|_| self.firm(region_ids)).collect()
    }

    pub fn individuals(&mut self, n: usize, region_ids: &[RegionId]) -> Vec<IndividualAttributes> {
        (0..n).map(|_| self.individual(region_ids)).collect()
    }

    fn region(&mut self, index: usize) -> RegionRecord {
        let r = &mut self.rng;
        let age_distribution = BTreeMap::from([
            ("18-34".to_string(), 0.3),
            ("35-54".to_string(), 0.4),
            ("55+".to_string(), 0.3),
        ]);
        RegionRecord {
            msa_code: format!("MSA{index}"),
            attrs:    RegionAttributes {
                unemployment_rate:        r.uniform(0.02, 0.1),
                wage_growth:              r.uniform(0.01, 0.05),
                job_openings_rate:        r.uniform(0.02, 0.08),
                skills_mismatch:          r.uniform(0.1, 0.5),
                median_price:             r.log_normal(12.5, 0.4),
                rent_burden:              r.uniform(0.2, 0.5),
                construction_permits:     r.range_u32(100, 10_000),
                vacancy_rates:            r.uniform(0.01, 0.15),
                population_growth:        r.uniform(-0.01, 0.03),
                in_migration:             r.range_u32(500, 50_000),
                out_migration:            r.range_u32(500, 50_000),
                age_distribution,
                gdp_growth:               r.uniform(-0.02, 0.06),
                productivity:             r.uniform(0.8, 1.5),
                industry_diversification: r.uniform(0.3, 0.9),
                startup_density:          r.uniform(0.001, 0.05),
                minimum_wage:             r.uniform(7.25, 20.0),
                right_to_work:            r.chance(0.5),
                remote_work_incentives:   r.chance(0.5),
                retraining_funding:       r.log_normal(13.0, 1.5),
            },
        }
    }

    fn firm(&mut self, region_ids: &[RegionId]) -> FirmAttributes {
        let r = &mut self.rng;
        FirmAttributes {
            industry:              r.choice(INDUSTRIES).to_string(),
            size_category:         r.weighted_choice(SIZE_CATEGORIES, SIZE_WEIGHTS).to_string(),
            age:                   r.range_u32(1, 50),
            remote_work_policy:    r.choice(REMOTE_POLICIES).to_string(),
            ai_adoption_stage:     *r.choice(STAGES),
            revenue_growth:        r.uniform(-0.05, 0.15),
            labor_intensity:       r.uniform(0.2, 0.8),
            geographic_footprint:  r.choice(FOOTPRINTS).to_string(),
            automation_investment: r.log_normal(12.0, 2.0),
            layoff_history:        r.chance(0.5),
            hiring_projections:    r.uniform(-0.1, 0.1),
            wage_structure:        r.choice(WAGE_STRUCTURES).to_string(),
            msa:                   r.choice(region_ids).clone(),
        }
    }

    fn individual(&mut self, region_ids: &[RegionId]) -> IndividualAttributes {
        let r = &mut self.rng;
        IndividualAttributes {
            age:                            r.range_u32(18, 65),
            education:                      *r.weighted_choice(EDUCATION, EDUCATION_WEIGHTS),
            race_ethnicity:                 r.weighted_choice(ETHNICITIES, ETHNICITY_WEIGHTS).to_string(),
            marital_status:                 r.choice(MARITAL).to_string(),
            household_size:                 r.range_u32(1, 5),
            homeownership:                  r.chance(0.5),
            soc_code:                       format!("15-{}", r.range_u32(1000, 2000)),
            industry_naics:                 r.choice(NAICS).to_string(),
            ai_exposure_index:              r.uniform(0.0, 1.0),
            wage_percentile:                Some(r.uniform(0.1, 0.99)),
            tenure:                         r.uniform(0.0, 20.0),
            current_msa:                    r.choice(region_ids).clone(),
            commute_distance:               r.uniform(5.0, 60.0),
            housing_costs:                  r.uniform(800.0, 5000.0),
            local_network_strength:         r.uniform(0.1, 1.0),
            liquid_savings:                 r.log_normal(9.0, 1.5),
            debt_levels:                    r.log_normal(10.0, 1.2),
            equity_holdings:                r.log_normal(8.0, 2.0),
            unemployment_benefits_eligible: r.chance(0.5),
            climate_preference:             r.choice(CLIMATES).to_string(),
            urban_rural_preference:         r.choice(SETTINGS).to_string(),
            family_proximity_weight:        r.uniform(0.0, 1.0),
        }
    }
}
