//! Run configuration: population sizes and every behavioral constant.
//!
//! All rule constants live here so a JSON config can override any of
//! them. Omitted fields fall back to the documented defaults.

use crate::{
    error::{ConfigError, SimResult},
    firm_agent::AiAdoptionStage,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub n_individuals: usize,
    pub n_firms:       usize,
    pub n_regions:     usize,
    pub n_governments: usize,
}

impl ModelConfig {
    /// Every count must be positive.
    pub fn validate(&self) -> SimResult<()> {
        for (field, value) in [
            ("n_individuals", self.n_individuals),
            ("n_firms", self.n_firms),
            ("n_regions", self.n_regions),
            ("n_governments", self.n_governments),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositiveCount { field, value }.into());
            }
        }
        Ok(())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_individuals: 50,
            n_firms:       10,
            n_regions:     5,
            n_governments: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndividualParams {
    /// Chance per step that an individual evaluates moving.
    pub migration_probability: f64,
    /// Other regions sampled per migration evaluation.
    pub migration_sample_size: usize,
    /// Divisor turning median house price into score units.
    pub price_scale: f64,
    /// Divisor turning median house price into monthly housing cost.
    pub housing_cost_months: f64,
}

impl Default for IndividualParams {
    fn default() -> Self {
        Self {
            migration_probability: 0.02,
            migration_sample_size: 5,
            price_scale:           1_000_000.0,
            housing_cost_months:   12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirmParams {
    pub layoff_probability_none:   f64,
    pub layoff_probability_early:  f64,
    pub layoff_probability_mature: f64,
    pub vacancy_probability:       f64,
    pub soc_prefix:                String,
    /// Inclusive range of the numeric SOC suffix for posted vacancies.
    pub soc_min:                   u64,
    pub soc_max:                   u64,
}

impl FirmParams {
    pub fn layoff_probability(&self, stage: AiAdoptionStage) -> f64 {
        match stage {
            AiAdoptionStage::NotAdopted   => self.layoff_probability_none,
            AiAdoptionStage::Early        => self.layoff_probability_early,
            AiAdoptionStage::Mature       => self.layoff_probability_mature,
            AiAdoptionStage::Unrecognized => 0.0,
        }
    }
}

impl Default for FirmParams {
    fn default() -> Self {
        Self {
            layoff_probability_none:   0.001,
            layoff_probability_early:  0.01,
            layoff_probability_mature: 0.05,
            vacancy_probability:       0.05,
            soc_prefix:                "15-".into(),
            soc_min:                   1000,
            soc_max:                   1999,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionParams {
    /// Weight kept from last step's wage growth.
    pub wage_smoothing:          f64,
    /// Stand-in for residents with no recorded wage percentile.
    pub default_wage_percentile: f64,
    /// Average percentile at which wage growth is pulled toward zero.
    pub wage_baseline:           f64,
    pub permit_scale:            f64,
    pub vacancy_drift:           f64,
    pub vacancy_rate_min:        f64,
    pub vacancy_rate_max:        f64,
}

impl Default for RegionParams {
    fn default() -> Self {
        Self {
            wage_smoothing:          0.8,
            default_wage_percentile: 0.5,
            wage_baseline:           0.5,
            permit_scale:            10_000.0,
            vacancy_drift:           0.05,
            vacancy_rate_min:        0.01,
            vacancy_rate_max:        0.2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub individual: IndividualParams,
    pub firm:       FirmParams,
    pub region:     RegionParams,
}

impl BehaviorConfig {
    pub fn validate(&self) -> SimResult<()> {
        let probabilities = [
            ("individual.migration_probability", self.individual.migration_probability),
            ("firm.layoff_probability_none", self.firm.layoff_probability_none),
            ("firm.layoff_probability_early", self.firm.layoff_probability_early),
            ("firm.layoff_probability_mature", self.firm.layoff_probability_mature),
            ("firm.vacancy_probability", self.firm.vacancy_probability),
            ("region.wage_smoothing", self.region.wage_smoothing),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(name, format!("{p} is outside [0, 1]")));
            }
        }
        if self.firm.soc_min > self.firm.soc_max {
            return Err(invalid(
                "firm.soc_min",
                format!("{} exceeds soc_max {}", self.firm.soc_min, self.firm.soc_max),
            ));
        }
        if self.region.vacancy_rate_min > self.region.vacancy_rate_max {
            return Err(invalid(
                "region.vacancy_rate_min",
                "exceeds vacancy_rate_max".into(),
            ));
        }
        if self.individual.price_scale <= 0.0 || self.individual.housing_cost_months <= 0.0 {
            return Err(invalid(
                "individual.price_scale",
                "price scale and housing months must be positive".into(),
            ));
        }
        if self.region.permit_scale <= 0.0 {
            return Err(invalid("region.permit_scale", "must be positive".into()));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: String) -> crate::error::SimError {
    ConfigError::InvalidParameter { name, reason }.into()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub model:    ModelConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

impl SimConfig {
    /// Load from a JSON file.
    /// In tests, use SimConfig::default_test().
    pub fn load(path: &str) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SimConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        self.model.validate()?;
        self.behavior.validate()
    }

    /// 50 individuals, 10 firms, 5 regions, 2 governments, default rules.
    pub fn default_test() -> Self {
        Self::default()
    }

    pub fn with_model(model: ModelConfig) -> Self {
        Self {
            model,
            behavior: BehaviorConfig::default(),
        }
    }
}
