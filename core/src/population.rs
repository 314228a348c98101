//! World assembly from attribute records.
//!
//! The generator (or a JSON file) supplies attribute records; this module
//! assigns ids, registers every agent, and wires the employment and
//! location references. All problems found here are fatal.
//!
//! Registration order: regions, firms, individuals, governments.

use crate::{
    agent::{Agent, AgentKind},
    config::ModelConfig,
    error::{ConfigError, SimResult},
    firm_agent::{Firm, FirmAttributes},
    government_agent::{Government, GovernmentLevel},
    individual_agent::{Individual, IndividualAttributes},
    region_agent::{Region, RegionRecord},
    registry::AgentRegistry,
    types::AgentId,
    world::World,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationData {
    pub regions:     Vec<RegionRecord>,
    pub firms:       Vec<FirmAttributes>,
    pub individuals: Vec<IndividualAttributes>,
}

impl PopulationData {
    /// Load attribute records from a JSON file.
    pub fn load(path: &str) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(path, &content)
    }

    pub fn from_json(source_name: &str, json: &str) -> SimResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            ConfigError::MalformedPopulation {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

pub fn individual_id(index: usize) -> AgentId {
    format!("ind-{index:06}")
}

pub fn firm_id(index: usize) -> AgentId {
    format!("firm-{index:04}")
}

pub fn government_id(index: usize) -> AgentId {
    format!("gov-{index:02}")
}

/// Build the world for `config` from `data`.
///
/// Individuals are assigned to firms round-robin in firm order, so every
/// individual starts employed. Firm head counts are derived from the
/// resulting payrolls.
pub fn build_world(config: &ModelConfig, data: PopulationData) -> SimResult<World> {
    config.validate()?;
    check_len(AgentKind::Region, config.n_regions, data.regions.len())?;
    check_len(AgentKind::Firm, config.n_firms, data.firms.len())?;
    check_len(AgentKind::Individual, config.n_individuals, data.individuals.len())?;

    let mut registry = AgentRegistry::new();

    for record in data.regions {
        registry.register(Agent::Region(Region::new(record.msa_code, record.attrs)))?;
    }

    let mut firms: Vec<Firm> = Vec::with_capacity(data.firms.len());
    for (i, attrs) in data.firms.into_iter().enumerate() {
        let id = firm_id(i + 1);
        require_region(&registry, &id, &attrs.msa)?;
        firms.push(Firm::new(id, attrs));
    }

    let n_firms = firms.len();
    let mut individuals: Vec<Individual> = Vec::with_capacity(data.individuals.len());
    for (i, attrs) in data.individuals.into_iter().enumerate() {
        let id = individual_id(i + 1);
        require_region(&registry, &id, &attrs.current_msa)?;
        let mut person = Individual::new(id, attrs);
        let employer = &mut firms[i % n_firms];
        employer.add_employee(&person.id);
        person.employer_id = Some(employer.id.clone());
        individuals.push(person);
    }

    for firm in firms {
        registry.register(Agent::Firm(firm))?;
    }
    for person in individuals {
        registry.register(Agent::Individual(person))?;
    }

    // The first government is federal, the rest are state level.
    for i in 0..config.n_governments {
        let level = if i == 0 {
            GovernmentLevel::Federal
        } else {
            GovernmentLevel::State
        };
        registry.register(Agent::Government(Government::new(government_id(i + 1), level)))?;
    }

    log::info!(
        "population: built {} regions, {} firms, {} individuals, {} governments",
        config.n_regions,
        config.n_firms,
        config.n_individuals,
        config.n_governments
    );

    Ok(World::new(registry))
}

fn check_len(kind: AgentKind, expected: usize, actual: usize) -> SimResult<()> {
    if expected != actual {
        return Err(ConfigError::PopulationMismatch { kind, expected, actual }.into());
    }
    Ok(())
}

fn require_region(registry: &AgentRegistry, agent_id: &str, region_id: &str) -> SimResult<()> {
    if registry.region(region_id).is_none() {
        return Err(ConfigError::UnknownRegion {
            agent_id: agent_id.to_string(),
            region_id: region_id.to_string(),
        }
        .into());
    }
    Ok(())
}
