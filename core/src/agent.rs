//! The closed set of agent kinds.
//!
//! Every agent is one variant of `Agent`. Behavior is looked up by
//! `AgentKind` (see behavior.rs); data access goes through the typed
//! accessors here or on the registry, never through field probing.

use crate::{
    firm_agent::Firm,
    government_agent::Government,
    individual_agent::Individual,
    region_agent::Region,
    types::AgentId,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Individual,
    Firm,
    Region,
    Government,
}

impl AgentKind {
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Individual,
        AgentKind::Firm,
        AgentKind::Region,
        AgentKind::Government,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Firm => "firm",
            Self::Region => "region",
            Self::Government => "government",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Agent {
    Individual(Individual),
    Firm(Firm),
    Region(Region),
    Government(Government),
}

impl Agent {
    pub fn id(&self) -> &AgentId {
        match self {
            Self::Individual(a) => &a.id,
            Self::Firm(a) => &a.id,
            Self::Region(a) => &a.id,
            Self::Government(a) => &a.id,
        }
    }

    pub fn kind(&self) -> AgentKind {
        match self {
            Self::Individual(_) => AgentKind::Individual,
            Self::Firm(_) => AgentKind::Firm,
            Self::Region(_) => AgentKind::Region,
            Self::Government(_) => AgentKind::Government,
        }
    }

    /// The collector-facing view of this agent.
    pub fn projection(&self) -> AgentProjection {
        match self {
            Self::Individual(a) => AgentProjection::Individual(a.projection()),
            Self::Firm(a) => AgentProjection::Firm(a.projection()),
            Self::Region(a) => AgentProjection::Region(a.projection()),
            Self::Government(a) => AgentProjection::Government(a.projection()),
        }
    }

    pub fn as_individual(&self) -> Option<&Individual> {
        match self {
            Self::Individual(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_individual_mut(&mut self) -> Option<&mut Individual> {
        match self {
            Self::Individual(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_firm(&self) -> Option<&Firm> {
        match self {
            Self::Firm(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_firm_mut(&mut self) -> Option<&mut Firm> {
        match self {
            Self::Firm(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_region(&self) -> Option<&Region> {
        match self {
            Self::Region(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_region_mut(&mut self) -> Option<&mut Region> {
        match self {
            Self::Region(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_government(&self) -> Option<&Government> {
        match self {
            Self::Government(a) => Some(a),
            _ => None,
        }
    }
}

// ── Collector projections ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualProjection {
    pub agent_id:    AgentId,
    pub age:         u32,
    pub education:   crate::individual_agent::Education,
    pub current_msa: String,
    pub is_employed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmProjection {
    pub agent_id:          AgentId,
    pub msa:               String,
    pub total_workers:     usize,
    pub ai_adoption_stage: crate::firm_agent::AiAdoptionStage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProjection {
    pub agent_id:          AgentId,
    pub unemployment_rate: f64,
    pub wage_growth:       f64,
    pub vacancy_rates:     f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernmentProjection {
    pub agent_id: AgentId,
    pub level:    crate::government_agent::GovernmentLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentProjection {
    Individual(IndividualProjection),
    Firm(FirmProjection),
    Region(RegionProjection),
    Government(GovernmentProjection),
}
