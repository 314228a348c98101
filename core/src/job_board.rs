//! The job board — the step-scoped vacancy exchange.
//!
//! RULE: The engine clears the board before any agent runs in a step.
//! Firms post, individuals find and remove, all within the same pass.
//! Nothing survives a step boundary.

use crate::types::{AgentId, RegionId};
use serde::{Deserialize, Serialize};

/// An open position. Immutable; equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vacancy {
    pub firm_id:  AgentId,
    pub soc_code: String,
    pub msa:      RegionId,
}

impl Vacancy {
    pub fn new(
        firm_id: impl Into<AgentId>,
        soc_code: impl Into<String>,
        msa: impl Into<RegionId>,
    ) -> Self {
        Self {
            firm_id:  firm_id.into(),
            soc_code: soc_code.into(),
            msa:      msa.into(),
        }
    }
}

/// Ordered multiset of open vacancies.
#[derive(Debug, Default, Clone)]
pub struct JobBoard {
    vacancies: Vec<Vacancy>,
}

impl JobBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vacancies.clear();
    }

    /// Append. No dedup, no capacity limit.
    pub fn post(&mut self, vacancy: Vacancy) {
        self.vacancies.push(vacancy);
    }

    /// All vacancies matching `predicate`, in posting order.
    pub fn find<P>(&self, mut predicate: P) -> Vec<Vacancy>
    where
        P: FnMut(&Vacancy) -> bool,
    {
        self.vacancies
            .iter()
            .filter(|v| predicate(v))
            .cloned()
            .collect()
    }

    /// Remove the first structurally-equal entry.
    /// Returns false (and changes nothing) if it is already gone.
    pub fn remove(&mut self, vacancy: &Vacancy) -> bool {
        match self.vacancies.iter().position(|v| v == vacancy) {
            Some(pos) => {
                self.vacancies.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn vacancies(&self) -> &[Vacancy] {
        &self.vacancies
    }

    pub fn len(&self) -> usize {
        self.vacancies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vacancies.is_empty()
    }
}
