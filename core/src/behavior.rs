//! Agent behavior trait.
//!
//! RULE: Every agent kind has exactly one registered behavior.
//! The engine calls step() once per scheduled agent, in the order the
//! scheduler produced for this step. Execution order is documented in
//! engine.rs.

use crate::{
    agent::AgentKind,
    error::SimResult,
    event::SimEvent,
    rng::SimRandom,
    types::Step,
    world::World,
};

/// The per-step transition contract every agent kind fulfills.
pub trait AgentBehavior: Send {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// The kind of agent this behavior drives.
    fn kind(&self) -> AgentKind;

    /// Advance one agent by one step.
    ///
    /// - `step`:     the current step number
    /// - `agent_id`: the agent being activated; always of `kind()`
    /// - `world`:    registry and job board, mutated as the pass goes
    /// - `rng`:      this kind's random stream for the step
    ///
    /// Returns the events this activation caused. An `Err` is isolated
    /// by the engine: it is logged and the pass continues.
    fn step(
        &mut self,
        step: Step,
        agent_id: &str,
        world: &mut World,
        rng: &mut dyn SimRandom,
    ) -> SimResult<Vec<SimEvent>>;
}
