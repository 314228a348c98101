//! Shared primitive types used across the entire simulation.

/// A simulation step. One step = one full random-activation pass.
pub type Step = u64;

/// A stable, unique identifier for any agent in the simulation.
/// Individuals, firms, regions and governments share one namespace.
pub type AgentId = String;

/// A region identifier (an MSA code). Regions are agents, so this is
/// always a valid `AgentId` as well.
pub type RegionId = AgentId;

/// The canonical run identifier.
pub type RunId = String;
