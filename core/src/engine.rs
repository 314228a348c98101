//! The simulation engine — one random-activation pass per step.
//!
//! STEP ORDER (fixed):
//!   1. Advance the clock and clear the job board.
//!   2. Draw this step's activation order from the Scheduler stream.
//!   3. Activate every scheduled agent exactly once, in that order,
//!      through the behavior registered for its kind.
//!   4. Persist the step's events, then collect and persist the summary.
//!
//! RULES:
//!   - Agents see the world as mutated by everything activated before
//!     them in the same pass. Nothing is double-buffered.
//!   - One agent's failure never aborts the pass.
//!   - All randomness flows through the RngBank.
//!   - All state changes are recorded in the event log.

use crate::{
    agent::AgentKind,
    behavior::AgentBehavior,
    clock::SimClock,
    collector::{DataCollector, ModelSample},
    config::SimConfig,
    error::{SimError, SimResult},
    event::{EventLogEntry, SimEvent},
    firm_agent::FirmBehavior,
    generator::PopulationGenerator,
    government_agent::GovernmentBehavior,
    individual_agent::IndividualBehavior,
    job_board::JobBoard,
    population::{build_world, PopulationData},
    region_agent::RegionBehavior,
    rng::{RngBank, RngSlot, SimRng},
    scheduler::Scheduler,
    store::SimStore,
    types::{RunId, Step},
    world::World,
};

pub struct SimEngine {
    pub run_id:   RunId,
    pub clock:    SimClock,
    pub rng_bank: RngBank,
    seed:         u64,
    world:        World,
    scheduler:    Scheduler,
    behaviors:    Vec<(AgentKind, Box<dyn AgentBehavior>)>,
    store:        SimStore,
    collector:    DataCollector,
}

impl SimEngine {
    /// Assemble the world from `data` and register the default behavior
    /// for every agent kind.
    pub fn new(
        run_id: RunId,
        seed: u64,
        config: &SimConfig,
        data: PopulationData,
        store: SimStore,
    ) -> SimResult<Self> {
        config.validate()?;
        let world = build_world(&config.model, data)?;
        let scheduler = Scheduler::from_registry(&world.registry);

        let mut engine = Self {
            clock: SimClock::new(run_id.clone()),
            rng_bank: RngBank::new(seed),
            seed,
            world,
            scheduler,
            behaviors: Vec::new(),
            store,
            collector: DataCollector::new(),
            run_id,
        };

        let b = &config.behavior;
        engine.register_behavior(Box::new(IndividualBehavior::new(b.individual.clone())));
        engine.register_behavior(Box::new(FirmBehavior::new(b.firm.clone())));
        engine.register_behavior(Box::new(RegionBehavior::new(b.region.clone())));
        engine.register_behavior(Box::new(GovernmentBehavior));

        log::info!(
            "engine: run {} seeded with {seed}, {} agents scheduled",
            engine.run_id,
            engine.scheduler.len()
        );
        Ok(engine)
    }

    /// Build with a synthetic population drawn from the seed.
    pub fn build(run_id: RunId, seed: u64, config: &SimConfig, store: SimStore) -> SimResult<Self> {
        let data = PopulationGenerator::new(seed).generate(&config.model);
        Self::new(run_id, seed, config, data, store)
    }

    /// In-memory store, default test config. For tests only.
    pub fn build_test(run_id: &str, seed: u64) -> SimResult<Self> {
        let store = SimStore::in_memory()?;
        store.migrate()?;
        store.insert_run(run_id, seed, "test", "1970-01-01T00:00:00Z")?;
        Self::build(run_id.to_string(), seed, &SimConfig::default_test(), store)
    }

    /// Register the behavior for `behavior.kind()`, replacing any earlier one.
    pub fn register_behavior(&mut self, behavior: Box<dyn AgentBehavior>) {
        let kind = behavior.kind();
        match self.behaviors.iter_mut().find(|(k, _)| *k == kind) {
            Some(slot) => slot.1 = behavior,
            None => self.behaviors.push((kind, behavior)),
        }
    }

    /// Advance one step. Returns every event emitted during it.
    pub fn step(&mut self) -> SimResult<Vec<SimEvent>> {
        let step = self.clock.advance();
        self.world.job_board.clear();

        let mut step_events = vec![SimEvent::StepStarted { step }];

        let order = self
            .scheduler
            .activation_order(&mut self.rng_bank.stream(RngSlot::Scheduler, step));
        let mut streams = KindStreams::for_step(&self.rng_bank, step);

        for activation in &order {
            let result = match self.behaviors.iter_mut().find(|(k, _)| *k == activation.kind) {
                Some((_, behavior)) => behavior.step(
                    step,
                    &activation.agent_id,
                    &mut self.world,
                    streams.get(activation.kind),
                ),
                None => Err(SimError::BehaviorNotRegistered {
                    kind: activation.kind,
                }),
            };
            match result {
                Ok(events) => step_events.extend(events),
                Err(e) => {
                    log::warn!("step={step} engine: {} failed: {e}", activation.agent_id);
                    step_events.push(SimEvent::AgentStepFailed {
                        step,
                        agent_id: activation.agent_id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        step_events.push(SimEvent::StepCompleted {
            step,
            activations: order.len(),
            open_vacancies: self.world.job_board.len(),
        });

        self.persist(step, &step_events)?;
        let sample = self.collector.collect(step, &self.world);
        self.store.insert_step_summary(&self.run_id, &sample)?;

        log::debug!(
            "step={step} engine: {} events, employed={}, unemployed={}, open_vacancies={}",
            step_events.len(),
            sample.employed,
            sample.unemployed,
            sample.open_vacancies
        );

        Ok(step_events)
    }

    /// Run n steps in a loop.
    pub fn run_steps(&mut self, n: u64) -> SimResult<()> {
        // Emit RunInitialized at step 0 so seed differences are observable.
        if self.clock.current_step == 0 {
            let init_event = SimEvent::RunInitialized {
                run_id: self.run_id.clone(),
                seed:   self.seed,
                agents: self.scheduler.len(),
            };
            let entry = self.log_entry(0, &init_event)?;
            self.store.append_event(&entry)?;
        }
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    pub fn current_step(&self) -> Step {
        self.clock.current_step
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Vacancies posted and not yet filled during the last step.
    pub fn job_board(&self) -> &JobBoard {
        &self.world.job_board
    }

    pub fn collector(&self) -> &DataCollector {
        &self.collector
    }

    pub fn employed_count(&self) -> usize {
        self.world.employed_count()
    }

    pub fn resolution_misses(&self) -> u64 {
        self.world.resolution_misses()
    }

    /// The current model-level sample, computed on demand.
    pub fn sample(&self) -> ModelSample {
        ModelSample::of(self.clock.current_step, &self.world)
    }

    /// Query events for a specific step from the store.
    /// Used by the determinism tests and export tooling.
    pub fn store_events_for_step(&self, run_id: &str, step: Step) -> SimResult<Vec<EventLogEntry>> {
        self.store.events_for_step(run_id, step)
    }

    pub fn store_event_count(&self, event_type: &str) -> SimResult<u64> {
        self.store.event_count(&self.run_id, event_type)
    }

    pub fn store_step_summaries(&self) -> SimResult<Vec<ModelSample>> {
        self.store.step_summaries(&self.run_id)
    }

    fn persist(&mut self, step: Step, events: &[SimEvent]) -> SimResult<()> {
        let entries = events
            .iter()
            .map(|event| self.log_entry(step, event))
            .collect::<SimResult<Vec<_>>>()?;
        self.store.append_events(&entries)
    }

    fn log_entry(&self, step: Step, event: &SimEvent) -> SimResult<EventLogEntry> {
        Ok(EventLogEntry {
            id:         None,
            run_id:     self.run_id.clone(),
            step,
            agent_id:   event.agent_id().cloned(),
            event_type: event.type_name().to_string(),
            payload:    serde_json::to_string(event)?,
        })
    }
}

/// One stream per agent kind for a single step.
struct KindStreams {
    individual: SimRng,
    firm:       SimRng,
    region:     SimRng,
    government: SimRng,
}

impl KindStreams {
    fn for_step(bank: &RngBank, step: Step) -> Self {
        Self {
            individual: bank.stream(RngSlot::Individual, step),
            firm:       bank.stream(RngSlot::Firm, step),
            region:     bank.stream(RngSlot::Region, step),
            government: bank.stream(RngSlot::Government, step),
        }
    }

    fn get(&mut self, kind: AgentKind) -> &mut SimRng {
        match kind {
            AgentKind::Individual => &mut self.individual,
            AgentKind::Firm => &mut self.firm,
            AgentKind::Region => &mut self.region,
            AgentKind::Government => &mut self.government,
        }
    }
}
