use labormarket_core::{
    agent::Agent,
    behavior::AgentBehavior,
    config::IndividualParams,
    event::SimEvent,
    firm_agent::{AiAdoptionStage, Firm},
    generator::PopulationGenerator,
    individual_agent::{Individual, IndividualBehavior},
    job_board::Vacancy,
    region_agent::Region,
    registry::AgentRegistry,
    rng::ScriptedRng,
    world::World,
};

/// Regions M1, M2, M3; firm-9 in M1, firm-8 in M2; ind-1 in M1 with
/// SOC 15-1200, unemployed.
fn make_world() -> World {
    let mut generator = PopulationGenerator::new(5);
    let mut registry = AgentRegistry::new();

    for (id, unemployment, price) in [("M1", 0.1, 300_000.0), ("M2", 0.02, 200_000.0), ("M3", 0.3, 900_000.0)] {
        let mut attrs = generator.regions(1).remove(0).attrs;
        attrs.unemployment_rate = unemployment;
        attrs.median_price = price;
        registry.register(Agent::Region(Region::new(id.into(), attrs))).unwrap();
    }

    let region_ids = vec!["M1".to_string()];
    for (id, msa) in [("firm-9", "M1"), ("firm-8", "M2")] {
        let mut attrs = generator.firms(1, &region_ids).remove(0);
        attrs.msa = msa.into();
        attrs.ai_adoption_stage = AiAdoptionStage::NotAdopted;
        registry.register(Agent::Firm(Firm::new(id.into(), attrs))).unwrap();
    }

    let mut attrs = generator.individuals(1, &region_ids).remove(0);
    attrs.soc_code = "15-1200".into();
    attrs.current_msa = "M1".into();
    registry.register(Agent::Individual(Individual::new("ind-1".into(), attrs))).unwrap();

    World::new(registry)
}

fn behavior() -> IndividualBehavior {
    IndividualBehavior::new(IndividualParams::default())
}

fn me(world: &World) -> &Individual {
    world.registry.individual("ind-1").unwrap()
}

#[test]
fn home_region_vacancy_wins_over_remote_one() {
    let mut world = make_world();
    world.job_board.post(Vacancy::new("firm-9", "15-1200", "M1"));
    world.job_board.post(Vacancy::new("firm-8", "15-1200", "M2"));

    let event = behavior()
        .search_for_job(1, "ind-1", &mut world, &mut ScriptedRng::default())
        .unwrap();

    match event {
        Some(SimEvent::Hired { firm_id, msa, relaxed_search, .. }) => {
            assert_eq!(firm_id, "firm-9");
            assert_eq!(msa, "M1");
            assert!(!relaxed_search);
        }
        other => panic!("expected a hire, got {other:?}"),
    }

    assert!(me(&world).is_employed());
    assert_eq!(me(&world).employer_id.as_deref(), Some("firm-9"));
    let firm = world.registry.firm("firm-9").unwrap();
    assert_eq!(firm.employees, vec!["ind-1".to_string()]);
    assert_eq!(firm.total_workers, 1);

    assert_eq!(world.job_board.vacancies(), &[Vacancy::new("firm-8", "15-1200", "M2")]);
}

#[test]
fn search_widens_to_other_regions_when_home_has_nothing() {
    let mut world = make_world();
    world.job_board.post(Vacancy::new("firm-8", "15-1200", "M2"));

    let event = behavior()
        .search_for_job(1, "ind-1", &mut world, &mut ScriptedRng::default())
        .unwrap();

    assert!(matches!(
        event,
        Some(SimEvent::Hired { ref firm_id, relaxed_search: true, .. }) if firm_id == "firm-8"
    ));
    // Hiring does not relocate the worker.
    assert_eq!(me(&world).attrs.current_msa, "M1");
    assert!(world.job_board.is_empty());
}

#[test]
fn other_occupations_are_ignored() {
    let mut world = make_world();
    world.job_board.post(Vacancy::new("firm-9", "15-1201", "M1"));

    let event = behavior()
        .search_for_job(1, "ind-1", &mut world, &mut ScriptedRng::default())
        .unwrap();

    assert!(event.is_none());
    assert!(!me(&world).is_employed());
    assert_eq!(world.job_board.len(), 1);
}

#[test]
fn vacancy_from_unknown_firm_is_a_silent_miss() {
    let mut world = make_world();
    world.job_board.post(Vacancy::new("firm-404", "15-1200", "M1"));

    let event = behavior()
        .search_for_job(1, "ind-1", &mut world, &mut ScriptedRng::default())
        .unwrap();

    assert!(matches!(event, Some(SimEvent::ResolutionMissed { .. })));
    assert_eq!(world.resolution_misses(), 1);
    assert!(!me(&world).is_employed());
}

#[test]
fn moves_to_strictly_better_region() {
    let mut world = make_world();
    world.registry.individual_mut("ind-1").unwrap().employer_id = Some("firm-9".into());

    // 0.01 < 0.02 triggers the evaluation; integer draws default to 0.
    let mut rng = ScriptedRng::new([0.01]);
    let events = behavior().step(1, "ind-1", &mut world, &mut rng).unwrap();

    assert_eq!(events.len(), 1);
    let person = me(&world);
    assert_eq!(person.attrs.current_msa, "M2");
    assert!((person.attrs.housing_costs - 200_000.0 / 12.0).abs() < 1e-9);
    // Employment is untouched by moving.
    assert_eq!(person.employer_id.as_deref(), Some("firm-9"));
}

#[test]
fn migration_draw_at_threshold_does_not_fire() {
    let mut world = make_world();
    world.registry.individual_mut("ind-1").unwrap().employer_id = Some("firm-9".into());
    let before = me(&world).attrs.housing_costs;

    let mut rng = ScriptedRng::new([0.02]);
    let events = behavior().step(1, "ind-1", &mut world, &mut rng).unwrap();

    assert!(events.is_empty());
    assert_eq!(me(&world).attrs.current_msa, "M1");
    assert_eq!(me(&world).attrs.housing_costs, before);
}

#[test]
fn ties_and_worse_candidates_keep_current_region() {
    let mut world = make_world();
    {
        let m2 = world.registry.region_mut("M2").unwrap();
        m2.attrs.unemployment_rate = 0.1;
        m2.attrs.median_price = 300_000.0;
    }

    // Sample both others: swap 0<->0, then pick index 1.
    let mut rng = ScriptedRng::default().with_integers([0, 0]);
    let event = behavior()
        .decide_migration(1, "ind-1", &mut world, &mut rng)
        .unwrap();

    assert!(event.is_none());
    assert_eq!(me(&world).attrs.current_msa, "M1");
}

#[test]
fn unemployed_worker_still_draws_migration_after_failed_search() {
    let mut world = make_world();

    let mut rng = ScriptedRng::new([0.01]);
    let events = behavior().step(1, "ind-1", &mut world, &mut rng).unwrap();

    assert!(matches!(events.as_slice(), [SimEvent::Migrated { .. }]));
    assert_eq!(rng.remaining_floats(), 0);
    assert!(!me(&world).is_employed());
}
