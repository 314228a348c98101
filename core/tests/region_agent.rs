use labormarket_core::{
    agent::Agent,
    behavior::AgentBehavior,
    config::RegionParams,
    event::SimEvent,
    generator::PopulationGenerator,
    individual_agent::Individual,
    region_agent::{resident_stats, Region, RegionBehavior},
    registry::AgentRegistry,
    rng::ScriptedRng,
    world::World,
};

const EPS: f64 = 1e-9;

/// MSA1 and MSA2. Each entry of `residents` is (msa, employed, wage percentile).
fn make_world(residents: &[(&str, bool, Option<f64>)]) -> World {
    let mut generator = PopulationGenerator::new(17);
    let mut registry = AgentRegistry::new();

    for record in generator.regions(2) {
        let mut attrs = record.attrs;
        attrs.unemployment_rate = 0.07;
        attrs.wage_growth = 0.02;
        attrs.vacancy_rates = 0.1;
        attrs.construction_permits = 1000;
        registry
            .register(Agent::Region(Region::new(record.msa_code, attrs)))
            .unwrap();
    }

    let region_ids = vec!["MSA1".to_string()];
    for (i, (msa, employed, wage)) in residents.iter().enumerate() {
        let mut attrs = generator.individuals(1, &region_ids).remove(0);
        attrs.current_msa = msa.to_string();
        attrs.wage_percentile = *wage;
        let mut person = Individual::new(format!("ind-{:06}", i + 1), attrs);
        if *employed {
            person.employer_id = Some("firm-0001".into());
        }
        registry.register(Agent::Individual(person)).unwrap();
    }

    World::new(registry)
}

fn behavior() -> RegionBehavior {
    RegionBehavior::new(RegionParams::default())
}

#[test]
fn indicators_follow_current_residents() {
    let mut world = make_world(&[
        ("MSA1", true, Some(0.7)),
        ("MSA1", false, None),
        ("MSA2", false, Some(0.1)),
    ]);

    let events = behavior()
        .step(1, "MSA1", &mut world, &mut ScriptedRng::default())
        .unwrap();

    let region = world.registry.region("MSA1").unwrap();
    assert!((region.attrs.unemployment_rate - 0.5).abs() < EPS);
    // Average percentile 0.6 (missing counts as 0.5): 0.8 * 0.02 + 0.2 * 0.1
    assert!((region.attrs.wage_growth - 0.036).abs() < EPS);
    // 0.1 + 1000 / 10000 - 0.05
    assert!((region.attrs.vacancy_rates - 0.15).abs() < EPS);

    assert!(matches!(
        events.as_slice(),
        [SimEvent::RegionUpdated { residents: 2, .. }]
    ));
}

#[test]
fn empty_region_keeps_labor_indicators() {
    let mut world = make_world(&[("MSA1", true, Some(0.9))]);

    behavior()
        .step(1, "MSA2", &mut world, &mut ScriptedRng::default())
        .unwrap();

    let region = world.registry.region("MSA2").unwrap();
    assert_eq!(region.attrs.unemployment_rate, 0.07);
    assert_eq!(region.attrs.wage_growth, 0.02);
    assert!((region.attrs.vacancy_rates - 0.15).abs() < EPS);
}

#[test]
fn missing_percentile_fill_is_independent_of_wage_baseline() {
    let mut world = make_world(&[("MSA1", true, None), ("MSA1", true, None)]);
    let mut b = RegionBehavior::new(RegionParams {
        default_wage_percentile: 0.9,
        ..Default::default()
    });

    b.step(1, "MSA1", &mut world, &mut ScriptedRng::default()).unwrap();

    // Both residents count as 0.9; growth still pulls toward 0.5.
    // 0.8 * 0.02 + 0.2 * (0.9 - 0.5)
    let region = world.registry.region("MSA1").unwrap();
    assert!((region.attrs.wage_growth - 0.096).abs() < EPS);

    let mut attrs = region.attrs.clone();
    attrs.wage_growth = 0.02;
    let shifted = RegionBehavior::new(RegionParams {
        wage_baseline: 0.9,
        ..Default::default()
    });
    shifted.apply(&mut attrs, resident_stats(&world, "MSA1", 0.9));
    assert!((attrs.wage_growth - 0.016).abs() < EPS);
}

#[test]
fn vacancy_rate_is_clamped_at_both_ends() {
    let world = make_world(&[]);
    let b = behavior();

    let mut attrs = world.registry.region("MSA1").unwrap().attrs.clone();
    attrs.vacancy_rates = 0.19;
    attrs.construction_permits = 9000;
    b.apply(&mut attrs, Default::default());
    assert!((attrs.vacancy_rates - 0.2).abs() < EPS);

    attrs.vacancy_rates = 0.02;
    attrs.construction_permits = 0;
    b.apply(&mut attrs, Default::default());
    assert!((attrs.vacancy_rates - 0.01).abs() < EPS);
}

#[test]
fn resident_scan_sees_only_current_location() {
    let world = make_world(&[
        ("MSA1", true, Some(0.2)),
        ("MSA2", true, Some(0.4)),
        ("MSA2", false, Some(0.8)),
    ]);

    let stats = resident_stats(&world, "MSA2", 0.5);
    assert_eq!(stats.residents, 2);
    assert_eq!(stats.employed, 1);
    assert!((stats.avg_wage_percentile - 0.6).abs() < EPS);
}

#[test]
fn step_reflects_moves_made_earlier_in_the_pass() {
    let mut world = make_world(&[("MSA1", false, None), ("MSA1", true, None)]);
    world
        .registry
        .individual_mut("ind-000001")
        .unwrap()
        .attrs
        .current_msa = "MSA2".into();

    behavior()
        .step(1, "MSA1", &mut world, &mut ScriptedRng::default())
        .unwrap();

    let region = world.registry.region("MSA1").unwrap();
    assert!(region.attrs.unemployment_rate.abs() < EPS);
}
