use eb_core::{DayMonth, Domain, RunParameters};
use eb_script::{Prompt, assemble_simulation_script};
use proptest::prelude::*;

fn params(variant: &str) -> RunParameters {
    RunParameters {
        start: DayMonth::new(9, 1),
        end: DayMonth::new(15, 1),
        pre_days: 4,
        building_steps: 12,
        plant_steps: 3,
        variant: variant.to_string(),
        config: "office".to_string(),
    }
}

#[test]
fn no_plant_steps_without_plant() {
    for domain in [Domain::Building, Domain::BuildingAirflow] {
        let script = assemble_simulation_script(domain, &params("v"));
        assert_eq!(script.count(Prompt::PlantTimeSteps), 0, "{domain}");
        assert_eq!(script.count(Prompt::BuildingTimeSteps), 1, "{domain}");
    }
}

#[test]
fn plant_steps_follow_building_steps() {
    for domain in [Domain::BuildingPlant, Domain::BuildingAirflowPlant] {
        let script = assemble_simulation_script(domain, &params("v"));
        assert_eq!(script.count(Prompt::PlantTimeSteps), 1, "{domain}");
        let building = script.position(Prompt::BuildingTimeSteps).unwrap();
        let plant = script.position(Prompt::PlantTimeSteps).unwrap();
        assert_eq!(plant, building + 1);
        assert_eq!(script.lines()[plant].response, "3");
    }
}

#[test]
fn result_library_lines_match_domain() {
    for domain in Domain::ALL {
        let script = assemble_simulation_script(domain, &params("ctl"));
        let libraries: Vec<&str> = script
            .lines()
            .iter()
            .filter(|l| {
                matches!(
                    l.prompt,
                    Prompt::ZoneResultsLibrary
                        | Prompt::MassFlowResultsLibrary
                        | Prompt::PlantResultsLibrary
                )
            })
            .map(|l| l.response.as_str())
            .collect();
        let expected: Vec<String> = domain
            .result_kinds()
            .iter()
            .map(|k| k.file_name("ctl"))
            .collect();
        assert_eq!(libraries, expected);
    }
}

#[test]
fn variant_label_is_result_set_description() {
    let script = assemble_simulation_script(Domain::BuildingAirflow, &params("win_south"));
    let idx = script.position(Prompt::ResultSetDescription).unwrap();
    assert_eq!(script.lines()[idx].response, "Run:win_south");
}

fn any_domain() -> impl Strategy<Value = Domain> {
    prop::sample::select(Domain::ALL.to_vec())
}

proptest! {
    #[test]
    fn assembly_is_deterministic(
        domain in any_domain(),
        day in 1u8..=28,
        month in 1u8..=12,
        pre_days in 1u32..30,
        building_steps in 1u32..60,
        plant_steps in 1u32..20,
        variant in "[a-z][a-z0-9_]{0,12}",
    ) {
        let p = RunParameters {
            start: DayMonth::new(day, month),
            end: DayMonth::new(28, 12),
            pre_days,
            building_steps,
            plant_steps,
            variant,
            config: "model".to_string(),
        };
        let first = assemble_simulation_script(domain, &p).to_bytes();
        let second = assemble_simulation_script(domain, &p).to_bytes();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn line_count_depends_only_on_domain(
        domain in any_domain(),
        building_steps in 1u32..60,
        variant in "[a-z][a-z0-9_]{0,12}",
    ) {
        let mut p = params("x");
        p.building_steps = building_steps;
        p.variant = variant;
        let script = assemble_simulation_script(domain, &p);
        let plant = usize::from(domain.has_plant());
        prop_assert_eq!(script.len(), 2 + domain.result_kinds().len() + 3 + 1 + plant + 10);
        prop_assert_eq!(script.to_text().lines().count(), script.len());
    }
}
