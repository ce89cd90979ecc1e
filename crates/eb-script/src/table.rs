//! Domain table: what a domain combination contributes to a simulation script.
//!
//! The orderings here encode the simulator's fixed prompt order. Zone
//! results are always requested first, then mass flow, then plant.

use eb_core::{Domain, ResultKind, RunParameters};

use crate::script::{Prompt, Script};

fn library_prompt(kind: ResultKind) -> Prompt {
    match kind {
        ResultKind::Zone => Prompt::ZoneResultsLibrary,
        ResultKind::MassFlow => Prompt::MassFlowResultsLibrary,
        ResultKind::Plant => Prompt::PlantResultsLibrary,
    }
}

/// Result library file names, in prompt order.
pub fn result_libraries(domain: Domain, variant: &str) -> Vec<String> {
    domain
        .result_kinds()
        .iter()
        .map(|kind| kind.file_name(variant))
        .collect()
}

/// Time-step answers, in prompt order. Plant steps only exist with a plant.
pub fn time_step_values(domain: Domain, params: &RunParameters) -> Vec<(Prompt, u32)> {
    let mut values = vec![(Prompt::BuildingTimeSteps, params.building_steps)];
    if domain.has_plant() {
        values.push((Prompt::PlantTimeSteps, params.plant_steps));
    }
    values
}

/// Human readable list of the result files a run will produce.
pub fn describe_results(domain: Domain, variant: &str) -> String {
    domain
        .result_kinds()
        .iter()
        .map(|kind| format!("{:<18}: {}", kind.description(), kind.file_name(variant)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn result_library_fragment(domain: Domain, variant: &str) -> Script {
    domain
        .result_kinds()
        .iter()
        .fold(Script::new(), |script, kind| {
            script.then(library_prompt(*kind), kind.file_name(variant))
        })
}

pub(crate) fn time_step_fragment(domain: Domain, params: &RunParameters) -> Script {
    time_step_values(domain, params)
        .into_iter()
        .fold(Script::new(), |script, (prompt, value)| {
            script.then(prompt, value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use eb_core::DayMonth;

    fn params() -> RunParameters {
        RunParameters {
            start: DayMonth::new(1, 1),
            end: DayMonth::new(7, 1),
            pre_days: 3,
            building_steps: 6,
            plant_steps: 4,
            variant: "v1".to_string(),
            config: "model".to_string(),
        }
    }

    #[test]
    fn library_count_matches_extensions() {
        for domain in Domain::ALL {
            let libs = result_libraries(domain, "v1");
            assert_eq!(libs.len(), domain.result_kinds().len());
            for (lib, kind) in libs.iter().zip(domain.result_kinds()) {
                assert_eq!(lib, &format!("v1.{}", kind.extension()));
            }
        }
    }

    #[test]
    fn full_domain_library_order() {
        assert_eq!(
            result_libraries(Domain::BuildingAirflowPlant, "x"),
            ["x.res", "x.mfr", "x.plr"]
        );
    }

    #[test]
    fn plant_steps_only_with_plant() {
        let p = params();
        assert_eq!(
            time_step_values(Domain::Building, &p),
            [(Prompt::BuildingTimeSteps, 6)]
        );
        assert_eq!(
            time_step_values(Domain::BuildingAirflow, &p),
            [(Prompt::BuildingTimeSteps, 6)]
        );
        assert_eq!(
            time_step_values(Domain::BuildingPlant, &p),
            [(Prompt::BuildingTimeSteps, 6), (Prompt::PlantTimeSteps, 4)]
        );
    }

    #[test]
    fn description_lists_each_file() {
        let text = describe_results(Domain::BuildingAirflowPlant, "v");
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("air flow results  : v.mfr"));
        assert!(text.contains("plant results     : v.plr"));
    }
}
