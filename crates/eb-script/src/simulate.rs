//! Simulation script assembly.
//!
//! A simulation script is five fragments in fixed order: startup, result
//! library names, period, time steps, closing. Only the second and fourth
//! depend on the domain.

use eb_core::{Domain, RunParameters};

use crate::script::{Prompt, Script};
use crate::table::{result_library_fragment, time_step_fragment};

fn startup_fragment() -> Script {
    Script::new()
        .then(Prompt::SkipConfigConfirm, "")
        .then(Prompt::InitiateSimulation, "c")
}

fn period_fragment(params: &RunParameters) -> Script {
    Script::new()
        .then(
            Prompt::PeriodStart,
            format!("{} {}", params.start.day, params.start.month),
        )
        .then(
            Prompt::PeriodEnd,
            format!("{} {}", params.end.day, params.end.month),
        )
        .then(Prompt::StartupDays, params.pre_days.to_string())
}

fn closing_fragment(variant: &str) -> Script {
    Script::new()
        .then(Prompt::HourlyIntegration, "N")
        .then(Prompt::SaveLevel, "*")
        .then(Prompt::SaveLevel, "*")
        .then(Prompt::Commence, "s")
        .then(Prompt::UseSuggestedControl, "Y")
        .then(Prompt::ResultSetDescription, format!("Run:{}", variant))
        .then(Prompt::ContinueSimulation, "Y")
        .then(Prompt::SaveResults, "Y")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::QuitModule, "-")
}

/// Build the complete stdin script for one simulation run.
///
/// Pure: identical inputs give identical scripts. Parameters are expected to
/// be validated by the caller.
pub fn assemble_simulation_script(domain: Domain, params: &RunParameters) -> Script {
    let mut script = startup_fragment();
    script
        .append(result_library_fragment(domain, &params.variant))
        .append(period_fragment(params))
        .append(time_step_fragment(domain, params))
        .append(closing_fragment(&params.variant));
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use eb_core::DayMonth;

    fn params() -> RunParameters {
        RunParameters {
            start: DayMonth::new(1, 1),
            end: DayMonth::new(31, 1),
            pre_days: 5,
            building_steps: 4,
            plant_steps: 10,
            variant: "ctl".to_string(),
            config: "house".to_string(),
        }
    }

    #[test]
    fn building_only_payload() {
        let text = assemble_simulation_script(Domain::Building, &params()).to_text();
        assert_eq!(
            text,
            "\nc\nctl.res\n1 1\n31 1\n5\n4\nN\n*\n*\ns\nY\nRun:ctl\nY\nY\n-\n-\n"
        );
    }

    #[test]
    fn full_domain_payload() {
        let text = assemble_simulation_script(Domain::BuildingAirflowPlant, &params()).to_text();
        assert_eq!(
            text,
            "\nc\nctl.res\nctl.mfr\nctl.plr\n1 1\n31 1\n5\n4\n10\nN\n*\n*\ns\nY\nRun:ctl\nY\nY\n-\n-\n"
        );
    }

    #[test]
    fn fragments_appear_in_fixed_order() {
        let script = assemble_simulation_script(Domain::BuildingPlant, &params());
        let order = [
            Prompt::InitiateSimulation,
            Prompt::ZoneResultsLibrary,
            Prompt::PlantResultsLibrary,
            Prompt::PeriodStart,
            Prompt::StartupDays,
            Prompt::BuildingTimeSteps,
            Prompt::PlantTimeSteps,
            Prompt::HourlyIntegration,
            Prompt::ResultSetDescription,
            Prompt::QuitModule,
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|p| script.position(*p).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }
}
