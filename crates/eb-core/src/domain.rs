//! Simulation domains and the result libraries each one writes.

use core::fmt;

use crate::error::{CoreError, CoreResult};

/// One result library written by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResultKind {
    /// Zone (building) results library.
    Zone,
    /// Air flow network (mass flow) results library.
    MassFlow,
    /// Plant results library.
    Plant,
}

impl ResultKind {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ResultKind::Zone => "res",
            ResultKind::MassFlow => "mfr",
            ResultKind::Plant => "plr",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ResultKind::Zone => "building results",
            ResultKind::MassFlow => "air flow results",
            ResultKind::Plant => "plant results",
        }
    }

    /// `<variant>.<ext>`
    pub fn file_name(self, variant: &str) -> String {
        format!("{}.{}", variant, self.extension())
    }
}

/// Which physical subsystems participate in a simulation.
///
/// The numeric key (1..=4) is the one used in batch files and on the command
/// line; everything past parsing works with the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "i64"))]
pub enum Domain {
    Building,
    BuildingAirflow,
    BuildingPlant,
    BuildingAirflowPlant,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::Building,
        Domain::BuildingAirflow,
        Domain::BuildingPlant,
        Domain::BuildingAirflowPlant,
    ];

    pub fn from_key(key: i64) -> CoreResult<Self> {
        match key {
            1 => Ok(Domain::Building),
            2 => Ok(Domain::BuildingAirflow),
            3 => Ok(Domain::BuildingPlant),
            4 => Ok(Domain::BuildingAirflowPlant),
            _ => Err(CoreError::UnsupportedDomain { key }),
        }
    }

    pub fn key(self) -> u8 {
        match self {
            Domain::Building => 1,
            Domain::BuildingAirflow => 2,
            Domain::BuildingPlant => 3,
            Domain::BuildingAirflowPlant => 4,
        }
    }

    pub fn has_airflow(self) -> bool {
        matches!(self, Domain::BuildingAirflow | Domain::BuildingAirflowPlant)
    }

    pub fn has_plant(self) -> bool {
        matches!(self, Domain::BuildingPlant | Domain::BuildingAirflowPlant)
    }

    /// Result libraries in the order the simulator asks for them.
    pub fn result_kinds(self) -> &'static [ResultKind] {
        match self {
            Domain::Building => &[ResultKind::Zone],
            Domain::BuildingAirflow => &[ResultKind::Zone, ResultKind::MassFlow],
            Domain::BuildingPlant => &[ResultKind::Zone, ResultKind::Plant],
            Domain::BuildingAirflowPlant => {
                &[ResultKind::Zone, ResultKind::MassFlow, ResultKind::Plant]
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Domain::Building => "building",
            Domain::BuildingAirflow => "building + air flow",
            Domain::BuildingPlant => "building + plant",
            Domain::BuildingAirflowPlant => "building + air flow + plant",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key(), self.label())
    }
}

impl TryFrom<i64> for Domain {
    type Error = CoreError;

    fn try_from(key: i64) -> CoreResult<Self> {
        Domain::from_key(key)
    }
}

impl From<Domain> for i64 {
    fn from(domain: Domain) -> Self {
        i64::from(domain.key())
    }
}
