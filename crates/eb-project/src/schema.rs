//! Batch file schema definitions.

use std::path::PathBuf;

use eb_core::{CoreResult, DayMonth, Domain, RunParameters};
use eb_script::ModelEdit;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchDef {
    pub version: u32,
    pub name: String,
    pub model: ModelDef,
    #[serde(default)]
    pub engine: EngineDef,
    pub defaults: RunDefaultsDef,
    #[serde(default)]
    pub workspace_mode: WorkspaceModeDef,
    #[serde(default)]
    pub purge_mode: PurgeModeDef,
    /// Write `<variant>.contents` before simulating each variant.
    #[serde(default)]
    pub qa_report: bool,
    #[serde(default)]
    pub variants: Vec<VariantDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDef {
    /// Configuration file name without `.cfg`.
    pub config: String,
    /// The model's cfg directory; engines run here and artifacts are sorted here.
    pub work_dir: PathBuf,
    /// Where the simulator may leave `<variant>.*` result files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmp_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineDef {
    #[serde(default = "default_simulator")]
    pub simulator: String,
    #[serde(default = "default_project_manager")]
    pub project_manager: String,
}

impl Default for EngineDef {
    fn default() -> Self {
        Self {
            simulator: default_simulator(),
            project_manager: default_project_manager(),
        }
    }
}

fn default_simulator() -> String {
    "bps".to_string()
}

fn default_project_manager() -> String {
    "prj".to_string()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodDef {
    pub start: DayMonth,
    pub end: DayMonth,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunDefaultsDef {
    /// Domain key, 1..=4.
    pub domain: i64,
    pub period: PeriodDef,
    pub pre_days: u32,
    pub building_steps: u32,
    #[serde(default = "default_plant_steps")]
    pub plant_steps: u32,
}

fn default_plant_steps() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceModeDef {
    #[default]
    Rebuild,
    Append,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PurgeModeDef {
    #[default]
    Full,
    PreserveContents,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantDef {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<PeriodDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_steps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_steps: Option<u32>,
    /// Applied in order through the project manager before simulating.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edits: Vec<ModelEdit>,
}

impl VariantDef {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            domain: None,
            period: None,
            pre_days: None,
            building_steps: None,
            plant_steps: None,
            edits: Vec::new(),
        }
    }
}

/// A variant with defaults applied and the domain key checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVariant {
    pub domain: Domain,
    pub params: RunParameters,
    pub edits: Vec<ModelEdit>,
}

impl BatchDef {
    pub fn find_variant(&self, label: &str) -> Option<&VariantDef> {
        self.variants.iter().find(|v| v.label == label)
    }

    /// Apply defaults to `variant` and validate the result.
    pub fn resolve(&self, variant: &VariantDef) -> CoreResult<ResolvedVariant> {
        let defaults = &self.defaults;
        let domain = Domain::from_key(variant.domain.unwrap_or(defaults.domain))?;
        let period = variant.period.unwrap_or(defaults.period);
        let params = RunParameters {
            start: period.start,
            end: period.end,
            pre_days: variant.pre_days.unwrap_or(defaults.pre_days),
            building_steps: variant.building_steps.unwrap_or(defaults.building_steps),
            plant_steps: variant.plant_steps.unwrap_or(defaults.plant_steps),
            variant: variant.label.clone(),
            config: self.model.config.clone(),
        };
        params.validate()?;
        Ok(ResolvedVariant {
            domain,
            params,
            edits: variant.edits.clone(),
        })
    }
}
