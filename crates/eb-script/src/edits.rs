//! Model edits applied through the project manager before a simulation.
//!
//! Each edit is a flat keystroke sequence. The one exception is the climate
//! file, which the project manager cannot change reliably in text mode; it is
//! rewritten directly in the configuration file instead.

use serde::{Deserialize, Serialize};

use crate::script::{Prompt, Script};

const CLIMATE_KEY: &str = "*clm ../dbs/";

/// Monthly ground temperatures for one profile, as the menu expects them
/// (six space separated values per half year).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroundProfile {
    pub jan_jun: String,
    pub jul_dec: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelEdit {
    Control {
        file: String,
    },
    Climate {
        file: String,
    },
    GroundTemperatures {
        profiles: Vec<GroundProfile>,
    },
    SpecialMaterials {
        cnn: String,
        file: String,
    },
    AirflowNetwork {
        file: String,
    },
    Plant {
        file: String,
        database: String,
    },
    Obstruction {
        zone: String,
        obstruction: String,
        width: f64,
        depth: f64,
        height: f64,
    },
    Construction {
        cnn: String,
        /// Construction name as written in the zone geometry files.
        old_name: String,
        old_class: String,
        old_entry: String,
        new_class: String,
        new_entry: String,
    },
    SetpointTemperature {
        control_file: String,
        loop_id: String,
        heating: f64,
        #[serde(default = "default_cooling_setpoint")]
        cooling: f64,
    },
    Conductivity {
        class: String,
        entry: String,
        value: f64,
    },
    SolarAbsorptance {
        class: String,
        entry: String,
        value: f64,
    },
}

fn default_cooling_setpoint() -> f64 {
    99.0
}

/// How an edit gets applied.
#[derive(Debug, Clone, PartialEq)]
pub enum EditPlan {
    /// Run the project manager with this script; scratch is named from `operation`.
    Engine { operation: String, script: Script },
    /// Rewrite the climate line of `<config>.cfg`.
    RewriteClimate { file: String },
}

impl ModelEdit {
    /// Construction name whose whole-word occurrences in the zone geometry
    /// files decide how many confirmations the replace dialog needs.
    pub fn geometry_search_term(&self) -> Option<&str> {
        match self {
            ModelEdit::Construction { old_name, .. } => Some(old_name.as_str()),
            _ => None,
        }
    }

    /// Every free-text value that ends up on a script line.
    pub fn text_fields(&self) -> Vec<&str> {
        match self {
            ModelEdit::Control { file }
            | ModelEdit::Climate { file }
            | ModelEdit::AirflowNetwork { file } => vec![file.as_str()],
            ModelEdit::GroundTemperatures { profiles } => profiles
                .iter()
                .flat_map(|p| [p.jan_jun.as_str(), p.jul_dec.as_str()])
                .collect(),
            ModelEdit::SpecialMaterials { cnn, file } => vec![cnn.as_str(), file.as_str()],
            ModelEdit::Plant { file, database } => vec![file.as_str(), database.as_str()],
            ModelEdit::Obstruction {
                zone, obstruction, ..
            } => vec![zone.as_str(), obstruction.as_str()],
            ModelEdit::Construction {
                cnn,
                old_name,
                old_class,
                old_entry,
                new_class,
                new_entry,
            } => vec![
                cnn.as_str(),
                old_name.as_str(),
                old_class.as_str(),
                old_entry.as_str(),
                new_class.as_str(),
                new_entry.as_str(),
            ],
            ModelEdit::SetpointTemperature {
                control_file,
                loop_id,
                ..
            } => vec![control_file.as_str(), loop_id.as_str()],
            ModelEdit::Conductivity { class, entry, .. }
            | ModelEdit::SolarAbsorptance { class, entry, .. } => vec![class.as_str(), entry.as_str()],
        }
    }

    pub fn summary(&self) -> String {
        match self {
            ModelEdit::Control { file } => format!("control file {}.ctl", file),
            ModelEdit::Climate { file } => format!("climate file {}", file),
            ModelEdit::GroundTemperatures { profiles } => {
                format!("{} ground temperature profile(s)", profiles.len())
            }
            ModelEdit::SpecialMaterials { file, .. } => format!("special materials {}.spm", file),
            ModelEdit::AirflowNetwork { file } => format!("air flow network {}.afn", file),
            ModelEdit::Plant { file, .. } => format!("plant network {}.pln", file),
            ModelEdit::Obstruction {
                zone,
                obstruction,
                width,
                depth,
                height,
            } => format!(
                "obstruction {} in zone {}: {} x {} x {} m",
                obstruction, zone, width, depth, height
            ),
            ModelEdit::Construction {
                old_name,
                old_class,
                old_entry,
                new_class,
                new_entry,
                ..
            } => format!(
                "construction \"{}\" {}/{} -> {}/{}",
                old_name, old_class, old_entry, new_class, new_entry
            ),
            ModelEdit::SetpointTemperature {
                control_file,
                heating,
                cooling,
                ..
            } => format!(
                "setpoints in {}.ctl: heating {} degC, cooling {} degC",
                control_file, heating, cooling
            ),
            ModelEdit::Conductivity {
                class,
                entry,
                value,
            } => format!("conductivity {}/{} = {} W/(m K)", class, entry, value),
            ModelEdit::SolarAbsorptance {
                class,
                entry,
                value,
            } => format!("outside solar absorptance {}/{} = {}", class, entry, value),
        }
    }

    /// Plan the edit for model `<config>.cfg`.
    ///
    /// `geometry_matches` is only read for [`ModelEdit::Construction`].
    pub fn plan(&self, config: &str, geometry_matches: usize) -> EditPlan {
        let engine = |operation: String, script: Script| EditPlan::Engine { operation, script };

        match self {
            ModelEdit::Climate { file } => EditPlan::RewriteClimate { file: file.clone() },
            ModelEdit::Control { file } => engine(format!("set_{}", file), control(config, file)),
            ModelEdit::GroundTemperatures { profiles } => {
                engine("set_mgp".to_string(), ground_temperatures(profiles))
            }
            ModelEdit::SpecialMaterials { cnn, file } => engine(
                format!("set_{}", file),
                special_materials(config, cnn, file),
            ),
            ModelEdit::AirflowNetwork { file } => {
                engine(format!("set_{}", file), airflow_network(file))
            }
            ModelEdit::Plant { file, database } => {
                engine(format!("set_{}", file), plant(file, database))
            }
            ModelEdit::Obstruction {
                zone,
                obstruction,
                width,
                depth,
                height,
            } => engine(
                format!("set_{}_{}_obs", zone, obstruction),
                obstruction_block(zone, obstruction, *width, *depth, *height),
            ),
            ModelEdit::Construction {
                cnn,
                old_class,
                old_entry,
                new_class,
                new_entry,
                ..
            } => engine(
                format!("set_roomcon_{}", new_entry),
                construction(
                    config,
                    cnn,
                    (old_class.as_str(), old_entry.as_str()),
                    (new_class.as_str(), new_entry.as_str()),
                    geometry_matches,
                ),
            ),
            ModelEdit::SetpointTemperature {
                control_file,
                loop_id,
                heating,
                cooling,
            } => engine(
                "set_hc_setp".to_string(),
                setpoints(control_file, loop_id, *heating, *cooling),
            ),
            ModelEdit::Conductivity {
                class,
                entry,
                value,
            } => engine(
                format!("set_{}_{}_{}_lam", class, entry, value),
                material_property(class, entry, "c", *value),
            ),
            ModelEdit::SolarAbsorptance {
                class,
                entry,
                value,
            } => engine(
                format!("set_{}_{}_{}_abs-o", class, entry, value),
                material_property(class, entry, "h", *value),
            ),
        }
    }
}

fn control(config: &str, file: &str) -> Script {
    Script::new()
        .then(Prompt::Menu("browse / edit / simulate"), "m")
        .then(Prompt::Menu("zone controls"), "i")
        .then(Prompt::FileName, format!("../ctl/{}.ctl", file))
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::Confirm, "Y")
        .then(Prompt::Confirm, "Y")
        .then(Prompt::Confirm, "Y")
        .then(Prompt::FileName, format!("{}.cnn", config))
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::QuitModule, "-")
}

fn ground_temperatures(profiles: &[GroundProfile]) -> Script {
    let mut script = Script::new()
        .then(Prompt::Menu("browse / edit / simulate"), "m")
        .then(Prompt::Menu("context"), "b");
    for (index, profile) in profiles.iter().enumerate() {
        script
            .push(Prompt::Menu("ground temperature profiles"), "m")
            .push(Prompt::Menu("edit profile"), "b")
            .push(Prompt::Value, (index + 1).to_string())
            .push(Prompt::Value, profile.jan_jun.trim())
            .push(Prompt::Value, profile.jul_dec.trim());
    }
    script
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::Menu("save model"), "!")
        .then(Prompt::FileName, "")
        .then(Prompt::FileName, "")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::QuitModule, "-")
}

fn special_materials(config: &str, cnn: &str, file: &str) -> Script {
    Script::new()
        .then(Prompt::Menu("browse / edit / simulate"), "m")
        .then(Prompt::Menu("composition"), "c")
        .then(Prompt::Menu("active materials"), "n")
        .then(Prompt::Confirm, "Y")
        .then(Prompt::FileName, format!("../dbs/{}.spm", file))
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::Menu("save model"), "!")
        .then(Prompt::FileName, format!("{}.cfg", config))
        .then(Prompt::FileName, format!("{}.cnn", cnn))
        .then(Prompt::FileName, format!("{}.cnn", cnn))
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::QuitModule, "-")
}

fn airflow_network(file: &str) -> Script {
    Script::new()
        .then(Prompt::Menu("browse / edit / simulate"), "m")
        .then(Prompt::Menu("flow network"), "e")
        .then(Prompt::Menu("new flow network"), "e")
        .then(Prompt::Menu("menus & lists"), "a")
        .then(Prompt::FileName, format!("../nets/{}.afn", file))
        .then(Prompt::Confirm, "n")
        .then(Prompt::Menu("save network"), "!")
        .then(Prompt::FileName, "")
        .then(Prompt::Confirm, "y")
        .then(Prompt::Confirm, "n")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::Confirm, "n")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::QuitModule, "-")
}

fn plant(file: &str, database: &str) -> Script {
    let network = format!("../nets/{}.pln", file);
    Script::new()
        .then(Prompt::Menu("browse / edit / simulate"), "m")
        .then(Prompt::Menu("plant & systems"), "d")
        .then(Prompt::Menu("explicit plant model"), "b")
        .then(Prompt::FileName, network.clone())
        .then(Prompt::Confirm, "y")
        .then(Prompt::Confirm, "n")
        .then(Prompt::FileName, database)
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::Confirm, "y")
        .then(Prompt::FileName, network)
        .then(Prompt::Confirm, "y")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::QuitModule, "-")
}

fn obstruction_block(zone: &str, obstruction: &str, width: f64, depth: f64, height: f64) -> Script {
    let mut script = Script::new()
        .then(Prompt::Menu("browse / edit / simulate"), "m")
        .then(Prompt::Menu("composition"), "c")
        .then(Prompt::Menu("geometry & attribution"), "a")
        .then(Prompt::Value, zone)
        .then(Prompt::Menu("solar obstruction"), "h")
        .then(Prompt::Menu("dimensional input"), "a")
        .then(Prompt::Value, obstruction)
        .then(Prompt::Menu("block W D H"), "b")
        .then(Prompt::Value, format!("{} {} {}", width, depth, height))
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::Menu("recalculate silently"), "a");
    for _ in 0..4 {
        script.push(Prompt::ExitMenu, "-");
    }
    script.then(Prompt::QuitModule, "-")
}

fn construction(
    config: &str,
    cnn: &str,
    old: (&str, &str),
    new: (&str, &str),
    confirmations: usize,
) -> Script {
    let mut script = Script::new()
        .then(Prompt::Menu("browse / edit / simulate"), "m")
        .then(Prompt::Menu("composition"), "c")
        .then(Prompt::Menu("global tasks"), "*")
        .then(Prompt::Menu("search & replace"), "f")
        .then(Prompt::Menu("continue"), "c")
        .then(Prompt::Value, old.0)
        .then(Prompt::Value, old.1)
        .then(Prompt::Value, new.0)
        .then(Prompt::Value, new.1)
        .then(Prompt::Menu("all zones"), "*")
        .then(Prompt::ExitMenu, "-");
    for _ in 0..confirmations {
        script.push(Prompt::Confirm, "y");
    }
    script
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::Menu("save model"), "!")
        .then(Prompt::FileName, format!("{}.cfg", config))
        .then(Prompt::FileName, format!("{}.cnn", cnn))
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::QuitModule, "-")
}

fn setpoints(control_file: &str, loop_id: &str, heating: f64, cooling: f64) -> Script {
    let path = format!("../ctl/{}.ctl", control_file);
    Script::new()
        .then(Prompt::Menu("browse / edit / simulate"), "m")
        .then(Prompt::Menu("zone controls"), "j")
        .then(Prompt::FileName, path.clone())
        .then(Prompt::Value, loop_id)
        .then(Prompt::Menu("period data"), "c")
        .then(Prompt::Menu("first period"), "a")
        .then(Prompt::Menu("heating setpoint"), "f")
        .then(Prompt::Value, heating.to_string())
        .then(Prompt::Menu("cooling setpoint"), "g")
        .then(Prompt::Value, cooling.to_string())
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::Confirm, "Y")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::Menu("save control data"), ">")
        .then(Prompt::FileName, path)
        .then(Prompt::Confirm, "Y")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::Confirm, "N")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::QuitModule, "-")
}

/// Materials database edit; `field` is the menu key of the property.
fn material_property(class: &str, entry: &str, field: &'static str, value: f64) -> Script {
    Script::new()
        .then(Prompt::Menu("database maintenance"), "b")
        .then(Prompt::Menu("materials"), "c")
        .then(Prompt::Menu("browse / edit"), "a")
        .then(Prompt::Value, class)
        .then(Prompt::Value, entry)
        .then(Prompt::Menu("material property"), field)
        .then(Prompt::Value, value.to_string())
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::Confirm, "Y")
        .then(Prompt::Menu("save materials file"), "!")
        .then(Prompt::Confirm, "Y")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::Confirm, "Y")
        .then(Prompt::Confirm, "Y")
        .then(Prompt::QuitModule, "-")
}

/// Point every `*clm ../dbs/...` entry of a configuration file at `file`.
///
/// Returns the rewritten text and how many lines changed.
pub fn rewrite_climate_line(cfg_text: &str, file: &str) -> (String, usize) {
    let mut changed = 0;
    let mut out = String::with_capacity(cfg_text.len());
    for segment in cfg_text.split_inclusive('\n') {
        let (line, ending) = match segment.strip_suffix('\n') {
            Some(line) => (line, "\n"),
            None => (segment, ""),
        };
        match line.find(CLIMATE_KEY) {
            Some(idx) => {
                out.push_str(&line[..idx]);
                out.push_str(CLIMATE_KEY);
                out.push_str(file);
                changed += 1;
            }
            None => out.push_str(line),
        }
        out.push_str(ending);
    }
    (out, changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_confirms_once_per_match() {
        let edit = ModelEdit::Construction {
            cnn: "house".to_string(),
            old_name: "ext_wall".to_string(),
            old_class: "e".to_string(),
            old_entry: "b".to_string(),
            new_class: "e".to_string(),
            new_entry: "d".to_string(),
        };
        assert_eq!(edit.geometry_search_term(), Some("ext_wall"));

        match edit.plan("house", 3) {
            EditPlan::Engine { operation, script } => {
                assert_eq!(operation, "set_roomcon_d");
                assert_eq!(script.count(Prompt::Confirm), 3);
            }
            other => panic!("unexpected plan {other:?}"),
        }
    }

    #[test]
    fn climate_is_rewritten_not_scripted() {
        let edit = ModelEdit::Climate {
            file: "zurich.clm".to_string(),
        };
        assert_eq!(
            edit.plan("house", 0),
            EditPlan::RewriteClimate {
                file: "zurich.clm".to_string()
            }
        );
    }

    #[test]
    fn rewrite_climate_keeps_other_lines() {
        let cfg = "*cfg\n*clm ../dbs/old.clm\n*year 2001\n";
        let (text, changed) = rewrite_climate_line(cfg, "new.clm");
        assert_eq!(changed, 1);
        assert_eq!(text, "*cfg\n*clm ../dbs/new.clm\n*year 2001\n");
    }

    #[test]
    fn rewrite_climate_without_match_is_identity() {
        let cfg = "*cfg\r\n*year 2001";
        assert_eq!(rewrite_climate_line(cfg, "x.clm"), (cfg.to_string(), 0));
    }

    #[test]
    fn setpoint_script_uses_default_cooling() {
        let edit: ModelEdit = serde_yaml::from_str(
            "type: setpoint_temperature\ncontrol_file: office\nloop_id: '1'\nheating: 20.5\n",
        )
        .unwrap();
        match edit.plan("house", 0) {
            EditPlan::Engine { operation, script } => {
                assert_eq!(operation, "set_hc_setp");
                let text = script.to_text();
                assert!(text.contains("f\n20.5\ng\n99\n"));
                assert!(text.contains("../ctl/office.ctl\n"));
            }
            other => panic!("unexpected plan {other:?}"),
        }
    }

    #[test]
    fn ground_profiles_are_numbered_from_one() {
        let edit = ModelEdit::GroundTemperatures {
            profiles: vec![
                GroundProfile {
                    jan_jun: "0.47 -1.09 -0.77 0.52 4.75 8.58".to_string(),
                    jul_dec: "11.64 13.28 12.93 10.78 7.29 3.59".to_string(),
                },
                GroundProfile {
                    jan_jun: " 3.12 1.53 1.18 1.66 4.06 6.64".to_string(),
                    jul_dec: "9.00 10.65 11.03 10.10 8.05 5.55".to_string(),
                },
            ],
        };
        let EditPlan::Engine { script, .. } = edit.plan("house", 0) else {
            panic!("expected engine plan");
        };
        let text = script.to_text();
        assert!(text.contains("m\nb\n1\n0.47 -1.09"));
        assert!(text.contains("m\nb\n2\n3.12 1.53"));
    }

    #[test]
    fn material_edits_pick_property_field() {
        let lam = ModelEdit::Conductivity {
            class: "3".to_string(),
            entry: "b".to_string(),
            value: 0.035,
        };
        let EditPlan::Engine { operation, script } = lam.plan("house", 0) else {
            panic!("expected engine plan");
        };
        assert_eq!(operation, "set_3_b_0.035_lam");
        assert!(script.to_text().contains("3\nb\nc\n0.035\n"));
    }
}
