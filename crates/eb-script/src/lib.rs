//! eb-script: keystroke scripts for the simulator's text-mode menus.
//!
//! The simulator and the project manager are driven by feeding a complete,
//! pre-computed sequence of menu responses on standard input. Nothing here
//! reads the engine's output, so every script must match the engine's prompt
//! sequence exactly.

pub mod edits;
pub mod qa;
pub mod script;
pub mod simulate;
pub mod table;

pub use edits::{EditPlan, GroundProfile, ModelEdit, rewrite_climate_line};
pub use qa::assemble_qa_report_script;
pub use script::{Prompt, Script, ScriptLine};
pub use simulate::assemble_simulation_script;
pub use table::{describe_results, result_libraries, time_step_values};
