//! Project-manager script that writes a model QA ("contents") report.

use crate::script::{Prompt, Script};

/// Write `<variant>.contents` for model `<config>.cfg`.
pub fn assemble_qa_report_script(config: &str, variant: &str) -> Script {
    Script::new()
        .then(Prompt::Menu("browse / edit / simulate"), "m")
        .then(Prompt::Menu("QA reporting"), "u")
        .then(Prompt::Confirm, "N")
        .then(Prompt::Menu("toggle site info"), "a")
        .then(Prompt::Menu("toggle model context"), "c")
        .then(Prompt::Menu("toggle controls"), "d")
        .then(Prompt::Menu("zone selection"), "g")
        .then(Prompt::Menu("all items"), "*")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::Menu("toggle file names"), "m")
        .then(Prompt::Menu("report to"), ">")
        .then(Prompt::FileName, format!("{}.contents", variant))
        .then(Prompt::FileName, format!("{}.cnn", config))
        .then(Prompt::Menu("generate report"), "!")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::ExitMenu, "-")
        .then(Prompt::QuitModule, "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_contents_and_connections() {
        let text = assemble_qa_report_script("house", "ctl").to_text();
        assert!(text.contains("\n>\nctl.contents\nhouse.cnn\n!\n"));
        assert!(text.starts_with("m\nu\nN\n"));
        assert!(text.ends_with("-\n-\n-\n"));
    }
}
