#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStage {
    Purging,
    WritingQaReport,
    ApplyingEdit { index: usize, total: usize },
    Simulating,
    Gathering,
    CheckingResults,
    Relocating,
    WritingManifest,
    Completed,
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub variant: String,
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
}

impl RunProgressEvent {
    pub fn stage(
        variant: impl Into<String>,
        stage: RunStage,
        elapsed_wall_s: f64,
        message: Option<String>,
    ) -> Self {
        Self {
            variant: variant.into(),
            stage,
            elapsed_wall_s,
            message,
        }
    }
}

impl RunStage {
    pub fn label(&self) -> &'static str {
        match self {
            RunStage::Purging => "purge",
            RunStage::WritingQaReport => "qa report",
            RunStage::ApplyingEdit { .. } => "edit",
            RunStage::Simulating => "simulate",
            RunStage::Gathering => "gather",
            RunStage::CheckingResults => "check",
            RunStage::Relocating => "relocate",
            RunStage::WritingManifest => "manifest",
            RunStage::Completed => "done",
        }
    }
}
