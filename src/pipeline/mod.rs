//! Pipeline orchestration: source, analysis, rendering.

mod result;
mod runner;

pub use result::PipelineResult;
pub use runner::Pipeline;

use std::fmt;

/// Stages of one run. A run only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineStage {
    /// Dependencies loaded, nothing fetched yet.
    Idle,
    /// Documents received from the source.
    Collected,
    /// Statistics computed.
    Analyzed,
    /// Result handed to the renderer.
    Done,
}

impl PipelineStage {
    /// The stage after this one; `Done` is terminal.
    pub fn next(self) -> Self {
        match self {
            PipelineStage::Idle => PipelineStage::Collected,
            PipelineStage::Collected => PipelineStage::Analyzed,
            PipelineStage::Analyzed | PipelineStage::Done => PipelineStage::Done,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Collected => "collected",
            PipelineStage::Analyzed => "analyzed",
            PipelineStage::Done => "done",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        let mut stage = PipelineStage::Idle;
        let mut seen = vec![stage];
        while stage != PipelineStage::Done {
            stage = stage.next();
            seen.push(stage);
        }
        assert_eq!(
            seen,
            vec![
                PipelineStage::Idle,
                PipelineStage::Collected,
                PipelineStage::Analyzed,
                PipelineStage::Done
            ]
        );
        assert_eq!(PipelineStage::Done.next(), PipelineStage::Done);
        assert!(PipelineStage::Collected < PipelineStage::Analyzed);
    }
}
