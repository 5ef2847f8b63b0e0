//! Transformation pipeline for the index document.
//!
//! The pipeline mutates a single document through a series of stages:
//! 1. Count articles (before anything is inserted)
//! 2. Extract tag sets from metadata scripts
//! 3. Render tags into metadata blocks
//! 4. Insert the "all articles" sidebar entry
//! 5. Replace the development script
//! 6. Write the document (omitted when checking)
//!
//! Every stage validates its anchors before mutating, and the writer runs
//! last, so a failing run leaves the file on disk untouched.

mod context;
mod error;
mod stages;

pub use context::{PipelineContext, TransformReport};
pub use error::PipelineError;

use stages::{
    CountArticlesStage, ExtractTagsStage, InjectScriptStage, RenderTagsStage, SidebarStage,
    WriteStage,
};

use crate::transform::IndexDocument;

/// A stage in the transformation pipeline.
///
/// Stages run sequentially over the same document, each seeing the
/// mutations of the stages before it.
pub trait Stage: Send + Sync {
    /// Unique name for this stage.
    fn name(&self) -> &'static str;

    /// Process the document through this stage.
    fn process(
        &self,
        doc: &mut IndexDocument,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError>;
}

/// The document transformation pipeline.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// The stages that mutate the document, without writing it.
    ///
    /// Stages: count → extract → tags → sidebar → script
    pub fn check_pipeline() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_stage(CountArticlesStage);
        pipeline.add_stage(ExtractTagsStage);
        pipeline.add_stage(RenderTagsStage);
        pipeline.add_stage(SidebarStage);
        pipeline.add_stage(InjectScriptStage);
        pipeline
    }

    /// Create the default pipeline: every mutation, then the write.
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::check_pipeline();
        pipeline.add_stage(WriteStage);
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Run every stage over `doc`, in order.
    pub fn run(
        &self,
        doc: &mut IndexDocument,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        for stage in &self.stages {
            tracing::debug!(stage = stage.name(), "running stage");
            stage.process(doc, ctx)?;
        }

        Ok(())
    }

    /// Get the names of all stages in order.
    #[allow(dead_code)]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}
