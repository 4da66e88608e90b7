//! Application services - Use case implementations

mod synthesis_service;

pub use synthesis_service::{
    BatchCommand, BatchItem, BatchItemOutput, BatchOutcome, SynthesisConfig, SynthesisOutput,
    SynthesisService, SynthesizeCommand, UploadedReference,
};
