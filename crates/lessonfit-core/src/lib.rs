//! Lessonfit Core - duration adaptation for four-phase lesson scripts
//!
//! A lesson script is split into four pedagogical phases (prepare, initiate,
//! deliver, end), each with its own duration and content. Lessonfit brings a
//! script's total duration to a target while keeping the pedagogy intact.
//!
//! # Architecture
//!
//! 1. **Script model** (`script`): phase-keyed scripts that round-trip unknown fields
//! 2. **Coordinator** (`optimizer`): classifies the deviation and dispatches
//! 3. **Content adapter** (`adapter`): deterministic minor adjustments
//! 4. **Content transformer** (`transformer`): generated compression and expansion
//! 5. **Quality** (`structure`, `quality`): structural, compression, expansion and rubric checks
//!
//! Text generation is never done here. It is delegated to a
//! [`ScriptGenerator`] injected at construction.
//!
//! # Quick Start
//!
//! ```
//! use lessonfit_core::{ContentAdapter, Script};
//!
//! let script: Script = serde_json::from_str(r#"{
//!     "prepare":  { "duration": 30,  "content": "Welcome." },
//!     "initiate": { "duration": 45,  "content": "What makes ice melt?" },
//!     "deliver":  { "duration": 150, "content": "Heat moves into the ice." },
//!     "end":      { "duration": 15,  "content": "Recap." }
//! }"#).unwrap();
//!
//! let adjusted = ContentAdapter::default().adjust(&script, 256.0);
//! assert_eq!(adjusted.total_duration(), 256.0);
//! assert_eq!(script.total_duration(), 240.0);
//! ```

#![deny(unsafe_code)]
#![warn(rust_2018_idioms, missing_debug_implementations)]

pub mod adapter;
pub mod concepts;
pub mod config;
pub mod duration;
pub mod error;
pub mod generation;
pub mod optimizer;
pub mod quality;
pub mod script;
pub mod structure;
pub mod transformer;

// Re-export commonly used types
pub use adapter::ContentAdapter;
pub use concepts::{extract_concepts, extract_objectives};
pub use config::OptimizerConfig;
pub use duration::total_duration;
pub use error::{EngineError, GenerationError, Result};
pub use generation::{GenerationMode, GenerationRequest, ScriptGenerator};
pub use optimizer::{
    DurationDeviation, OptimizationCoordinator, OptimizationMetadata, OptimizationResult,
    OptimizationType, OptimizeOptions,
};
pub use quality::{
    validate_compression_quality, validate_expansion_quality, QualityAssessment, QualityReport,
};
pub use script::{Phase, PhaseName, Script};
pub use structure::{validate_structure, StructureReport};
pub use transformer::ContentTransformer;

/// Version of the Lessonfit core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the library
pub const NAME: &str = env!("CARGO_PKG_NAME");
