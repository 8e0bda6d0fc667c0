//! The simplification engine: language detection, the offline rule pipeline,
//! and the orchestrator that picks online vs offline per request.

pub mod detect;
pub mod offline;
pub mod orchestrator;
pub mod rules;
pub mod session;

pub use detect::{detect, detect_with_confidence};
pub use offline::OfflineSimplifier;
pub use orchestrator::{EngineConfig, EngineHandle, Orchestrator, SubmitError};
pub use rules::RuleSet;
pub use session::Session;
