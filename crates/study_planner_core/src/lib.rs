pub mod domain;
pub mod error;
pub mod extraction;
pub mod planner;
pub mod ports;
pub mod registry;
pub mod store;

pub use domain::{ChatPrompt, Credential, DraftTest, TestEntry, UploadedFile};
pub use error::PlannerError;
pub use ports::{CompletionService, PortError, PortResult, TextExtractionService};
pub use store::SessionState;
