pub mod answer;
pub mod builder;
pub mod enrichment;
pub mod error;
pub mod history;
pub mod media;
pub mod orchestrator;
pub mod prompts;
pub mod related;
pub mod slug;

pub use builder::OrchestratorBuilder;
pub use error::{TurnError, ACCESS_DENIED_MESSAGE, GENERIC_ERROR_MESSAGE};
pub use orchestrator::Orchestrator;

// Re-export the turn data model
pub use sensei_types::{
    EnrichedQuery, EventSender, ModelsConfig, QueryTags, TurnConfig, TurnEvent, TurnInput,
};
