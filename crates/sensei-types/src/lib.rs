pub mod config;
pub mod events;
pub mod input;
pub mod search;
pub mod tags;

pub use config::{LLMConfig, ModelsConfig, SearchConfig, SearchProvider, TurnConfig};
pub use events::{EventSender, NewThreadInfo, TurnEvent};
pub use input::TurnInput;
pub use search::{Category, Medium, SearchResult, SearchResultSet, WebResult};
pub use tags::{EnrichedQuery, QueryTags, TurnMetadata};
