mod thread;
mod turn;

pub use thread::{Thread, ThreadMetadata};
pub use turn::Turn;
