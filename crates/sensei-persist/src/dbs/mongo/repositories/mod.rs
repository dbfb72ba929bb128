mod thread;
mod turn;

pub use thread::MongoThreadRepository;
pub use turn::MongoTurnRepository;
