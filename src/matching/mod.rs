//! Matching pools
//!
//! FIFO wait-queues of client ids, one per match mode.

pub mod modes;
pub mod pool;

pub use modes::MatchMode;
pub use pool::MatchingPool;
