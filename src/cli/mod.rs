//! One-shot terminal commands. Each loads the corpus once, answers, and exits.

pub mod lookup;
pub mod stats;

pub use lookup::lookup;
pub use stats::stats;
