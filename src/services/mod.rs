pub mod aggregator;
pub mod assembler;
pub mod comparison;
pub mod http;
pub mod letterboxd;
pub mod orchestrator;
pub mod providers;

pub use comparison::compare_watchlists;
