pub mod debounce;
pub mod rank;

pub use debounce::DebouncedSearch;
pub use rank::Ranker;
