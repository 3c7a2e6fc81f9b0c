pub mod config;
pub mod fetch;
pub mod page;
pub mod parse;
pub mod search;
pub mod store;

pub use config::Config;
pub use page::{PageView, Pager};
pub use parse::{parse, ParsedTable, Record};
pub use search::{DebouncedSearch, Ranker};
pub use store::{RecordCache, RecordStore};
