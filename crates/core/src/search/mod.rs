//! Text filtering and pagination over record collections.

mod debounce;
mod filter;

pub use debounce::{QueryDebouncer, DEBOUNCE_WINDOW_MS};
pub use filter::{view, Searchable, DEFAULT_PAGE_SIZE};
