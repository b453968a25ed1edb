//! Token filtering, frequency counting and top-K selection.

mod filter;
mod table;

pub use filter::{filter_tokens, TokenFilter};
pub use table::{FrequencyTable, TopKResult};
