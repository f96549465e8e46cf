pub mod column;
pub mod filter;
pub mod listing;
pub mod record;
