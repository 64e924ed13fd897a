pub mod stat;

pub use stat::{format_bytes, Stat};
