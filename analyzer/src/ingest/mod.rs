pub mod opencellid;

pub use opencellid::{load_table, load_tables};
