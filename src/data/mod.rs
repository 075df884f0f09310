pub mod load_data;
pub mod save_data;

pub use load_data::{load_round, parse_round, RoundSnapshot};
pub use save_data::{save_round, serialize_round};
