mod readers;
mod toggle;
mod util;

pub use readers::open_table_reader;
pub use toggle::Toggle;
pub use util::{handle_error_and_exit, Result};
