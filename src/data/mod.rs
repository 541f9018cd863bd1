pub mod datetime;
pub mod loader;
pub mod parser;
pub mod table;

pub use loader::load_file;
pub use table::Table;
