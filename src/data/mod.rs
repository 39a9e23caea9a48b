pub mod example;
pub mod dataset;
pub mod csv;
pub mod generate;

pub use example::Example;
pub use dataset::Dataset;
pub use csv::{parse_csv, write_csv};
pub use generate::generate_xor;
