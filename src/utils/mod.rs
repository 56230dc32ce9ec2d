pub mod formatting;
pub mod fs;
pub mod paths;
