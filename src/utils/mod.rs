pub mod paths;
pub mod terminal;

pub use paths::{format_path_with_tilde, validate_file_size};
pub use terminal::{sanitize_line, strip_ansi_codes};
