pub mod apply;

pub use apply::{FixError, apply_edits, apply_edits_to_file};
