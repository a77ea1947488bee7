pub mod text;

pub use text::{truncate_start_with_ellipsis, truncate_with_ellipsis};
