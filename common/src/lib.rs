pub mod file_format;
pub mod log_setup;
pub mod normalize_string;
pub mod serde;

pub use file_format::SerdeFormat;
