//! Upload limits and response messages.

pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

pub const ALLOWED_FILE_FORMATS: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

pub const FILE_UPLOADED: &str = "File uploaded successfully";
