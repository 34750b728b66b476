pub mod document;
pub mod key_status;
pub mod project;
