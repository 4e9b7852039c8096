pub mod admin;
pub mod format;
pub mod state;
pub mod test_utils;
