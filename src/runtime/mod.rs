pub mod app;
pub mod input_manager;
pub mod showcase;
pub mod time_manager;
