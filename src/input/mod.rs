pub mod normal_mode;
pub mod command_mode;
