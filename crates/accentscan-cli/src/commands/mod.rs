pub mod analyze;
pub mod config;
pub mod doctor;
pub mod serve;
