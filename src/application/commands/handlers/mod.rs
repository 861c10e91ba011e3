//! Command Handlers

mod generate_handler;

pub use generate_handler::GenerateGarmentHandler;
