pub mod cli;
pub mod state;
