//! Live adapters talking to real services and the local terminal.

pub mod console;
pub mod edge_function;
pub mod file_saver;
