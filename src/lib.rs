//! clipkeep: a clipboard history viewer that writes historical entries
//! back to the system clipboard.

pub mod bootstrap;
pub mod console;
