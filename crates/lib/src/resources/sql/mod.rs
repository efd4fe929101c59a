//! Azure SQL servers and databases.

mod database;
mod server;

pub use database::*;
pub use server::*;
