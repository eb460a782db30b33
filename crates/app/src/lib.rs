//! Shared application services and persistence for the rebate engine.

pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;
