//! SeaORM entities

pub mod choices;
pub mod questions;
