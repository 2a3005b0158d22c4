//! Business logic services

pub mod directions;
pub mod geo;
pub mod matrix;
pub mod optimizer;
pub mod schedule;
pub mod solver;
