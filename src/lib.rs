pub mod error;
pub mod input;
pub mod utils;

pub mod day02;
pub mod day03;
pub mod day04;
pub mod day05;
pub mod day06;
pub mod day07;

pub use error::{Error, InvariantViolation, Result};
