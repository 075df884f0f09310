pub mod round;
pub mod strategy;
