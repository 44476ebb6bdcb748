pub mod arrival;
pub mod cycle;
