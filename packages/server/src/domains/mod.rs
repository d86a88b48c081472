// Domain modules
pub mod assistant;
