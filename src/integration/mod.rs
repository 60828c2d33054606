pub mod integrator;

pub use integrator::{damping_factor, integrate};
