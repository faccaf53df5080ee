//! Background tasks for the HTTP presentation layer

mod rate_limit_sweep;

pub use rate_limit_sweep::spawn_rate_limit_sweep_task;
