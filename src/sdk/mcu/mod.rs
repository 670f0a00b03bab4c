pub mod clock;
pub mod register;
