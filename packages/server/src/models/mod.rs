pub mod admin;
pub mod case;
pub mod photo;
pub mod platform;
pub mod soc;
