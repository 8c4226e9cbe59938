pub mod forecast;
pub mod darksky;
pub mod frame;
