pub mod add_on;
pub mod booking;
pub mod inquiry;
pub mod package;
pub mod quiz;
pub mod review;
