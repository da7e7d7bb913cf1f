pub mod consultation;
pub mod review;
pub mod user;
