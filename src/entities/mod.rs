pub mod prelude;

pub mod consultations;
pub mod reviews;
pub mod users;
