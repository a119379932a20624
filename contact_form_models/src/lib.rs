pub mod country;
pub mod form;
pub mod payload;
pub mod submission;
