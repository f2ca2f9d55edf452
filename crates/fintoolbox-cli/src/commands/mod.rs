pub mod assessment;
pub mod interest;
pub mod returns;
