pub mod expense;
pub mod follow_up;
pub mod lead;
pub mod payment;
pub mod quotation;
pub mod rate;
pub mod trip;
pub mod vendor;
