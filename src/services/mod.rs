pub use pushkind_common::services::errors::{ServiceError, ServiceResult};

pub mod expenses;
pub mod finder;
pub mod leads;
pub mod main;
pub mod payments;
pub mod quotations;
pub mod rates;
pub mod trips;
pub mod vendors;
