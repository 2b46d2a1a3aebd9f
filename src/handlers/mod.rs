pub mod payment;
pub mod recovery;
