pub mod fee_record;
pub mod payment;

pub use fee_record::FeeRecord;
pub use payment::Payment;
