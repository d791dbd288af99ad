pub mod hospital;
pub mod nws;

pub use hospital::HospitalClient;
pub use nws::NwsClient;
