pub mod driving_log;

pub use driving_log::DrivingLogReader;
