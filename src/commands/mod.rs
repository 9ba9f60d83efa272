pub mod init;
pub mod report;

pub use init::init_config;
pub use report::{handle_report, ReportOptions};
