pub mod check_header;
pub mod request_log;
