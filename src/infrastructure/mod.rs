pub mod fake;
pub mod http_page_checker;
pub mod twilio_notifier;
