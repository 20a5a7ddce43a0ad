pub mod emailjs_notifier;
pub mod tracing_notifier;
