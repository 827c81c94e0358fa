pub mod dispatcher;
pub mod notifier;
pub mod probe;
pub mod report;
