mod application;
mod messenger;
mod notifier;
mod store;

pub use application::Application;
pub use messenger::Messenger;
pub use notifier::{Notification, Notifier};
pub use store::RecordStore;
