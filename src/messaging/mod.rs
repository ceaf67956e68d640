// Messaging module - channels and payload types between the board, the
// audio engine, and the host shell

pub mod channels;
pub mod command;
pub mod notification;

pub use channels::{
    CommandConsumer, CommandProducer, NotificationConsumer, NotificationProducer,
    create_command_channel, create_notification_channel,
};
pub use command::{Command, ToneParams};
pub use notification::{Notification, NotificationCategory, NotificationLevel};
