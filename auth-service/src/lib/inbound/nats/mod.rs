pub mod handlers;
pub mod messages;
pub mod server;

pub use server::dispatch;
pub use server::NatsServer;
pub use server::Route;
