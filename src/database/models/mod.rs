pub mod connection;
pub mod log;
pub mod server;
pub mod user;
pub mod vpn_config;

pub use connection::{ConnectionStatus, NewSession, VpnConnection};
pub use log::{ConnectionLog, LogEvent};
pub use server::{NewServer, VpnServer};
pub use user::{NewUser, User};
pub use vpn_config::VpnConfigRecord;
