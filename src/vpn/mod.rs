//! Cosmetic connection material: tunnel addresses and client profiles.
//!
//! Nothing here is routable or cryptographically meaningful. The address is
//! never leased and the profile carries filler instead of key material.

pub mod address;
pub mod openvpn;

pub use address::synthetic_address;
pub use openvpn::{download_filename, OpenVpnProfile};
