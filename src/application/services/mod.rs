//! Use-case services. All I/O is routed through injected port traits;
//! nothing here touches the terminal, the filesystem, or the network
//! directly.

pub mod configure;
pub mod deploy;
pub mod monitor;
pub mod validate;
