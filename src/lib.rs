//! pkghandler - move workstation packages between the distribution
//! repository, Flatpak, Snap and standalone installers.

pub mod catalog;
pub mod channel;
pub mod cmd;
pub mod config;
pub mod distribution;
pub mod distro;
pub mod error;
pub mod hooks;
pub mod menu;
pub mod pkgmgr;
pub mod prompt;

pub use catalog::{Catalog, Package};
pub use distribution::{Distribution, InstallMethod};
pub use error::Error;
