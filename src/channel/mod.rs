//! Installation channels beside the native repository.

pub mod flatpak;
pub mod other;
pub mod snap;

pub use flatpak::{Flatpak, FlatpakRemote};
pub use other::OtherPackage;
pub use snap::Snap;
