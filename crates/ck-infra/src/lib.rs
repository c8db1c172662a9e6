//! Infrastructure adapters for clipkeep that do not touch the OS.

pub mod imaging;
pub mod time;

pub use imaging::ImageCrateCodec;
pub use time::SystemClock;
