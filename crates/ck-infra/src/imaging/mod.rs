mod codec;

pub use codec::ImageCrateCodec;
