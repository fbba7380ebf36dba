//! Image codecs: binary PPM (read/write) and PNG (write).

mod png_encoder;
mod ppm;

pub use png_encoder::PngEncoder;
pub use ppm::{PpmCodec, PpmHeader};
