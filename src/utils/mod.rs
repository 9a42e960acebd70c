pub mod error;
pub mod formats;
pub mod fs;

pub use error::{MediaError, MediaResult};
pub use formats::{DEFAULT_JPEG_QUALITY, ImageFormat, SUPPORTED_EXTENSIONS};
pub use fs::{
    extract_filename,
    get_extension,
    read_file,
    write_atomic,
};
