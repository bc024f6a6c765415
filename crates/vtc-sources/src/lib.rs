pub mod collection;
pub mod file;
pub mod source;

pub use collection::{DEFAULT_EXTENSIONS, is_image_file, list_images};
pub use file::read_dimensions;
pub use source::{ImageSource, SourceOptions};
