pub mod convert;
pub mod error;
pub mod logger;
pub mod paths;
pub mod qtpro;
pub mod scan;
pub mod uvprojx;

pub use convert::{Conversion, ConvertOptions, Converter};
pub use error::{ConvertError, Result};
pub use qtpro::QtProject;
pub use uvprojx::{TargetNamePolicy, Uvprojx};
