//! Result type used by the CLI, reported through color-eyre.
use color_eyre::eyre::Result as EyreResult;

pub type Result<T> = EyreResult<T>;
