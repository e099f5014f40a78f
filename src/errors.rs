// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get access to everything `error_chain!` creates.
use error_chain::*;

error_chain! {

    foreign_links {
        ImageError(::image::ImageError);
        Io(::std::io::Error);
    }

    errors {
        // The maze configuration cannot produce a maze, e.g. zero columns or an empty raster.
        Configuration(reason: String) {
            description("invalid maze configuration")
            display("invalid maze configuration: {}", reason)
        }

        // The raster was requested before the maze generation completed.
        NotReady {
            description("maze generation has not completed")
            display("maze generation has not completed, the raster cannot be exported yet")
        }

        // The grid refused a visit or link the generator asked for.
        InvalidLink(err: crate::grid::CellLinkError) {
            description("invalid cell visit or link")
            display("invalid cell visit or link: {:?}", err)
        }
    }
}

/// Shorthand for failing with a `Configuration` error.
pub fn configuration_error<T, S: Into<String>>(reason: S) -> Result<T> {
    Err(ErrorKind::Configuration(reason.into()).into())
}

impl From<crate::grid::CellLinkError> for Error {
    fn from(err: crate::grid::CellLinkError) -> Error {
        ErrorKind::InvalidLink(err).into()
    }
}
