// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get at them.
use error_chain::*;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Image(::image::ImageError);
    }

    errors {
        InvalidDimension(width: usize, height: usize) {
            description("invalid grid dimension")
            display("Invalid grid size {}x{}, both dimensions must be positive.", width, height)
        }
        Allocation(what: &'static str, count: usize) {
            description("allocation failure")
            display("Failed to allocate {} for {} elements.", what, count)
        }
        InvalidBias(horizontal: usize, vertical: usize) {
            description("invalid direction bias")
            display("Invalid bias horizontal: {} vertical: {}, each weight must be at least 1.",
                    horizontal, vertical)
        }
        InvalidRenderOption(reason: String) {
            description("invalid render option")
            display("Invalid render option: {}", reason)
        }
    }
}
