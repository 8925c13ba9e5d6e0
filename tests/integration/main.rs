//! Integration tests for rgremap.
//!
//! These tests run the `rgremap` binary and the library pipeline end to end over BAM files
//! generated on the fly.

mod helpers;
mod test_error_paths;
mod test_streaming_input;
