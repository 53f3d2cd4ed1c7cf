pub mod http_sink;
pub mod json_sink;

pub use http_sink::HttpTourSink;
pub use json_sink::JsonLinesSink;
