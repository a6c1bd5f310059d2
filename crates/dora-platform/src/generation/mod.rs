pub mod http;

pub use http::HttpGenerationClient;
