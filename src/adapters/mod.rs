pub mod postman_client_http;
pub mod spec_filesystem;

pub use postman_client_http::HttpPostmanClient;
pub use spec_filesystem::FilesystemSpecSource;
