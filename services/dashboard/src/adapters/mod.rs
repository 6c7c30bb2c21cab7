pub mod http;
pub mod token_file;

pub use http::HttpGatewayAdapter;
pub use token_file::FileTokenStore;
