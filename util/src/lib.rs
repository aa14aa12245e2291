pub mod http;
pub mod paging;
pub mod paths;
