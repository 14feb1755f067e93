pub mod link_service;
pub mod page_store;
pub mod route_service;

pub use link_service::LinkRewriter;
pub use page_store::PageStore;
pub use route_service::PathRouter;
