pub mod link_rewriter;
pub mod page_store;

pub use link_rewriter::LinkRewriter;
pub use page_store::PageStore;
