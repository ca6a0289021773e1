pub mod facts;
pub mod outreach;
pub mod poller;
pub mod prospect_source;
pub mod sheet_adapter;

pub use facts::*;
pub use outreach::*;
pub use poller::*;
pub use prospect_source::*;
pub use sheet_adapter::*;
