//! 供应商网关服务
//!
//! 记录转发来的奖励分配，生成确认号并异步回调确认接收端。

pub mod confirmation;
pub mod error;
pub mod handlers;
pub mod notifier;
pub mod routes;
pub mod state;
pub mod store;

pub use confirmation::ConfirmationNumberGenerator;
pub use error::{DeliveryError, VendorError};
pub use notifier::{ConfirmationNotifier, ConfirmationSink, Delivery};
pub use state::AppState;
pub use store::AssignmentStore;
