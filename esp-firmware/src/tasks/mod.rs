// Task module: contains all embassy tasks
//
// Each task runs asynchronously and independently. The link tasks
// communicate over an embassy channel (rx -> tx).

pub mod blink;
pub mod link;

// Re-export tasks for convenient import
pub use blink::blink_task;
pub use link::{link_rx_task, link_tx_task};
