mod any;
mod event;
mod inventory;
mod mor;
mod option;
mod property;
mod response;
mod search;
mod service;
mod session;
mod task;
mod time;
mod vm;

pub use any::*;
pub use event::*;
pub use inventory::*;
pub use mor::*;
pub use option::*;
pub use property::*;
pub use response::*;
pub use search::*;
pub use service::*;
pub use session::*;
pub use task::*;
pub use time::*;
pub use vm::*;
