mod category;
mod expense;
mod form;
mod ledger;
mod money;
mod pagination;
mod wallet;

pub use category::*;
pub use expense::*;
pub use form::*;
pub use ledger::*;
pub use money::*;
pub use pagination::*;
pub use wallet::*;
