mod cart;
mod category;
mod checkout;
mod page;
mod product;
mod review;

pub use cart::*;
pub use category::*;
pub use checkout::*;
pub use page::*;
pub use product::*;
pub use review::*;
