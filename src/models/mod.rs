mod category;
mod good;
mod user;

pub use category::{Category, NewCategory};
pub use good::{CreatedGood, Good, GoodCategory, GoodUpdate, NewGood, UpdatedGood};
pub use user::{NewUser, User};
