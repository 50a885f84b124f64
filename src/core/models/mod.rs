pub mod audit;
pub mod group;
pub mod item;
pub mod participant;
pub mod user;

pub use audit::{AppLog, GroupAudit};
pub use group::Group;
pub use item::Item;
pub use participant::Participant;
pub use user::User;
