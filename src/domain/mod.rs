pub mod contract;
pub mod issue;
pub mod schema;
pub mod ticket;
