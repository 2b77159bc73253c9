// User domain module
// Accounts allowed to obtain write tokens for the catalog

pub mod value_objects;

pub use value_objects::Email;
