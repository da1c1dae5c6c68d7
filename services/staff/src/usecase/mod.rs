pub mod address;
pub mod intern;
pub mod manager;
pub mod staff;
