//! Various support utilities.

pub mod hashmap;
pub mod hashset;
pub mod morton;
