mod structs;
#[cfg(test)]
mod tests;

pub use structs::*;
