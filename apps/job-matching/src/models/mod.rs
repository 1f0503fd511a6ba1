pub mod application;
pub mod job;
pub mod profile;

#[cfg(test)]
pub mod fixtures;
