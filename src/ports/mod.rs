pub mod repository;
pub mod storage;
pub mod transcoder;
