pub mod dynamodb;
pub mod mediaconvert;
pub mod s3;
