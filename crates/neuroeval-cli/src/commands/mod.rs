pub mod batch;
pub mod compare;
pub mod curves;
pub mod evaluate;
pub mod init;
pub mod validate;
