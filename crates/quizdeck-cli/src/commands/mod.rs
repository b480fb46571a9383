pub mod init;
pub mod inspect;
pub mod list;
pub mod serve;
pub mod validate;
