pub mod assess;
pub mod init;
pub mod show;
pub mod validate;
