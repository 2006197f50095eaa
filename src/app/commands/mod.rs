pub mod compile;
pub mod init;
pub mod install;
pub mod list;
pub mod sync;
pub mod uninstall;
pub mod vendor;
