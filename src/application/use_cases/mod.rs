pub mod init_compose;
