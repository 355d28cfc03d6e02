pub mod gallery_server;
