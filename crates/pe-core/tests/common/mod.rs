pub mod dict_server;
