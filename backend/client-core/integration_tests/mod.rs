mod api_client;
mod config;
mod session;
mod storage;
