mod api_client_error;
mod config;
mod display;
mod listing;
mod permissions;
mod retry;
mod session;
mod validation;
