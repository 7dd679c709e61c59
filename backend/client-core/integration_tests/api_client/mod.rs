mod auth;
mod comments;
mod helpers;
mod threads;
