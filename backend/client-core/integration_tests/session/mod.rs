mod concurrency;
mod expiry;
mod lifecycle;
