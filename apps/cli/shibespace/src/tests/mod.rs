mod logger;
mod render;
