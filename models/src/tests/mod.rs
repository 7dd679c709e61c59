mod page;
mod session_record;
mod thread;
mod thread_draft_builder;
