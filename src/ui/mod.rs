pub mod chat_loop;
pub mod compose_box;
pub mod message_box;
pub mod renderer;
