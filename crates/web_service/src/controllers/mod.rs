pub mod chat_controller;
pub mod system_controller;
pub mod turn_controller;
