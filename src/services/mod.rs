// linkdeck services
// Services talk to the outside world: the bookmark backend and the settings file.

pub mod api_client;
pub mod memory_backend;
pub mod settings_engine;
