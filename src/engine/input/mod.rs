// Input handling system
//
// Keyboard and mouse input for the local player, with remappable bindings.
//
// ## Architecture
//
// - `action`: Defines game actions and default bindings
// - `config`: Binding table and remapping
// - `player`: Held and just-pressed action state
// - `manager`: Turns winit events into action state
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputManager, Action};
//
// let mut input_manager = InputManager::default();
//
// // In your event loop, process keyboard events
// input_manager.process_keyboard_event(&key_event);
//
// // Read the state for this frame
// if input_manager.player().is_pressed(Action::Attack) {
//     // Swing
// }
//
// // Then start the next frame
// input_manager.update();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::Action;
pub use manager::InputManager;
pub use player::PlayerInput;
