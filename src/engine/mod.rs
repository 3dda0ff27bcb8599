// Engine modules: renderer, assets, input, game loop

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod renderer;
