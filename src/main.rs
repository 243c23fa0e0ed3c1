use runtime::app::{App, AppError};

mod controllers;
mod render;
mod runtime;
mod shapes;
mod utils;

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = pollster::block_on(App::new(&Default::default()))?;
    app.run()
}
