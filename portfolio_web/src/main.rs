mod context;
mod dom;
mod relay;
mod runtime;
mod storage;

use gloo::console::error;


fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));

    if let Err(err) = runtime::start() {
        handle_error(err);
    }
}

fn handle_error(err: anyhow::Error) {
    error!(format!("Page behavior failed to start: {:#}", err));
}
