#[cfg(not(target_arch = "wasm32"))]
mod preview;

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));

    if let Err(err) = saibaba_frontend::run() {
        log::error!("Failed to start the site: {err:#}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_local_timestamps()
        .init()
        .expect("failed to build logger instance");

    preview::run()
}
