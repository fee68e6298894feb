mod app;
mod renderer;

fn main()
{
  // Initialise the logger so wgpu validation errors and warnings appear in the console.
  // Set RUST_LOG=lantern_core=debug to trace projection recomputes.
  if std::env::var_os("RUST_LOG").is_none()
  {
    std::env::set_var("RUST_LOG", "info,wgpu_hal=off,naga=warn");
  }
  env_logger::init();

  if let Err(err) = app::run()
  {
    log::error!("{err:#}");
    std::process::exit(1);
  }
}
