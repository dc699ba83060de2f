mod capture;
mod config;
mod core;
mod domain;
mod error;
mod localize;
mod session;
mod sidecar;
mod widget;

fn main() -> cosmic::iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    localize::localize();
    core::app::run()
}
