mod app;
mod catalog;
mod deck;
mod document;
mod runtime;
mod settings;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
