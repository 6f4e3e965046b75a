// src/bin/cli.rs
fn main() -> color_eyre::Result<()> {
    quiz_deck::cli::run()
}
