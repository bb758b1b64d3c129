fn main() {
    specboard::app::cli::run();
}
