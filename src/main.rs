fn main() {
    rulecraft::app::cli::run();
}
