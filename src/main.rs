fn main() {
    panel_configurator::run()
}
