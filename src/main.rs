fn main() -> std::io::Result<()> {
    faqbot_lib::run()
}
