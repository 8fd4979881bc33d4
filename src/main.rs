fn main() -> anyhow::Result<()> {
    shibou_lens_lib::run()
}
