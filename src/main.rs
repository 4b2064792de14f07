fn main() -> anyhow::Result<()> {
    ldtk_chunk_inspect::run()
}
