fn main() {
    // Templates are only embedded into release builds; debug builds read them from disk.
    minijinja_embed::embed_templates!("templates");
}
