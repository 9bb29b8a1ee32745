// Illustrates aliasing of inline stores.
fn main() {}
