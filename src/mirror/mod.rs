// src/mirror/mod.rs
// =============================================================================
// This module writes fetched resources to the local mirror.
//
// Submodules:
// - path: URL + kind -> file path under output/<host>/ (pure, deterministic)
// - store: creates parent directories and writes the bytes
//
// Layout example for a crawl of http://example.com/:
//   output/example.com/index.html        <- http://example.com/
//   output/example.com/blog.html         <- http://example.com/blog (page)
//   output/example.com/css/site.css      <- http://example.com/css/site.css
// =============================================================================

mod path;
mod store;

pub use store::save;
