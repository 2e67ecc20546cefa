//! Cropview WASM - WebAssembly bindings for Cropview
//!
//! This crate exposes the cropview-core geometry engine to JavaScript and
//! TypeScript crop views.
//!
//! # Module Structure
//!
//! - `engine` - The `JsCropEngine` wrapper around one crop view's state
//! - `types` - WASM-compatible rectangle types
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropEngine } from '@cropview/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const engine = new JsCropEngine(undefined);
//! engine.on_resize(canvas.width, canvas.height);
//! engine.set_image(bitmap.width, bitmap.height, 1, 0);
//! ctx.setTransform(...engine.image_matrix());
//! ```

use wasm_bindgen::prelude::*;

mod engine;
mod types;

// Re-export public types
pub use engine::JsCropEngine;
pub use types::JsCropRect;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
