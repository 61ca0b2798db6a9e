//! Entry point for the WASM application

pub fn main() {
    shiplabel_web::mount();
}
