//! Console logging that also works when the crate runs natively under test.

pub(crate) fn debug(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::debug_1(&format!("[frontend] {message}").into());
    #[cfg(not(target_arch = "wasm32"))]
    tracing::debug!(target: "frontend", "{message}");
}

pub(crate) fn error(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&format!("[frontend] {message}").into());
    #[cfg(not(target_arch = "wasm32"))]
    tracing::error!(target: "frontend", "{message}");
}
