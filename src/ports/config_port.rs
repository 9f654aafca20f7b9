//! Configuration access port trait.

pub trait ConfigPort {
    /// Value of `key` in `section`; `Some("")` when present but blank.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}
