//! Sample actions with their generated helpers compiled in.
//!
//! `build.rs` runs the generator over this crate; each helper is then
//! mounted as a child module of the module declaring its action.

/// Mounts the generated helper file for an action in the current module.
macro_rules! mount_helper {
    ($module:ident, $helper:ident, $file:literal) => {
        mod $module {
            include!(concat!(env!("OUT_DIR"), $file));
        }
        pub use $module::$helper;
    };
}

pub mod api;
