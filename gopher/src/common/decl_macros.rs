// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Shorthand for `Ok(())` when called with no args, and `Ok($value)` otherwise.
///
/// ```
/// use r3bl_gopher::ok;
///
/// fn it() -> Result<u16, ()> { ok!(70) }
/// fn none() -> Result<(), ()> { ok!() }
///
/// assert_eq!(it(), Ok(70));
/// assert_eq!(none(), Ok(()));
/// ```
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}

/// `mimalloc` is a replacement for the default global allocator. Call this once at the
/// top of `main` in a binary that depends on `mimalloc`.
/// - <https://github.com/microsoft/mimalloc?tab=readme-ov-file#performance>
/// - <https://crates.io/crates/mimalloc>
#[macro_export]
macro_rules! set_mimalloc_in_main {
    () => {{
        use mimalloc::MiMalloc;

        #[global_allocator]
        static GLOBAL: MiMalloc = MiMalloc;
    }};
}
