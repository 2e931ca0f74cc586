//! Zero-Cost Safety Macros
//!
//! In Debug mode: Normal bounds-checked access (panics with useful errors)
//! In Release mode: Unsafe unchecked access (zero overhead)
//!
//! Used by the broad phase for cell lookups whose indices are clamped
//! to the grid before access.
//!
//! Usage:
//! ```rust
//! use particula_liquid::fast;
//!
//! let cell = 2;
//!
//! let cell_start = vec![0u32, 3, 3, 7, 9];
//! // Read: fast!(slice, [index])
//! let start = *fast!(cell_start, [cell]);
//! assert_eq!(start, 3);
//!
//! let mut counts = vec![0u32; 5];
//! // Write: fast!(slice, [index] = value)
//! fast!(counts, [cell] = 4);
//! assert_eq!(counts[cell], 4);
//! ```

/// Zero-cost bounds checking macro
///
/// - Debug: Uses normal indexing with bounds checks
/// - Release: Uses get_unchecked/get_unchecked_mut
///
/// Callers must guarantee the index is in range; debug builds verify it.
#[macro_export]
macro_rules! fast {
    // Read pattern: fast!(slice, [index])
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    // Write pattern: fast!(slice, [index] = value)
    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { *$slice.get_unchecked_mut($index) = $val; }
        }
    }};
}
