//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.


#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_extension_name_generator(name in extension_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'));
        }

        #[test]
        fn test_cflags_generator(flags in cflags()) {
            prop_assert!(flags.len() < 4);
            for flag in flags {
                prop_assert!(flag.starts_with('-'));
            }
        }
    }
}
