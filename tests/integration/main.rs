//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the public API against
//! mock host adapters.  All tests run on the host (x86_64) with no real
//! BLE stack required.

mod access_tests;
mod mock_host;
mod table_tests;
