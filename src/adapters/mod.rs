//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter  | Implements                      | Connects to            |
//! |----------|---------------------------------|------------------------|
//! | `nimble` | AttributeServer, TransportBuffer | NimBLE host stack      |
//!
//! The NimBLE adapter is compiled for ESP-IDF targets only; host-side
//! tests substitute in-memory mocks for both ports.

pub mod nimble;
