//! API service modules for CZDS endpoints.

mod zones;

pub use zones::ZonesService;
