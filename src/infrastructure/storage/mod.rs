//! Storage implementations outside the relational database

pub mod memory;

pub use memory::MemoryReservationRepository;
