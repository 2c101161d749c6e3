//! Daily currency exchange rates service.
//!
//! A thin REST API over a relational table of daily rates plus a batch
//! importer that pulls the Central Bank XML feed. Entities cross three
//! shapes (storage record, domain model, transport DTO) through the generic
//! mapping engine in [`mapper`].

pub mod centrobank;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod mapper;
pub mod rest;
pub mod storage;
