pub mod actas;
pub mod admin;
pub mod auth;
pub mod blobs;
pub mod dashboard;
pub mod digitacion;
pub mod health;
pub mod mesas;
pub mod navegacion;
pub mod partidos;
pub mod recintos;
